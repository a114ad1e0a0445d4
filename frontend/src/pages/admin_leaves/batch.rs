use std::collections::HashMap;

use super::actions::{submit_decision, ApprovalRoute, Decision};
use super::repository::AdminLeaveGateway;
use crate::api::{ApiError, LeaveRequest};
use crate::utils::cancel::CancelToken;

/// Selected ids in the order they were picked; batches run in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSelection {
    active: bool,
    selected: Vec<String>,
}

impl BatchSelection {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.clone()
    }

    /// Leaving batch mode drops the selection.
    pub fn toggle_mode(&mut self) {
        self.active = !self.active;
        if !self.active {
            self.selected.clear();
        }
    }

    pub fn toggle_item(&mut self, id: &str) {
        if !self.active {
            return;
        }
        if self.is_selected(id) {
            self.selected.retain(|selected| selected != id);
        } else {
            self.selected.push(id.to_string());
        }
    }

    pub fn all_selected(&self, visible_ids: &[String]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.is_selected(id))
    }

    /// Selects every visible id, or deselects them when all already are.
    pub fn toggle_select_all(&mut self, visible_ids: &[String]) {
        if !self.active {
            return;
        }
        if self.all_selected(visible_ids) {
            self.selected.retain(|id| !visible_ids.contains(id));
        } else {
            for id in visible_ids {
                if !self.is_selected(id) {
                    self.selected.push(id.clone());
                }
            }
        }
    }

    /// Keeps only ids still present in `ids`.
    pub fn retain(&mut self, ids: &[String]) {
        self.selected.retain(|id| ids.contains(id));
    }

    pub fn finish(&mut self) {
        self.active = false;
        self.selected.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: Vec<(String, ApiError)>,
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn should_refresh(&self) -> bool {
        self.succeeded > 0
    }

    pub fn summary(&self, decision: &Decision) -> String {
        if self.failed.is_empty() {
            format!("{}건을 {}했습니다.", self.succeeded, decision.verb())
        } else {
            format!(
                "{}건 {} 완료, {}건 실패했습니다.",
                self.succeeded,
                decision.verb(),
                self.failed.len()
            )
        }
    }
}

/// Runs `call` for each id in order, one at a time, continuing past
/// failures. Stops before the next id once `cancel` fires.
pub async fn run_sequential<F, Fut>(ids: &[String], cancel: &CancelToken, mut call: F) -> BatchOutcome
where
    F: FnMut(String) -> Fut,
    Fut: std::future::Future<Output = Result<(), ApiError>>,
{
    let mut outcome = BatchOutcome::default();
    for id in ids {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
        match call(id.clone()).await {
            Ok(()) => outcome.succeeded += 1,
            Err(err) => {
                log::warn!("batch item {} failed: {}", id, err);
                outcome.failed.push((id.clone(), err));
            }
        }
    }
    outcome
}

/// Applies `decision` to every selected id, routing cancel requests to the
/// cancel approval endpoint.
pub async fn run_batch(
    gateway: &dyn AdminLeaveGateway,
    approver_id: &str,
    ids: &[String],
    leaves: &[LeaveRequest],
    decision: &Decision,
    cancel: &CancelToken,
) -> BatchOutcome {
    let routes: HashMap<&str, ApprovalRoute> = leaves
        .iter()
        .map(|leave| (leave.id.as_str(), ApprovalRoute::for_leave(leave)))
        .collect();
    let outcome = run_sequential(ids, cancel, |id| {
        let route = routes
            .get(id.as_str())
            .copied()
            .unwrap_or(ApprovalRoute::Standard);
        async move { submit_decision(gateway, approver_id, &id, route, decision).await }
    })
    .await;
    log::info!(
        "batch {}: {} succeeded, {} failed{}",
        decision.verb(),
        outcome.succeeded,
        outcome.failed.len(),
        if outcome.cancelled { ", cancelled" } else { "" }
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LeaveStatus;
    use crate::pages::admin_leaves::repository::fake::{Call, FakeGateway};
    use crate::test_support::helpers::leave;
    use futures::executor::block_on;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn selection_requires_batch_mode() {
        let mut selection = BatchSelection::default();
        selection.toggle_item("1");
        assert!(selection.is_empty());
        selection.toggle_mode();
        selection.toggle_item("1");
        selection.toggle_item("2");
        selection.toggle_item("1");
        assert_eq!(selection.selected_ids(), ids(&["2"]));
        selection.toggle_mode();
        assert!(!selection.is_active());
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_toggles_visible_ids_only() {
        let mut selection = BatchSelection::default();
        selection.toggle_mode();
        selection.toggle_item("9");
        let visible = ids(&["1", "2", "3"]);
        selection.toggle_select_all(&visible);
        assert!(selection.all_selected(&visible));
        assert_eq!(selection.len(), 4);
        selection.toggle_select_all(&visible);
        assert_eq!(selection.selected_ids(), ids(&["9"]));
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn selection_keeps_pick_order() {
        let mut selection = BatchSelection::default();
        selection.toggle_mode();
        selection.toggle_item("10");
        selection.toggle_item("2");
        selection.toggle_select_all(&ids(&["2", "7", "10"]));
        assert_eq!(selection.selected_ids(), ids(&["10", "2", "7"]));
    }

    #[test]
    fn retain_drops_ids_no_longer_listed() {
        let mut selection = BatchSelection::default();
        selection.toggle_mode();
        selection.toggle_select_all(&ids(&["1", "2", "3"]));
        selection.retain(&ids(&["2", "4"]));
        assert_eq!(selection.selected_ids(), ids(&["2"]));
    }

    #[test]
    fn approve_continues_past_one_failure() {
        let leaves = vec![
            leave("1", "김철수", LeaveStatus::Requested),
            leave("2", "이영희", LeaveStatus::Requested),
            leave("3", "박민수", LeaveStatus::Requested),
        ];
        let gateway = FakeGateway::with_waiting(leaves.clone()).failing_on("2");
        let outcome = block_on(run_batch(
            &gateway,
            "emp-admin",
            &ids(&["1", "2", "3"]),
            &leaves,
            &Decision::Approve,
            &CancelToken::new(),
        ));
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "2");
        assert!(outcome.should_refresh());
        assert_eq!(gateway.calls().len(), 3);
        assert_eq!(outcome.summary(&Decision::Approve), "2건 승인 완료, 1건 실패했습니다.");
    }

    #[test]
    fn batch_routes_cancel_requests_separately() {
        let mut cancel = leave("2", "이영희", LeaveStatus::Requested);
        cancel.is_cancel = 1;
        let leaves = vec![leave("1", "김철수", LeaveStatus::Requested), cancel];
        let gateway = FakeGateway::with_waiting(leaves.clone());
        let decision = Decision::reject("일정 충돌").unwrap();
        let outcome = block_on(run_batch(
            &gateway,
            "emp-admin",
            &ids(&["1", "2"]),
            &leaves,
            &decision,
            &CancelToken::new(),
        ));
        assert_eq!(outcome.succeeded, 2);
        let calls = gateway.calls();
        assert!(matches!(&calls[0], Call::Approval(req) if req.reject_message.as_deref() == Some("일정 충돌")));
        assert!(matches!(&calls[1], Call::CancelApproval(req) if req.is_approved == Some(false)));
    }

    #[test]
    fn all_failures_do_not_refresh() {
        let leaves = vec![leave("1", "김철수", LeaveStatus::Requested)];
        let gateway = FakeGateway::with_waiting(leaves.clone()).failing_on("1");
        let outcome = block_on(run_batch(
            &gateway,
            "emp-admin",
            &ids(&["1"]),
            &leaves,
            &Decision::Approve,
            &CancelToken::new(),
        ));
        assert!(!outcome.should_refresh());
    }

    #[test]
    fn cancelled_batch_stops_before_next_item() {
        let cancel = CancelToken::new();
        let mut seen = Vec::new();
        let outcome = block_on(run_sequential(&ids(&["1", "2", "3"]), &cancel, |id| {
            seen.push(id.clone());
            if id == "1" {
                cancel.cancel();
            }
            async { Ok(()) }
        }));
        assert_eq!(seen, ids(&["1"]));
        assert_eq!(outcome.succeeded, 1);
        assert!(outcome.cancelled);
    }
}

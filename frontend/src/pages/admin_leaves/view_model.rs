use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use leptos::*;

use super::{
    actions::Decision,
    batch::{run_batch, BatchOutcome, BatchSelection},
    calendar::{build_calendar, CalendarDay},
    filter::{filter_leaves, filter_options, FilterOptions},
    pager::{is_mobile_viewport, page_size_for, paginate, total_pages as page_count},
    repository::{load_month, load_year, AdminLeaveGateway, AdminLeaveRepository},
    status::is_actionable,
    types::{MonthData, YearlySnapshot},
    view_state::{FilterChange, LeaveViewState},
};
use crate::api::{ApiClient, ApiError, LeaveRequest};
use crate::state::auth::{use_auth, AuthState};
use crate::utils::{
    cancel::{CancelToken, LoadGeneration, LoadTicket},
    time::{today_in_app_tz, YearMonth},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
    }

    pub fn set_error(&mut self, err: ApiError) {
        self.error = Some(err);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionPayload {
    pub approver_id: String,
    pub ids: Vec<String>,
    pub leaves: Vec<LeaveRequest>,
    pub decision: Decision,
    pub batch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionResult {
    pub decision: Decision,
    pub batch: bool,
    pub outcome: BatchOutcome,
}

#[derive(Clone)]
pub struct AdminLeavesViewModel {
    pub today: NaiveDate,
    pub month: RwSignal<YearMonth>,
    pub view_state: RwSignal<LeaveViewState>,
    pub selection: RwSignal<BatchSelection>,
    pub is_mobile: RwSignal<bool>,
    pub month_data: RwSignal<MonthData>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<ApiError>>,
    pub reload: RwSignal<u32>,
    pub year: RwSignal<i32>,
    pub yearly: RwSignal<Option<YearlySnapshot>>,
    pub yearly_error: RwSignal<Option<ApiError>>,
    pub message: RwSignal<MessageState>,
    pub decision_action: Action<DecisionPayload, DecisionResult>,
    pub filtered: Memo<Vec<LeaveRequest>>,
    pub page_size: Memo<usize>,
    pub total_pages: Memo<usize>,
    pub page_items: Memo<Vec<LeaveRequest>>,
    pub calendar: Memo<Vec<Vec<CalendarDay>>>,
    pub options: Memo<FilterOptions>,
    auth: ReadSignal<AuthState>,
    gateway: Rc<dyn AdminLeaveGateway>,
    month_loads: LoadGeneration,
    year_loads: LoadGeneration,
    cancel: CancelToken,
}

pub fn use_admin_leaves_view_model() -> AdminLeavesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = AdminLeaveRepository::new_with_client(Rc::new(api));
    AdminLeavesViewModel::new(Rc::new(repo), today_in_app_tz())
}

impl AdminLeavesViewModel {
    pub fn new(gateway: Rc<dyn AdminLeaveGateway>, today: NaiveDate) -> Self {
        let (auth, _) = use_auth();
        let cancel = CancelToken::new();

        let month = create_rw_signal(YearMonth::from_date(today));
        let view_state = create_rw_signal(LeaveViewState::default());
        let selection = create_rw_signal(BatchSelection::default());
        let is_mobile = create_rw_signal(is_mobile_viewport());
        let month_data = create_rw_signal(MonthData::default());
        let message = create_rw_signal(MessageState::default());
        let reload = create_rw_signal(0u32);

        let filtered = create_memo(move |_| {
            month_data.with(|data| view_state.with(|state| filter_leaves(&data.snapshot, &state.filter)))
        });
        let page_size = create_memo(move |_| page_size_for(is_mobile.get()));
        let total_pages = create_memo(move |_| page_count(filtered.with(Vec::len), page_size.get()));
        let page_items = create_memo(move |_| {
            let page = view_state.with(|state| state.page);
            filtered.with(|list| paginate(list, page, page_size.get()).to_vec())
        });
        let calendar = create_memo(move |_| {
            month_data.with(|data| {
                build_calendar(month.get(), today, &data.calendar_leaves, &data.holidays)
            })
        });
        let options = create_memo(move |_| month_data.with(|data| filter_options(&data.snapshot)));

        let action_gateway = Rc::clone(&gateway);
        let action_cancel = cancel.clone();
        let decision_action = create_action(move |payload: &DecisionPayload| {
            let gateway = Rc::clone(&action_gateway);
            let cancel = action_cancel.clone();
            let payload = payload.clone();
            async move {
                let outcome = run_batch(
                    gateway.as_ref(),
                    &payload.approver_id,
                    &payload.ids,
                    &payload.leaves,
                    &payload.decision,
                    &cancel,
                )
                .await;
                let result = DecisionResult {
                    decision: payload.decision,
                    batch: payload.batch,
                    outcome,
                };
                if !cancel.is_cancelled() {
                    settle_decision(&result, selection, message, reload);
                }
                result
            }
        });

        let vm = Self {
            today,
            month,
            view_state,
            selection,
            is_mobile,
            month_data,
            loading: create_rw_signal(false),
            load_error: create_rw_signal(None),
            reload,
            year: create_rw_signal(today.year()),
            yearly: create_rw_signal(None),
            yearly_error: create_rw_signal(None),
            message,
            decision_action,
            filtered,
            page_size,
            total_pages,
            page_items,
            calendar,
            options,
            auth,
            gateway,
            month_loads: LoadGeneration::new(),
            year_loads: LoadGeneration::new(),
            cancel,
        };

        let for_month = vm.clone();
        create_effect(move |_| {
            for_month.month.track();
            for_month.reload.track();
            for_month.auth.with(|state| state.user.as_ref().map(|u| u.id.clone()));
            for_month.load_month();
        });

        let for_year = vm.clone();
        create_effect(move |_| {
            for_year.year.track();
            for_year.reload.track();
            for_year.load_year();
        });

        #[cfg(target_arch = "wasm32")]
        {
            let handle = window_event_listener(ev::resize, move |_| {
                let mobile = is_mobile_viewport();
                if is_mobile.get_untracked() != mobile {
                    is_mobile.set(mobile);
                }
            });
            on_cleanup(move || handle.remove());
        }

        let cleanup_cancel = vm.cancel.clone();
        let cleanup_month = vm.month_loads.clone();
        let cleanup_year = vm.year_loads.clone();
        on_cleanup(move || {
            cleanup_cancel.cancel();
            cleanup_month.invalidate();
            cleanup_year.invalidate();
        });

        vm
    }

    fn approver_id(&self) -> Result<String, ApiError> {
        self.auth.with_untracked(AuthState::approver_id)
    }

    pub fn load_month(&self) {
        let approver_id = match self.approver_id() {
            Ok(id) => id,
            Err(err) => {
                self.loading.set(false);
                self.load_error.set(Some(err));
                return;
            }
        };
        let ticket = self.begin_month_load();
        let month = self.month.get_untracked();
        let vm = self.clone();
        spawn_local(async move {
            let result = load_month(vm.gateway.as_ref(), &approver_id, month).await;
            vm.apply_month(&ticket, result);
        });
    }

    pub(crate) fn begin_month_load(&self) -> LoadTicket {
        self.loading.set(true);
        self.month_loads.begin()
    }

    /// Applies a finished load unless a newer one started or the view is gone.
    pub(crate) fn apply_month(&self, ticket: &LoadTicket, result: Result<MonthData, ApiError>) -> bool {
        if !ticket.is_current() || self.cancel.is_cancelled() {
            log::debug!("discarding superseded month load");
            return false;
        }
        self.loading.set(false);
        match result {
            Ok(data) => {
                let ids: Vec<String> = data.snapshot.merged().into_iter().map(|l| l.id).collect();
                self.month_data.set(data);
                self.load_error.set(None);
                self.selection.update(|selection| selection.retain(&ids));
                let count = self.filtered.with_untracked(Vec::len);
                let size = self.page_size.get_untracked();
                self.view_state.update(|state| state.clamp_to(count, size));
            }
            Err(err) => self.load_error.set(Some(err)),
        }
        true
    }

    pub fn load_year(&self) {
        let Ok(approver_id) = self.approver_id() else {
            return;
        };
        let ticket = self.year_loads.begin();
        let year = self.year.get_untracked();
        let vm = self.clone();
        spawn_local(async move {
            let result = load_year(vm.gateway.as_ref(), &approver_id, year).await;
            vm.apply_year(&ticket, result);
        });
    }

    pub(crate) fn apply_year(
        &self,
        ticket: &LoadTicket,
        result: Result<YearlySnapshot, ApiError>,
    ) -> bool {
        if !ticket.is_current() || self.cancel.is_cancelled() {
            return false;
        }
        match result {
            Ok(snapshot) => {
                self.yearly.set(Some(snapshot));
                self.yearly_error.set(None);
            }
            Err(err) => self.yearly_error.set(Some(err)),
        }
        true
    }

    pub fn retry(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn apply_filter(&self, change: FilterChange) {
        self.view_state.update(|state| state.apply(change));
        self.drop_hidden_selection();
    }

    pub fn edit_range(&self, start: String, end: String) {
        self.view_state.update(|state| state.edit_range(start, end));
        self.drop_hidden_selection();
    }

    /// A batch only ever covers rows the current filter still shows.
    fn drop_hidden_selection(&self) {
        if self.selection.with_untracked(BatchSelection::is_empty) {
            return;
        }
        let ids: Vec<String> = self
            .filtered
            .with_untracked(|list| list.iter().map(|leave| leave.id.clone()).collect());
        self.selection.update(|selection| selection.retain(&ids));
    }

    pub fn go_to_page(&self, page: usize) {
        let count = self.filtered.with_untracked(Vec::len);
        let size = self.page_size.get_untracked();
        self.view_state.update(|state| state.go_to_page(page, count, size));
    }

    pub fn shift_month(&self, delta: i32) {
        let current = self.month.get_untracked();
        match current.shift(delta) {
            Some(next) => self.set_month(next),
            None => log::warn!("month out of range: {} shifted by {}", current, delta),
        }
    }

    pub fn go_to_current_month(&self) {
        self.set_month(YearMonth::from_date(self.today));
    }

    fn set_month(&self, next: YearMonth) {
        if self.month.get_untracked() == next {
            return;
        }
        self.month.set(next);
        self.view_state.update(|state| state.page = 1);
    }

    pub fn set_year(&self, year: i32) {
        self.year.set(year);
    }

    pub fn toggle_batch_mode(&self) {
        self.selection.update(BatchSelection::toggle_mode);
    }

    pub fn toggle_item(&self, id: &str) {
        self.selection.update(|selection| selection.toggle_item(id));
    }

    /// Actionable ids on the current page.
    pub fn visible_ids(&self) -> Vec<String> {
        self.page_items.with_untracked(|items| {
            items
                .iter()
                .filter(|leave| is_actionable(leave))
                .map(|leave| leave.id.clone())
                .collect()
        })
    }

    pub fn toggle_select_all(&self) {
        let visible = self.visible_ids();
        self.selection
            .update(|selection| selection.toggle_select_all(&visible));
    }

    pub fn approve_selected(&self) {
        let ids = self.selection.with_untracked(BatchSelection::selected_ids);
        self.dispatch(ids, Ok(Decision::Approve), true);
    }

    pub fn reject_selected(&self, message: &str) {
        let ids = self.selection.with_untracked(BatchSelection::selected_ids);
        self.dispatch(ids, Decision::reject(message), true);
    }

    pub fn approve(&self, id: &str) {
        self.dispatch(vec![id.to_string()], Ok(Decision::Approve), false);
    }

    pub fn reject(&self, id: &str, message: &str) {
        self.dispatch(vec![id.to_string()], Decision::reject(message), false);
    }

    /// Validates before any remote call; returns whether a call was issued.
    fn dispatch(&self, ids: Vec<String>, decision: Result<Decision, ApiError>, batch: bool) -> bool {
        if self.decision_action.pending().get_untracked() {
            return false;
        }
        let prepared = decision.and_then(|decision| {
            let approver_id = self.approver_id()?;
            if ids.is_empty() {
                return Err(ApiError::validation("선택된 휴가 신청이 없습니다."));
            }
            Ok((approver_id, decision))
        });
        match prepared {
            Ok((approver_id, decision)) => {
                self.message.update(MessageState::clear);
                let leaves = self.month_data.with_untracked(|data| data.snapshot.merged());
                self.decision_action.dispatch(DecisionPayload {
                    approver_id,
                    ids,
                    leaves,
                    decision,
                    batch,
                });
                true
            }
            Err(err) => {
                self.message.update(|message| message.set_error(err));
                false
            }
        }
    }

}

/// Reports a finished decision. Any success leaves batch mode and bumps
/// `reload`; a run with no success surfaces its first error.
fn settle_decision(
    result: &DecisionResult,
    selection: RwSignal<BatchSelection>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    let DecisionResult {
        decision,
        batch,
        outcome,
    } = result;
    if outcome.cancelled {
        return;
    }
    if outcome.should_refresh() {
        if *batch {
            selection.update(BatchSelection::finish);
        }
        let summary = if *batch {
            outcome.summary(decision)
        } else {
            format!("{}했습니다.", decision.verb())
        };
        message.update(|message| message.set_success(summary));
        reload.update(|value| *value = value.wrapping_add(1));
    } else {
        let err = outcome
            .failed
            .first()
            .map(|(_, err)| err.clone())
            .unwrap_or_else(|| ApiError::unknown("처리된 항목이 없습니다."));
        message.update(|message| message.set_error(err));
    }
}

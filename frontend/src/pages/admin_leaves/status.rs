use crate::api::{LeaveRequest, LeaveStatus};

/// Badge shown for a leave row. A cancel request that is still waiting is
/// rendered apart from a plain pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Waiting,
    CancelPending,
    Approved,
    Rejected,
    CancelRequested,
    Cancelled,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Waiting => "승인 대기",
            DisplayStatus::CancelPending => "취소 대기",
            DisplayStatus::Approved => "승인",
            DisplayStatus::Rejected => "반려",
            DisplayStatus::CancelRequested => "취소 요청",
            DisplayStatus::Cancelled => "취소",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            DisplayStatus::Waiting => {
                "bg-status-warning-bg text-status-warning-text border-status-warning-border"
            }
            DisplayStatus::CancelPending | DisplayStatus::CancelRequested => {
                "bg-status-info-bg text-status-info-text border-status-info-border"
            }
            DisplayStatus::Approved => {
                "bg-status-success-bg text-status-success-text border-status-success-border"
            }
            DisplayStatus::Rejected => {
                "bg-status-error-bg text-status-error-text border-status-error-border"
            }
            DisplayStatus::Cancelled => "bg-surface-muted text-fg-muted border-border",
        }
    }
}

pub fn status_label(status: LeaveStatus) -> &'static str {
    display_for(status, false).label()
}

pub fn display_status(leave: &LeaveRequest) -> DisplayStatus {
    display_for(leave.status, leave.is_cancel_request())
}

fn display_for(status: LeaveStatus, is_cancel: bool) -> DisplayStatus {
    match status {
        LeaveStatus::Requested if is_cancel => DisplayStatus::CancelPending,
        LeaveStatus::Requested => DisplayStatus::Waiting,
        LeaveStatus::Approved => DisplayStatus::Approved,
        LeaveStatus::Rejected => DisplayStatus::Rejected,
        LeaveStatus::CancelRequested => DisplayStatus::CancelRequested,
        LeaveStatus::Cancelled => DisplayStatus::Cancelled,
    }
}

/// Only rows still awaiting a decision offer approve/reject.
pub fn is_actionable(leave: &LeaveRequest) -> bool {
    leave.status.is_requested()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::leave;

    #[test]
    fn labels_match_status_table() {
        assert_eq!(status_label(LeaveStatus::Requested), "승인 대기");
        assert_eq!(status_label(LeaveStatus::Approved), "승인");
        assert_eq!(status_label(LeaveStatus::Rejected), "반려");
        assert_eq!(status_label(LeaveStatus::CancelRequested), "취소 요청");
        assert_eq!(status_label(LeaveStatus::Cancelled), "취소");
    }

    #[test]
    fn pending_cancel_request_gets_composite_badge() {
        let mut row = leave("1", "김철수", LeaveStatus::Requested);
        assert_eq!(display_status(&row), DisplayStatus::Waiting);
        row.is_cancel = 1;
        assert_eq!(display_status(&row), DisplayStatus::CancelPending);
        assert_eq!(display_status(&row).label(), "취소 대기");
        row.status = LeaveStatus::Approved;
        assert_eq!(display_status(&row), DisplayStatus::Approved);
    }

    #[test]
    fn only_requested_rows_are_actionable() {
        assert!(is_actionable(&leave("1", "a", LeaveStatus::Requested)));
        assert!(is_actionable(&leave("2", "b", LeaveStatus::CancelRequested)));
        assert!(!is_actionable(&leave("3", "c", LeaveStatus::Approved)));
        assert!(!is_actionable(&leave("4", "d", LeaveStatus::Cancelled)));
    }
}

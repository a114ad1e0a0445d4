use super::repository::AdminLeaveGateway;
use crate::api::{AdminApprovalRequest, ApiError, CancelApprovalRequest, LeaveRequest, LeaveStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject { message: String },
}

impl Decision {
    /// A rejection must carry a non-blank message.
    pub fn reject(message: &str) -> Result<Self, ApiError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::validation("반려 사유를 입력해 주세요."));
        }
        Ok(Decision::Reject {
            message: message.to_string(),
        })
    }

    pub fn is_approve(&self) -> bool {
        matches!(self, Decision::Approve)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Decision::Approve => "승인",
            Decision::Reject { .. } => "반려",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalRoute {
    Standard,
    Cancel,
}

impl ApprovalRoute {
    pub fn for_leave(leave: &LeaveRequest) -> Self {
        if leave.is_cancel_request() || leave.status == LeaveStatus::CancelRequested {
            ApprovalRoute::Cancel
        } else {
            ApprovalRoute::Standard
        }
    }
}

/// Sends one decision through the endpoint matching `route`.
pub async fn submit_decision(
    gateway: &dyn AdminLeaveGateway,
    approver_id: &str,
    leave_id: &str,
    route: ApprovalRoute,
    decision: &Decision,
) -> Result<(), ApiError> {
    if leave_id.trim().is_empty() {
        return Err(ApiError::validation("휴가 신청 ID를 확인할 수 없습니다."));
    }
    match route {
        ApprovalRoute::Standard => {
            gateway
                .process_admin_approval(AdminApprovalRequest {
                    id: leave_id.to_string(),
                    approver_id: approver_id.to_string(),
                    is_approved: decision.is_approve(),
                    reject_message: match decision {
                        Decision::Approve => None,
                        Decision::Reject { message } => Some(message.clone()),
                    },
                })
                .await
        }
        ApprovalRoute::Cancel => {
            gateway
                .process_cancel_approval(CancelApprovalRequest {
                    id: leave_id.to_string(),
                    approver_id: approver_id.to_string(),
                    is_approved: Some(decision.is_approve()),
                })
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::admin_leaves::repository::fake::{Call, FakeGateway};
    use crate::test_support::helpers::leave;
    use futures::executor::block_on;

    #[test]
    fn reject_requires_a_message() {
        assert!(Decision::reject("   ").unwrap_err().is_validation());
        assert_eq!(
            Decision::reject(" 인원 부족 ").unwrap(),
            Decision::Reject {
                message: "인원 부족".into()
            }
        );
    }

    #[test]
    fn cancel_requests_use_cancel_route() {
        let mut row = leave("1", "김철수", LeaveStatus::Requested);
        assert_eq!(ApprovalRoute::for_leave(&row), ApprovalRoute::Standard);
        row.is_cancel = 1;
        assert_eq!(ApprovalRoute::for_leave(&row), ApprovalRoute::Cancel);
        let row = leave("2", "이영희", LeaveStatus::CancelRequested);
        assert_eq!(ApprovalRoute::for_leave(&row), ApprovalRoute::Cancel);
    }

    #[test]
    fn standard_reject_carries_message() {
        let gateway = FakeGateway::default();
        let decision = Decision::reject("중복 신청").unwrap();
        block_on(submit_decision(
            &gateway,
            "emp-admin",
            "7",
            ApprovalRoute::Standard,
            &decision,
        ))
        .unwrap();
        assert_eq!(
            gateway.calls(),
            vec![Call::Approval(AdminApprovalRequest {
                id: "7".into(),
                approver_id: "emp-admin".into(),
                is_approved: false,
                reject_message: Some("중복 신청".into()),
            })]
        );
    }

    #[test]
    fn cancel_approval_sends_flag_only() {
        let gateway = FakeGateway::default();
        block_on(submit_decision(
            &gateway,
            "emp-admin",
            "8",
            ApprovalRoute::Cancel,
            &Decision::Approve,
        ))
        .unwrap();
        assert_eq!(
            gateway.calls(),
            vec![Call::CancelApproval(CancelApprovalRequest {
                id: "8".into(),
                approver_id: "emp-admin".into(),
                is_approved: Some(true),
            })]
        );
    }

    #[test]
    fn blank_id_is_rejected_before_any_call() {
        let gateway = FakeGateway::default();
        let err = block_on(submit_decision(
            &gateway,
            "emp-admin",
            " ",
            ApprovalRoute::Standard,
            &Decision::Approve,
        ))
        .unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.calls().is_empty());
    }
}

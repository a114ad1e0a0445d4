use std::rc::Rc;

use async_trait::async_trait;

use super::holidays::{holidays_from_items, Holiday};
use super::types::{AdminManagementSnapshot, MonthData, YearlySnapshot};
use crate::api::{
    AdminApprovalRequest, ApiClient, ApiError, CancelApprovalRequest, LeaveRequest,
};
use crate::utils::time::YearMonth;

/// Remote operations the admin leave page depends on.
#[async_trait(?Send)]
pub trait AdminLeaveGateway {
    async fn fetch_management_data(
        &self,
        approver_id: &str,
        month: YearMonth,
    ) -> Result<AdminManagementSnapshot, ApiError>;
    async fn fetch_yearly_leave(
        &self,
        approver_id: &str,
        year: i32,
    ) -> Result<YearlySnapshot, ApiError>;
    async fn fetch_dept_calendar(
        &self,
        approver_id: &str,
        month: YearMonth,
    ) -> Result<Vec<LeaveRequest>, ApiError>;
    async fn fetch_holidays(&self, month: YearMonth) -> Result<Vec<Holiday>, ApiError>;
    async fn process_admin_approval(&self, request: AdminApprovalRequest) -> Result<(), ApiError>;
    async fn process_cancel_approval(
        &self,
        request: CancelApprovalRequest,
    ) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct AdminLeaveRepository {
    client: Rc<ApiClient>,
}

impl Default for AdminLeaveRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminLeaveRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl AdminLeaveGateway for AdminLeaveRepository {
    async fn fetch_management_data(
        &self,
        approver_id: &str,
        month: YearMonth,
    ) -> Result<AdminManagementSnapshot, ApiError> {
        self.client
            .fetch_admin_management_data(approver_id, month)
            .await
            .map(AdminManagementSnapshot::from)
    }

    async fn fetch_yearly_leave(
        &self,
        approver_id: &str,
        year: i32,
    ) -> Result<YearlySnapshot, ApiError> {
        self.client
            .fetch_admin_yearly_leave(approver_id, year)
            .await
            .map(|response| YearlySnapshot::from_response(year, response))
    }

    async fn fetch_dept_calendar(
        &self,
        approver_id: &str,
        month: YearMonth,
    ) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client
            .fetch_admin_dept_calendar(approver_id, month)
            .await
            .map(|response| response.monthly_leaves)
    }

    async fn fetch_holidays(&self, month: YearMonth) -> Result<Vec<Holiday>, ApiError> {
        self.client
            .fetch_holidays(month)
            .await
            .map(|response| holidays_from_items(response.holidays))
    }

    async fn process_admin_approval(&self, request: AdminApprovalRequest) -> Result<(), ApiError> {
        self.client.process_admin_approval(&request).await
    }

    async fn process_cancel_approval(
        &self,
        request: CancelApprovalRequest,
    ) -> Result<(), ApiError> {
        self.client.process_cancel_approval(&request).await
    }
}

/// Loads the snapshot, department calendar and holidays for `month`.
/// Only the snapshot is required; the other two degrade to empty lists.
pub async fn load_month(
    gateway: &dyn AdminLeaveGateway,
    approver_id: &str,
    month: YearMonth,
) -> Result<MonthData, ApiError> {
    let snapshot = gateway
        .fetch_management_data(approver_id, month)
        .await
        .map_err(|err| {
            log::error!("admin leave snapshot for {} failed: {}", month, err);
            err
        })?;
    let calendar_leaves = gateway
        .fetch_dept_calendar(approver_id, month)
        .await
        .unwrap_or_else(|err| {
            log::warn!("department calendar for {} unavailable: {}", month, err);
            Vec::new()
        });
    let holidays = gateway.fetch_holidays(month).await.unwrap_or_else(|err| {
        log::warn!("holidays for {} unavailable: {}", month, err);
        Vec::new()
    });
    log::debug!(
        "loaded {}: {} waiting, {} monthly, {} holidays",
        month,
        snapshot.waiting.len(),
        snapshot.monthly.len(),
        holidays.len()
    );
    Ok(MonthData {
        snapshot,
        calendar_leaves,
        holidays,
    })
}

pub async fn load_year(
    gateway: &dyn AdminLeaveGateway,
    approver_id: &str,
    year: i32,
) -> Result<YearlySnapshot, ApiError> {
    gateway
        .fetch_yearly_leave(approver_id, year)
        .await
        .map_err(|err| {
            log::error!("yearly leave for {} failed: {}", year, err);
            err
        })
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::api::LeaveStatus;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashSet};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Approval(AdminApprovalRequest),
        CancelApproval(CancelApprovalRequest),
    }

    /// In-memory gateway recording every decision call.
    #[derive(Default)]
    pub struct FakeGateway {
        pub snapshot: AdminManagementSnapshot,
        pub calendar: Vec<LeaveRequest>,
        pub holidays: Vec<Holiday>,
        pub yearly: Vec<LeaveRequest>,
        pub fail_snapshot: bool,
        pub fail_calendar: bool,
        pub fail_ids: HashSet<String>,
        pub calls: RefCell<Vec<Call>>,
        pub requested_months: RefCell<Vec<YearMonth>>,
    }

    impl FakeGateway {
        pub fn with_waiting(waiting: Vec<LeaveRequest>) -> Self {
            let mut counts = BTreeMap::new();
            counts.insert(LeaveStatus::Requested, waiting.len() as u32);
            Self {
                snapshot: AdminManagementSnapshot {
                    status_counts: counts,
                    waiting,
                    monthly: Vec::new(),
                },
                ..Self::default()
            }
        }

        pub fn failing_on(mut self, id: &str) -> Self {
            self.fail_ids.insert(id.to_string());
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, id: &str, call: Call) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            if self.fail_ids.contains(id) {
                Err(ApiError::request_failed(format!("{} 처리 실패", id)))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl AdminLeaveGateway for FakeGateway {
        async fn fetch_management_data(
            &self,
            _approver_id: &str,
            month: YearMonth,
        ) -> Result<AdminManagementSnapshot, ApiError> {
            self.requested_months.borrow_mut().push(month);
            if self.fail_snapshot {
                Err(ApiError::request_failed("서버에 연결할 수 없습니다."))
            } else {
                Ok(self.snapshot.clone())
            }
        }

        async fn fetch_yearly_leave(
            &self,
            _approver_id: &str,
            year: i32,
        ) -> Result<YearlySnapshot, ApiError> {
            Ok(YearlySnapshot {
                year,
                status_counts: BTreeMap::new(),
                details: self.yearly.clone(),
            })
        }

        async fn fetch_dept_calendar(
            &self,
            _approver_id: &str,
            _month: YearMonth,
        ) -> Result<Vec<LeaveRequest>, ApiError> {
            if self.fail_calendar {
                Err(ApiError::request_failed("calendar down"))
            } else {
                Ok(self.calendar.clone())
            }
        }

        async fn fetch_holidays(&self, _month: YearMonth) -> Result<Vec<Holiday>, ApiError> {
            Ok(self.holidays.clone())
        }

        async fn process_admin_approval(
            &self,
            request: AdminApprovalRequest,
        ) -> Result<(), ApiError> {
            let id = request.id.clone();
            self.record(&id, Call::Approval(request))
        }

        async fn process_cancel_approval(
            &self,
            request: CancelApprovalRequest,
        ) -> Result<(), ApiError> {
            let id = request.id.clone();
            self.record(&id, Call::CancelApproval(request))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeGateway;
    use super::*;
    use crate::api::LeaveStatus;
    use crate::test_support::helpers::{date, leave};
    use futures::executor::block_on;

    fn january() -> YearMonth {
        YearMonth::new(2025, 1).unwrap()
    }

    #[test]
    fn load_month_collects_all_sources() {
        let mut gateway = FakeGateway::with_waiting(vec![leave("1", "김철수", LeaveStatus::Requested)]);
        gateway.calendar = vec![leave("9", "이영희", LeaveStatus::Approved)];
        gateway.holidays = vec![Holiday {
            date: date(2025, 1, 1),
            name: "신정".into(),
        }];
        let data = block_on(load_month(&gateway, "emp-admin", january())).unwrap();
        assert_eq!(data.snapshot.waiting.len(), 1);
        assert_eq!(data.calendar_leaves.len(), 1);
        assert_eq!(data.holidays[0].name, "신정");
        assert_eq!(*gateway.requested_months.borrow(), vec![january()]);
    }

    #[test]
    fn calendar_failure_degrades_to_empty_list() {
        let mut gateway = FakeGateway::with_waiting(vec![leave("1", "김철수", LeaveStatus::Requested)]);
        gateway.fail_calendar = true;
        let data = block_on(load_month(&gateway, "emp-admin", january())).unwrap();
        assert!(data.calendar_leaves.is_empty());
        assert_eq!(data.snapshot.waiting.len(), 1);
    }

    #[test]
    fn snapshot_failure_is_reported() {
        let gateway = FakeGateway {
            fail_snapshot: true,
            ..FakeGateway::default()
        };
        let err = block_on(load_month(&gateway, "emp-admin", january())).unwrap_err();
        assert_eq!(err.code, "REQUEST_FAILED");
    }

    #[test]
    fn load_year_tags_snapshot_with_year() {
        let gateway = FakeGateway {
            yearly: vec![leave("1", "김철수", LeaveStatus::Approved)],
            ..FakeGateway::default()
        };
        let yearly = block_on(load_year(&gateway, "emp-admin", 2025)).unwrap();
        assert_eq!(yearly.year, 2025);
        assert_eq!(yearly.details.len(), 1);
    }
}

use super::{
    client::ApiClient,
    types::{
        AdminApprovalRequest, AdminManagementResponse, AdminYearlyLeaveResponse, ApiError,
        CancelApprovalRequest, DeptCalendarResponse, HolidayListResponse,
    },
};
use crate::utils::time::YearMonth;

fn approver_month_params(approver_id: &str, month: YearMonth) -> Vec<(&'static str, String)> {
    vec![
        ("approverId", approver_id.to_string()),
        ("month", month.to_string()),
    ]
}

fn approver_year_params(approver_id: &str, year: i32) -> Vec<(&'static str, String)> {
    vec![
        ("approverId", approver_id.to_string()),
        ("year", year.to_string()),
    ]
}

fn holiday_params(month: YearMonth) -> Vec<(&'static str, String)> {
    vec![
        ("year", month.year().to_string()),
        ("month", format!("{:02}", month.month())),
    ]
}

impl ApiClient {
    pub async fn fetch_admin_management_data(
        &self,
        approver_id: &str,
        month: YearMonth,
    ) -> Result<AdminManagementResponse, ApiError> {
        self.get_json(
            "/leave/admin/management",
            &approver_month_params(approver_id, month),
        )
        .await
    }

    pub async fn fetch_admin_yearly_leave(
        &self,
        approver_id: &str,
        year: i32,
    ) -> Result<AdminYearlyLeaveResponse, ApiError> {
        self.get_json(
            "/leave/admin/yearly",
            &approver_year_params(approver_id, year),
        )
        .await
    }

    pub async fn fetch_admin_dept_calendar(
        &self,
        approver_id: &str,
        month: YearMonth,
    ) -> Result<DeptCalendarResponse, ApiError> {
        self.get_json(
            "/leave/admin/dept-calendar",
            &approver_month_params(approver_id, month),
        )
        .await
    }

    pub async fn fetch_holidays(&self, month: YearMonth) -> Result<HolidayListResponse, ApiError> {
        self.get_json("/holidays", &holiday_params(month)).await
    }

    pub async fn process_admin_approval(
        &self,
        request: &AdminApprovalRequest,
    ) -> Result<(), ApiError> {
        self.put_json("/leave/admin/approval", request).await
    }

    pub async fn process_cancel_approval(
        &self,
        request: &CancelApprovalRequest,
    ) -> Result<(), ApiError> {
        self.put_json("/leave/admin/cancel-approval", request).await
    }
}

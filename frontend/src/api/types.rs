use chrono::NaiveDate;
use leptos::{IntoView, View};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    #[serde(alias = "requested")]
    Requested,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "rejected")]
    Rejected,
    #[serde(alias = "cancel_requested")]
    CancelRequested,
    #[serde(alias = "cancelled")]
    Cancelled,
}

impl LeaveStatus {
    pub const ALL: [LeaveStatus; 5] = [
        LeaveStatus::Requested,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
        LeaveStatus::CancelRequested,
        LeaveStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Requested => "REQUESTED",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::CancelRequested => "CANCEL_REQUESTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }

    /// True for every status whose wire name contains `REQUESTED`.
    pub fn is_requested(&self) -> bool {
        self.as_str().contains("REQUESTED")
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_ascii_uppercase();
        LeaveStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| format!("unknown leave status: {}", value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job_position: String,
    pub leave_type: String,
    #[serde(with = "flexible_date")]
    pub start_date: NaiveDate,
    #[serde(with = "flexible_date")]
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    #[serde(default)]
    pub is_cancel: u8,
    #[serde(default)]
    pub workdays_count: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(with = "flexible_date")]
    pub requested_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_message: Option<String>,
}

impl LeaveRequest {
    pub fn is_cancel_request(&self) -> bool {
        self.is_cancel == 1
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStatusCount {
    pub status: LeaveStatus,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminManagementResponse {
    #[serde(default)]
    pub approval_status: Vec<ApprovalStatusCount>,
    #[serde(default)]
    pub waiting_leaves: Vec<LeaveRequest>,
    #[serde(default)]
    pub monthly_leaves: Vec<LeaveRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminYearlyLeaveResponse {
    #[serde(default)]
    pub approval_status: Vec<ApprovalStatusCount>,
    #[serde(default)]
    pub yearly_details: Vec<LeaveRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeptCalendarResponse {
    #[serde(rename = "monthlyLeaves", default)]
    pub monthly_leaves: Vec<LeaveRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayItem {
    #[serde(rename = "dateName")]
    pub date_name: String,
    #[serde(rename = "locDate", with = "flexible_date")]
    pub loc_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayListResponse {
    #[serde(default)]
    pub holidays: Vec<HolidayItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminApprovalRequest {
    pub id: String,
    pub approver_id: String,
    pub is_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelApprovalRequest {
    pub id: String,
    pub approver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "USER_INFO_MISSING")
    }

    pub fn is_validation(&self) -> bool {
        self.code == "VALIDATION_ERROR"
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Integer(value) => value.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Accepts `YYYY-MM-DD`, an ISO timestamp starting with a date, or `YYYYMMDD`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }
    if trimmed.len() == 8 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok();
    }
    None
}

mod flexible_date {
    use super::{parse_flexible_date, StringOrNumber};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = StringOrNumber::deserialize(deserializer)?.into_string();
        parse_flexible_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }
}

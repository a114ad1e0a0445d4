use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::types::AdminManagementSnapshot;
use crate::api::{ApiError, LeaveRequest, LeaveStatus};

const ALL_SENTINELS: [&str; 2] = ["전체", "all"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveTab {
    #[default]
    Pending,
    All,
}

impl LeaveTab {
    pub fn label(&self) -> &'static str {
        match self {
            LeaveTab::Pending => "승인 대기",
            LeaveTab::All => "전체 내역",
        }
    }
}

/// Inclusive range over `requestedDate`; an open end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ApiError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ApiError::validation(
                    "시작일은 종료일보다 늦을 수 없습니다.",
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// Parses the raw `<input type="date">` values; blanks leave that end open.
    pub fn parse(start: &str, end: &str) -> Result<Self, ApiError> {
        fn field(raw: &str) -> Result<Option<NaiveDate>, ApiError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ApiError::validation("날짜 형식이 올바르지 않습니다."))
        }
        Self::new(field(start)?, field(end)?)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub tab: LeaveTab,
    pub status: Option<LeaveStatus>,
    pub department: String,
    pub position: String,
    pub leave_types: BTreeSet<String>,
    pub date_range: DateRange,
    pub name_search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::for_tab(LeaveTab::default())
    }
}

impl FilterState {
    /// Defaults applied whenever a tab is chosen.
    pub fn for_tab(tab: LeaveTab) -> Self {
        Self {
            tab,
            status: match tab {
                LeaveTab::Pending => Some(LeaveStatus::Requested),
                LeaveTab::All => None,
            },
            department: String::new(),
            position: String::new(),
            leave_types: BTreeSet::new(),
            date_range: DateRange::default(),
            name_search: String::new(),
        }
    }

    pub fn has_attribute_filters(&self) -> bool {
        is_active(&self.department)
            || is_active(&self.position)
            || !self.leave_types.is_empty()
            || !self.date_range.is_open()
            || !self.name_search.trim().is_empty()
    }
}

fn is_active(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !ALL_SENTINELS.iter().any(|s| value.eq_ignore_ascii_case(s))
}

fn matches_text(filter: &str, value: &str) -> bool {
    !is_active(filter) || filter.trim() == value
}

fn matches_status(filter: Option<LeaveStatus>, status: LeaveStatus) -> bool {
    match filter {
        None => true,
        Some(LeaveStatus::Requested) => status.is_requested(),
        Some(expected) => expected == status,
    }
}

fn matches_name(needle: &str, name: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(filter: &FilterState, leave: &LeaveRequest) -> bool {
    matches_status(filter.status, leave.status)
        && matches_text(&filter.department, &leave.department)
        && matches_text(&filter.position, &leave.job_position)
        && (filter.leave_types.is_empty() || filter.leave_types.contains(&leave.leave_type))
        && filter.date_range.contains(leave.requested_date)
        && matches_name(&filter.name_search, &leave.name)
}

/// Source selection, tab narrowing, status filter, then attribute filters.
pub fn filter_leaves(snapshot: &AdminManagementSnapshot, filter: &FilterState) -> Vec<LeaveRequest> {
    let source = match filter.tab {
        LeaveTab::All => snapshot.merged(),
        LeaveTab::Pending => snapshot.waiting.clone(),
    };
    source
        .into_iter()
        .filter(|leave| filter.tab == LeaveTab::All || leave.status.is_requested())
        .filter(|leave| matches(filter, leave))
        .collect()
}

/// Distinct values offered by the filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub departments: Vec<String>,
    pub positions: Vec<String>,
    pub leave_types: Vec<String>,
}

pub fn filter_options(snapshot: &AdminManagementSnapshot) -> FilterOptions {
    let mut departments = BTreeSet::new();
    let mut positions = BTreeSet::new();
    let mut leave_types = BTreeSet::new();
    for leave in snapshot.waiting.iter().chain(snapshot.monthly.iter()) {
        for (set, value) in [
            (&mut departments, &leave.department),
            (&mut positions, &leave.job_position),
            (&mut leave_types, &leave.leave_type),
        ] {
            if !value.trim().is_empty() {
                set.insert(value.clone());
            }
        }
    }
    FilterOptions {
        departments: departments.into_iter().collect(),
        positions: positions.into_iter().collect(),
        leave_types: leave_types.into_iter().collect(),
    }
}

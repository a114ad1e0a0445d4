use std::collections::{BTreeMap, HashSet};

use crate::api::{
    AdminManagementResponse, AdminYearlyLeaveResponse, ApprovalStatusCount, LeaveRequest,
    LeaveStatus,
};

use super::holidays::Holiday;

fn count_map(counts: Vec<ApprovalStatusCount>) -> BTreeMap<LeaveStatus, u32> {
    let mut map = BTreeMap::new();
    for entry in counts {
        *map.entry(entry.status).or_insert(0) += entry.count;
    }
    map
}

/// Server data for one approver and month: status card counts plus the
/// waiting and monthly leave lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminManagementSnapshot {
    pub status_counts: BTreeMap<LeaveStatus, u32>,
    pub waiting: Vec<LeaveRequest>,
    pub monthly: Vec<LeaveRequest>,
}

impl AdminManagementSnapshot {
    pub fn count(&self, status: LeaveStatus) -> u32 {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    /// Waiting entries first, then monthly entries whose id was not seen yet.
    pub fn merged(&self) -> Vec<LeaveRequest> {
        let mut seen = HashSet::new();
        self.waiting
            .iter()
            .chain(self.monthly.iter())
            .filter(|leave| seen.insert(leave.id.as_str()))
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&LeaveRequest> {
        self.waiting
            .iter()
            .chain(self.monthly.iter())
            .find(|leave| leave.id == id)
    }
}

impl From<AdminManagementResponse> for AdminManagementSnapshot {
    fn from(response: AdminManagementResponse) -> Self {
        Self {
            status_counts: count_map(response.approval_status),
            waiting: response.waiting_leaves,
            monthly: response.monthly_leaves,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlySnapshot {
    pub year: i32,
    pub status_counts: BTreeMap<LeaveStatus, u32>,
    pub details: Vec<LeaveRequest>,
}

impl YearlySnapshot {
    pub fn from_response(year: i32, response: AdminYearlyLeaveResponse) -> Self {
        Self {
            year,
            status_counts: count_map(response.approval_status),
            details: response.yearly_details,
        }
    }
}

/// Everything the page shows for the selected month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthData {
    pub snapshot: AdminManagementSnapshot,
    pub calendar_leaves: Vec<LeaveRequest>,
    pub holidays: Vec<Holiday>,
}

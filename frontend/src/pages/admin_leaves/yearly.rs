use std::collections::BTreeMap;

use chrono::Datelike;

use super::types::YearlySnapshot;
use crate::api::{LeaveRequest, LeaveStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: u32,
    pub counts: BTreeMap<LeaveStatus, u32>,
    pub workdays: f64,
}

impl MonthRow {
    pub fn count(&self, status: LeaveStatus) -> u32 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Twelve rows, one per month of `year`, bucketed by start date. Leaves
/// starting in another year are ignored.
pub fn monthly_summary(year: i32, details: &[LeaveRequest]) -> Vec<MonthRow> {
    let mut rows: Vec<MonthRow> = (1..=12)
        .map(|month| MonthRow {
            month,
            counts: BTreeMap::new(),
            workdays: 0.0,
        })
        .collect();
    for leave in details.iter().filter(|l| l.start_date.year() == year) {
        let row = &mut rows[leave.start_date.month0() as usize];
        *row.counts.entry(leave.status).or_insert(0) += 1;
        if leave.status == LeaveStatus::Approved {
            row.workdays += leave.workdays_count;
        }
    }
    rows
}

impl YearlySnapshot {
    pub fn summary(&self) -> Vec<MonthRow> {
        monthly_summary(self.year, &self.details)
    }

    pub fn approved_workdays(&self) -> f64 {
        self.summary().iter().map(|row| row.workdays).sum()
    }
}

use chrono::{Datelike, Duration, NaiveDate};

use super::holidays::{holiday_name, is_weekend, Holiday};
use crate::api::{LeaveRequest, LeaveStatus};
use crate::utils::time::YearMonth;

pub const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

pub type Week = [NaiveDate; 7];

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    pub holiday_name: Option<String>,
    pub leaves: Vec<LeaveRequest>,
}

impl CalendarDay {
    pub fn is_off_day(&self) -> bool {
        self.is_weekend || self.holiday_name.is_some()
    }
}

/// Sunday-first weeks covering every day of `month`, padded with days of the
/// neighbouring months so each row has exactly seven days.
pub fn calendar_weeks(month: YearMonth) -> Vec<Week> {
    let first = month.first_day();
    let last = month.last_day();
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let mut cursor = first - Duration::days(lead);
    let mut weeks = Vec::with_capacity(6);
    while cursor <= last {
        let start = cursor;
        let mut week = [start; 7];
        for (offset, slot) in week.iter_mut().enumerate() {
            *slot = start + Duration::days(offset as i64);
        }
        weeks.push(week);
        cursor = start + Duration::days(7);
    }
    weeks
}

fn shows_on_calendar(leave: &LeaveRequest) -> bool {
    !matches!(leave.status, LeaveStatus::Rejected | LeaveStatus::Cancelled)
}

pub fn leaves_on(date: NaiveDate, leaves: &[LeaveRequest]) -> Vec<LeaveRequest> {
    leaves
        .iter()
        .filter(|leave| shows_on_calendar(leave) && leave.covers(date))
        .cloned()
        .collect()
}

pub fn build_calendar(
    month: YearMonth,
    today: NaiveDate,
    leaves: &[LeaveRequest],
    holidays: &[Holiday],
) -> Vec<Vec<CalendarDay>> {
    calendar_weeks(month)
        .into_iter()
        .map(|week| {
            week.iter()
                .map(|date| CalendarDay {
                    date: *date,
                    is_current_month: YearMonth::from_date(*date) == month,
                    is_today: *date == today,
                    is_weekend: is_weekend(date),
                    holiday_name: holiday_name(date, holidays).map(str::to_string),
                    leaves: leaves_on(*date, leaves),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{date, leave};

    fn month(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn weeks_are_contiguous_and_cover_the_month() {
        for (y, m) in [(2025, 1), (2025, 2), (2026, 2), (2024, 2), (2025, 6), (2025, 11)] {
            let target = month(y, m);
            let weeks = calendar_weeks(target);
            assert!((4..=6).contains(&weeks.len()), "{}", target);
            let days: Vec<NaiveDate> = weeks.iter().flatten().copied().collect();
            assert_eq!(days[0].weekday().num_days_from_sunday(), 0);
            for pair in days.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            let in_month = days
                .iter()
                .filter(|d| YearMonth::from_date(**d) == target)
                .count() as u32;
            assert_eq!(in_month, target.days_in_month());
            assert!(days.contains(&target.first_day()));
            assert!(days.contains(&target.last_day()));
        }
    }

    #[test]
    fn february_starting_on_sunday_fits_four_rows() {
        let weeks = calendar_weeks(month(2026, 2));
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0], date(2026, 2, 1));
        assert_eq!(weeks[3][6], date(2026, 2, 28));
    }

    #[test]
    fn january_2025_pads_with_december() {
        let weeks = calendar_weeks(month(2025, 1));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], date(2024, 12, 29));
        assert_eq!(weeks[0][3], date(2025, 1, 1));
        assert_eq!(weeks[4][6], date(2025, 2, 1));
    }

    #[test]
    fn build_calendar_marks_today_holidays_and_leaves() {
        let holidays = vec![Holiday {
            date: date(2025, 1, 1),
            name: "신정".into(),
        }];
        let approved = leave("1", "김철수", LeaveStatus::Approved);
        let rejected = leave("2", "이영희", LeaveStatus::Rejected);
        let grid = build_calendar(
            month(2025, 1),
            date(2025, 1, 6),
            &[approved, rejected],
            &holidays,
        );
        let days: Vec<&CalendarDay> = grid.iter().flatten().collect();
        let new_year = days.iter().find(|d| d.date == date(2025, 1, 1)).unwrap();
        assert_eq!(new_year.holiday_name.as_deref(), Some("신정"));
        assert!(new_year.is_off_day());

        let monday = days.iter().find(|d| d.date == date(2025, 1, 6)).unwrap();
        assert!(monday.is_today);
        assert_eq!(monday.leaves.len(), 1);
        assert_eq!(monday.leaves[0].name, "김철수");

        let padding = days.iter().find(|d| d.date == date(2024, 12, 31)).unwrap();
        assert!(!padding.is_current_month);
        assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
    }
}

use chrono::{Datelike, NaiveDate};

use crate::api::HolidayItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

impl From<HolidayItem> for Holiday {
    fn from(item: HolidayItem) -> Self {
        Self {
            date: item.loc_date,
            name: item.date_name,
        }
    }
}

pub fn holidays_from_items(items: Vec<HolidayItem>) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = items.into_iter().map(Holiday::from).collect();
    holidays.sort_by(|a, b| a.date.cmp(&b.date));
    holidays
}

/// Name of the public holiday on `date`, compared by calendar day only.
/// Accepts any `Datelike` so timestamps resolve the same as plain dates.
pub fn holiday_name<'a, D: Datelike>(date: &D, holidays: &'a [Holiday]) -> Option<&'a str> {
    holidays
        .iter()
        .find(|holiday| {
            holiday.date.year() == date.year()
                && holiday.date.month() == date.month()
                && holiday.date.day() == date.day()
        })
        .map(|holiday| holiday.name.as_str())
}

pub fn is_weekend<D: Datelike>(date: &D) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::date;

    fn new_year() -> Vec<Holiday> {
        holidays_from_items(vec![
            HolidayItem {
                date_name: "설날".into(),
                loc_date: date(2025, 1, 29),
            },
            HolidayItem {
                date_name: "신정".into(),
                loc_date: date(2025, 1, 1),
            },
        ])
    }

    #[test]
    fn resolves_name_ignoring_time_of_day() {
        let holidays = new_year();
        let morning = date(2025, 1, 1).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(holiday_name(&morning, &holidays), Some("신정"));
        assert_eq!(holiday_name(&date(2025, 1, 29), &holidays), Some("설날"));
        assert_eq!(holiday_name(&date(2025, 1, 2), &holidays), None);
        assert_eq!(holiday_name(&date(2024, 1, 1), &holidays), None);
    }

    #[test]
    fn holidays_are_sorted_by_date() {
        let holidays = new_year();
        assert_eq!(holidays[0].name, "신정");
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(&date(2025, 1, 4)));
        assert!(is_weekend(&date(2025, 1, 5)));
        assert!(!is_weekend(&date(2025, 1, 6)));
    }
}

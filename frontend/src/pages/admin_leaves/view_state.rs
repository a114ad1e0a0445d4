use super::filter::{DateRange, FilterState, LeaveTab};
use super::pager::clamp_page;
use crate::api::{ApiError, LeaveStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    SelectTab(LeaveTab),
    StatusCard(Option<LeaveStatus>),
    Department(String),
    Position(String),
    ToggleLeaveType(String),
    ClearLeaveTypes,
    DateRange(DateRange),
    NameSearch(String),
    ResetFilters,
}

/// Raw text of the date inputs. Kept apart from `FilterState::date_range`
/// because an invalid pair never reaches the filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeDraft {
    pub start: String,
    pub end: String,
    pub error: Option<ApiError>,
}

/// Filter and page state of the leave list. Every filter change returns to
/// page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveViewState {
    pub filter: FilterState,
    pub page: usize,
    pub range_draft: RangeDraft,
}

impl Default for LeaveViewState {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            page: 1,
            range_draft: RangeDraft::default(),
        }
    }
}

impl LeaveViewState {
    pub fn apply(&mut self, change: FilterChange) {
        if matches!(change, FilterChange::SelectTab(_) | FilterChange::ResetFilters) {
            self.range_draft = RangeDraft::default();
        }
        let filter = &mut self.filter;
        match change {
            FilterChange::SelectTab(tab) => *filter = FilterState::for_tab(tab),
            FilterChange::StatusCard(status) => filter.status = status,
            FilterChange::Department(value) => filter.department = value,
            FilterChange::Position(value) => filter.position = value,
            FilterChange::ToggleLeaveType(value) => {
                if !filter.leave_types.remove(&value) {
                    filter.leave_types.insert(value);
                }
            }
            FilterChange::ClearLeaveTypes => filter.leave_types.clear(),
            FilterChange::DateRange(range) => filter.date_range = range,
            FilterChange::NameSearch(value) => filter.name_search = value,
            FilterChange::ResetFilters => *filter = FilterState::for_tab(filter.tab),
        }
        self.page = 1;
    }

    /// Stores the typed dates; the filter only changes when they form a valid range.
    pub fn edit_range(&mut self, start: String, end: String) {
        match DateRange::parse(&start, &end) {
            Ok(range) => {
                self.range_draft = RangeDraft { start, end, error: None };
                self.apply(FilterChange::DateRange(range));
            }
            Err(err) => self.range_draft = RangeDraft { start, end, error: Some(err) },
        }
    }

    pub fn go_to_page(&mut self, page: usize, item_count: usize, page_size: usize) {
        self.page = clamp_page(page, item_count, page_size);
    }

    /// Pulls the page back in range after the list shrank.
    pub fn clamp_to(&mut self, item_count: usize, page_size: usize) {
        self.page = clamp_page(self.page, item_count, page_size);
    }
}

pub mod calendar_view;
pub mod filter_bar;
pub mod leave_list;
pub mod reject_dialog;
pub mod status_cards;
pub mod yearly_table;

use leptos::*;

pub mod actions;
pub mod batch;
pub mod calendar;
pub mod components;
pub mod filter;
pub mod holidays;
pub mod pager;
pub mod panel;
pub mod repository;
pub mod status;
pub mod types;
pub mod view_model;
pub mod view_state;
pub mod yearly;

pub use panel::AdminLeavesPanel;

#[component]
pub fn AdminLeavesPage() -> impl IntoView {
    view! { <AdminLeavesPanel /> }
}

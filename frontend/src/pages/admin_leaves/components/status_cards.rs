use leptos::*;

use crate::api::LeaveStatus;
use crate::pages::admin_leaves::{
    status::status_label, view_model::AdminLeavesViewModel, view_state::FilterChange,
};

#[component]
pub fn StatusCards(vm: AdminLeavesViewModel) -> impl IntoView {
    let month_data = vm.month_data;
    let view_state = vm.view_state;

    LeaveStatus::ALL
        .into_iter()
        .map(|status| {
            let vm = vm.clone();
            let count = move || month_data.with(|data| data.snapshot.count(status));
            let is_active = move || view_state.with(|state| state.filter.status == Some(status));
            view! {
                <button
                    type="button"
                    class="flex flex-col items-start rounded-lg border px-4 py-3 text-left bg-surface-elevated hover:bg-action-ghost-bg-hover"
                    class=("border-action-primary-bg", is_active)
                    class=("border-border", move || !is_active())
                    aria-pressed=move || is_active().to_string()
                    on:click=move |_| vm.apply_filter(FilterChange::StatusCard(Some(status)))
                >
                    <span class="text-sm text-fg-muted">{status_label(status)}</span>
                    <span class="text-2xl font-semibold text-fg">{count}</span>
                </button>
            }
        })
        .collect_view()
}

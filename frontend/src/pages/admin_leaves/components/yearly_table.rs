use leptos::*;

use crate::api::LeaveStatus;
use crate::components::{error::InlineErrorMessage, layout::LoadingSpinner};
use crate::pages::admin_leaves::{status::status_label, view_model::AdminLeavesViewModel};

#[component]
pub fn YearlySummary(vm: AdminLeavesViewModel) -> impl IntoView {
    let year = vm.year;
    let yearly = vm.yearly;
    let error = vm.yearly_error;

    let on_prev = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.set_year(year.get_untracked() - 1)
    };
    let on_next = move |_: ev::MouseEvent| vm.set_year(year.get_untracked() + 1);

    let table = move || {
        yearly.get().map(|snapshot| {
            let rows = snapshot.summary();
            view! {
                <table class="min-w-full text-sm">
                    <thead>
                        <tr class="text-left text-fg-muted border-b border-border">
                            <th class="px-2 py-1">{"월"}</th>
                            {LeaveStatus::ALL
                                .iter()
                                .map(|status| view! { <th class="px-2 py-1">{status_label(*status)}</th> })
                                .collect_view()}
                            <th class="px-2 py-1">{"합계"}</th>
                            <th class="px-2 py-1">{"승인 일수"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|row| view! {
                                <tr class="border-b border-border">
                                    <td class="px-2 py-1">{format!("{}월", row.month)}</td>
                                    {LeaveStatus::ALL
                                        .iter()
                                        .map(|status| view! { <td class="px-2 py-1">{row.count(*status)}</td> })
                                        .collect_view()}
                                    <td class="px-2 py-1 font-semibold">{row.total()}</td>
                                    <td class="px-2 py-1">{row.workdays}</td>
                                </tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
        })
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div class="flex items-center gap-2">
                <button type="button" class="px-2 py-1 rounded border border-border" aria-label="이전 연도" on:click=on_prev>
                    {"‹"}
                </button>
                <h3 class="text-lg font-medium text-fg">{move || format!("{}년 휴가 현황", year.get())}</h3>
                <button type="button" class="px-2 py-1 rounded border border-border" aria-label="다음 연도" on:click=on_next>
                    {"›"}
                </button>
            </div>
            <InlineErrorMessage error=error.into() />
            <Show when=move || yearly.with(Option::is_some) fallback=|| view! { <LoadingSpinner /> }>
                <div class="overflow-x-auto">{table}</div>
            </Show>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::admin_leaves::repository::fake::FakeGateway;
    use crate::pages::admin_leaves::types::YearlySnapshot;
    use crate::test_support::helpers::{approver, date, leave, provide_auth};
    use crate::test_support::ssr::render_to_string;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[test]
    fn renders_twelve_month_rows() {
        let html = render_to_string(|| {
            provide_auth(Some(approver()));
            let vm = AdminLeavesViewModel::new(Rc::new(FakeGateway::default()), date(2025, 1, 15));
            vm.yearly.set(Some(YearlySnapshot {
                year: 2025,
                status_counts: BTreeMap::new(),
                details: vec![leave("1", "김철수", LeaveStatus::Approved)],
            }));
            view! { <YearlySummary vm=vm /> }
        });
        assert!(html.contains("2025년 휴가 현황"));
        assert!(html.contains("1월"));
        assert!(html.contains("12월"));
        assert!(html.contains("승인 일수"));
    }

    #[test]
    fn shows_spinner_until_loaded() {
        let html = render_to_string(|| {
            provide_auth(Some(approver()));
            let vm = AdminLeavesViewModel::new(Rc::new(FakeGateway::default()), date(2025, 1, 15));
            view! { <YearlySummary vm=vm /> }
        });
        assert!(html.contains("animate-spin"));
    }
}

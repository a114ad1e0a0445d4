use leptos::*;

use super::reject_dialog::RejectDialog;
use crate::api::LeaveRequest;
use crate::components::{confirm_dialog::ConfirmDialog, empty_state::EmptyState};
use crate::pages::admin_leaves::{
    pager::page_bounds,
    status::{display_status, is_actionable},
    view_model::AdminLeavesViewModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum RejectTarget {
    Single(String),
    Selected,
}

fn format_period(leave: &LeaveRequest) -> String {
    if leave.start_date == leave.end_date {
        leave.start_date.format("%Y-%m-%d").to_string()
    } else {
        format!(
            "{} ~ {}",
            leave.start_date.format("%Y-%m-%d"),
            leave.end_date.format("%Y-%m-%d")
        )
    }
}

fn format_workdays(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}일", days as i64)
    } else {
        format!("{:.1}일", days)
    }
}

#[component]
fn LeaveRow(
    vm: AdminLeavesViewModel,
    leave: LeaveRequest,
    open_reject: Callback<RejectTarget>,
) -> impl IntoView {
    let selection = vm.selection;
    let pending = vm.decision_action.pending();
    let status = display_status(&leave);
    let actionable = is_actionable(&leave);
    let id = leave.id.clone();

    let checkbox = {
        let vm = vm.clone();
        let id = id.clone();
        move || {
            let checked_id = id.clone();
            let toggle_id = id.clone();
            let vm = vm.clone();
            (selection.with(|s| s.is_active()) && actionable).then(|| {
                view! {
                    <input
                        type="checkbox"
                        aria-label="선택"
                        prop:checked=move || selection.with(|s| s.is_selected(&checked_id))
                        on:change=move |_| vm.toggle_item(&toggle_id)
                    />
                }
            })
        }
    };

    let actions = move || {
        let approve_vm = vm.clone();
        let approve_id = id.clone();
        let reject_id = id.clone();
        (actionable && !selection.with(|s| s.is_active())).then(|| {
            view! {
                <div class="flex gap-2">
                    <button
                        type="button"
                        class="px-3 py-1 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                        on:click=move |_| approve_vm.approve(&approve_id)
                    >
                        {"승인"}
                    </button>
                    <button
                        type="button"
                        class="px-3 py-1 rounded-md text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                        on:click=move |_| open_reject.call(RejectTarget::Single(reject_id.clone()))
                    >
                        {"반려"}
                    </button>
                </div>
            }
        })
    };

    view! {
        <tr class="border-b border-border">
            <td class="px-2 py-2">{checkbox}</td>
            <td class="px-2 py-2 font-medium text-fg">{leave.name.clone()}</td>
            <td class="px-2 py-2 text-fg-muted">
                {format!("{} / {}", leave.department, leave.job_position)}
            </td>
            <td class="px-2 py-2">{leave.leave_type.clone()}</td>
            <td class="px-2 py-2">{format_period(&leave)}</td>
            <td class="px-2 py-2">{format_workdays(leave.workdays_count)}</td>
            <td class="px-2 py-2">{leave.requested_date.format("%Y-%m-%d").to_string()}</td>
            <td class="px-2 py-2">
                <span class=format!("inline-block rounded-full border px-2 py-0.5 text-xs {}", status.badge_class())>
                    {status.label()}
                </span>
            </td>
            <td class="px-2 py-2 text-sm text-fg-muted">
                {leave.reject_message.clone().or_else(|| leave.reason.clone()).unwrap_or_default()}
            </td>
            <td class="px-2 py-2">{actions}</td>
        </tr>
    }
}

#[component]
pub fn BatchToolbar(
    vm: AdminLeavesViewModel,
    open_approve: Callback<()>,
    open_reject: Callback<()>,
) -> impl IntoView {
    let selection = vm.selection;
    let page_items = vm.page_items;
    let pending = vm.decision_action.pending();
    let all_selected = {
        let vm = vm.clone();
        move || {
            page_items.track();
            let visible = vm.visible_ids();
            selection.with(|s| s.all_selected(&visible))
        }
    };
    let on_toggle_mode = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.toggle_batch_mode()
    };
    let on_select_all = move |_: web_sys::Event| vm.toggle_select_all();

    view! {
        <div class="flex flex-wrap items-center gap-3">
            <button
                type="button"
                class="px-3 py-1 rounded-md text-sm border border-border hover:bg-action-ghost-bg-hover"
                on:click=on_toggle_mode
            >
                {move || if selection.with(|s| s.is_active()) { "일괄 처리 종료" } else { "일괄 처리" }}
            </button>
            <Show when=move || selection.with(|s| s.is_active())>
                <label class="inline-flex items-center gap-1 text-sm">
                    <input type="checkbox" prop:checked=all_selected.clone() on:change=on_select_all.clone() />
                    {"전체 선택"}
                </label>
                <span class="text-sm text-fg-muted">
                    {move || format!("{}건 선택", selection.with(|s| s.len()))}
                </span>
                <button
                    type="button"
                    class="px-3 py-1 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    disabled=move || pending.get() || selection.with(|s| s.is_empty())
                    on:click=move |_| open_approve.call(())
                >
                    {"일괄 승인"}
                </button>
                <button
                    type="button"
                    class="px-3 py-1 rounded-md text-sm font-semibold bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                    disabled=move || pending.get() || selection.with(|s| s.is_empty())
                    on:click=move |_| open_reject.call(())
                >
                    {"일괄 반려"}
                </button>
            </Show>
        </div>
    }
}

#[component]
pub fn Pagination(vm: AdminLeavesViewModel) -> impl IntoView {
    let view_state = vm.view_state;
    let total_pages = vm.total_pages;
    let filtered = vm.filtered;
    let page_size = vm.page_size;
    let page = move || view_state.with(|s| s.page);
    let summary = move || {
        let count = filtered.with(Vec::len);
        let (first, last) = page_bounds(page(), page_size.get(), count);
        format!("{}-{} / 총 {}건", first, last, count)
    };
    let on_prev = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.go_to_page(page().saturating_sub(1))
    };
    let on_next = move |_: ev::MouseEvent| vm.go_to_page(page() + 1);

    view! {
        <div class="flex items-center justify-between gap-2 text-sm">
            <span class="text-fg-muted">{summary}</span>
            <div class="flex items-center gap-2">
                <button
                    type="button"
                    class="px-2 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || { page() <= 1 }
                    on:click=on_prev
                >
                    {"이전"}
                </button>
                <span>{move || format!("{} / {}", page(), total_pages.get())}</span>
                <button
                    type="button"
                    class="px-2 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || { page() >= total_pages.get() }
                    on:click=on_next
                >
                    {"다음"}
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn LeaveList(vm: AdminLeavesViewModel) -> impl IntoView {
    let page_items = vm.page_items;
    let pending = vm.decision_action.pending();
    let reject_target = create_rw_signal(None::<RejectTarget>);
    let reason = create_rw_signal(String::new());

    let open_reject = Callback::new(move |target: RejectTarget| {
        reason.set(String::new());
        reject_target.set(Some(target));
    });
    let open_batch_reject = Callback::new(move |_: ()| open_reject.call(RejectTarget::Selected));
    let approve_open = create_rw_signal(false);
    let open_batch_approve = Callback::new(move |_: ()| approve_open.set(true));
    let close_batch_approve = Callback::new(move |_: ()| approve_open.set(false));
    let confirm_batch_approve = {
        let vm = vm.clone();
        Callback::new(move |_: ()| {
            approve_open.set(false);
            vm.approve_selected();
        })
    };
    let selection = vm.selection;
    let month_data = vm.month_data;
    let selected_names = Signal::derive(move || {
        selection.with(|s| {
            month_data.with(|data| {
                s.selected_ids()
                    .iter()
                    .filter_map(|id| data.snapshot.find(id))
                    .map(|leave| format!("{} ({})", leave.name, leave.leave_type))
                    .collect::<Vec<_>>()
            })
        })
    });
    let approve_message =
        Signal::derive(move || format!("선택한 {}건을 승인하시겠습니까?", selection.with(|s| s.len())));
    let on_cancel = Callback::new(move |_: ()| reject_target.set(None));
    let on_confirm = {
        let vm = vm.clone();
        Callback::new(move |message: String| {
            match reject_target.get_untracked() {
                Some(RejectTarget::Single(id)) => vm.reject(&id, &message),
                Some(RejectTarget::Selected) => vm.reject_selected(&message),
                None => return,
            }
            reject_target.set(None);
        })
    };
    let dialog_title = Signal::derive(move || match reject_target.get() {
        Some(RejectTarget::Selected) => "선택 항목 일괄 반려".to_string(),
        _ => "휴가 반려".to_string(),
    });

    let rows = {
        let vm = vm.clone();
        move || {
            page_items
                .get()
                .into_iter()
                .map(|leave| view! { <LeaveRow vm=vm.clone() leave=leave open_reject=open_reject /> })
                .collect_view()
        }
    };

    view! {
        <div class="space-y-4">
            <BatchToolbar
                vm=vm.clone()
                open_approve=open_batch_approve
                open_reject=open_batch_reject
            />
            <Show
                when=move || !page_items.with(Vec::is_empty)
                fallback=|| view! { <EmptyState title="조건에 맞는 휴가 신청이 없습니다." /> }
            >
                <div class="overflow-x-auto">
                    <table class="min-w-full text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted border-b border-border">
                                <th class="px-2 py-2"></th>
                                <th class="px-2 py-2">{"이름"}</th>
                                <th class="px-2 py-2">{"부서 / 직급"}</th>
                                <th class="px-2 py-2">{"휴가 종류"}</th>
                                <th class="px-2 py-2">{"기간"}</th>
                                <th class="px-2 py-2">{"일수"}</th>
                                <th class="px-2 py-2">{"신청일"}</th>
                                <th class="px-2 py-2">{"상태"}</th>
                                <th class="px-2 py-2">{"사유"}</th>
                                <th class="px-2 py-2"></th>
                            </tr>
                        </thead>
                        <tbody>{rows.clone()}</tbody>
                    </table>
                </div>
            </Show>
            <Pagination vm=vm />
            <ConfirmDialog
                is_open=approve_open.into()
                title="일괄 승인"
                message=approve_message
                items=selected_names
                on_confirm=confirm_batch_approve
                on_cancel=close_batch_approve
                confirm_label="승인"
                confirm_disabled=pending
            />
            <RejectDialog
                is_open=Signal::derive(move || reject_target.with(Option::is_some))
                title=dialog_title
                reason=reason
                on_confirm=on_confirm
                on_cancel=on_cancel
                pending=pending
            />
        </div>
    }
}

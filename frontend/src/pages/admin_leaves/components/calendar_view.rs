use leptos::*;

use crate::pages::admin_leaves::{
    calendar::{CalendarDay, WEEKDAY_LABELS},
    view_model::AdminLeavesViewModel,
};

const MAX_NAMES_PER_DAY: usize = 3;

#[component]
pub fn MonthNavigator(vm: AdminLeavesViewModel) -> impl IntoView {
    let month = vm.month;
    let on_prev = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.shift_month(-1)
    };
    let on_next = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.shift_month(1)
    };
    let on_today = move |_: ev::MouseEvent| vm.go_to_current_month();

    view! {
        <div class="flex items-center gap-2">
            <button type="button" class="px-2 py-1 rounded border border-border" aria-label="이전 달" on:click=on_prev>
                {"‹"}
            </button>
            <span class="text-lg font-semibold text-fg min-w-[7rem] text-center">
                {move || {
                    let current = month.get();
                    format!("{}년 {}월", current.year(), current.month())
                }}
            </span>
            <button type="button" class="px-2 py-1 rounded border border-border" aria-label="다음 달" on:click=on_next>
                {"›"}
            </button>
            <button type="button" class="px-2 py-1 rounded border border-border text-sm" on:click=on_today>
                {"오늘"}
            </button>
        </div>
    }
}

fn day_cell(day: CalendarDay) -> impl IntoView {
    let extra = day.leaves.len().saturating_sub(MAX_NAMES_PER_DAY);
    let names = day
        .leaves
        .iter()
        .take(MAX_NAMES_PER_DAY)
        .map(|leave| {
            view! {
                <li class="truncate rounded bg-status-info-bg text-status-info-text px-1">
                    {format!("{} ({})", leave.name, leave.leave_type)}
                </li>
            }
        })
        .collect_view();
    view! {
        <td
            class="align-top h-24 border border-border p-1 text-xs"
            class=("bg-surface-muted", !day.is_current_month)
            class=("ring-2", day.is_today)
            class=("ring-action-primary-bg", day.is_today)
            data-date=day.date.format("%Y-%m-%d").to_string()
        >
            <div class="flex items-center justify-between">
                <span
                    class="font-semibold"
                    class=("text-status-error-text", day.is_off_day())
                    class=("text-fg-muted", !day.is_current_month)
                >
                    {day.date.format("%-d").to_string()}
                </span>
                {day.holiday_name.clone().map(|name| view! {
                    <span class="text-status-error-text truncate">{name}</span>
                })}
            </div>
            <ul class="mt-1 space-y-0.5">{names}</ul>
            {(extra > 0).then(|| view! { <span class="text-fg-muted">{format!("+{}명", extra)}</span> })}
        </td>
    }
}

#[component]
pub fn LeaveCalendar(vm: AdminLeavesViewModel) -> impl IntoView {
    let calendar = vm.calendar;
    view! {
        <div class="space-y-3">
            <MonthNavigator vm=vm />
            <table class="w-full table-fixed border-collapse">
                <thead>
                    <tr>
                        {WEEKDAY_LABELS
                            .iter()
                            .enumerate()
                            .map(|(index, label)| view! {
                                <th
                                    class="py-1 text-xs font-medium text-fg-muted"
                                    class=("text-status-error-text", index == 0)
                                >
                                    {*label}
                                </th>
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || calendar
                        .get()
                        .into_iter()
                        .map(|week| view! { <tr>{week.into_iter().map(day_cell).collect_view()}</tr> })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

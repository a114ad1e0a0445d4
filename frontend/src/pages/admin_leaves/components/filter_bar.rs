use leptos::*;

use crate::components::error::InlineErrorMessage;
use crate::pages::admin_leaves::{
    filter::LeaveTab,
    view_model::AdminLeavesViewModel,
    view_state::FilterChange,
};

const SELECT_CLASS: &str = "w-full lg:w-auto border border-form-control-border bg-form-control-bg text-form-control-text rounded-md px-2 py-1";

#[component]
pub fn LeaveTabs(vm: AdminLeavesViewModel) -> impl IntoView {
    let view_state = vm.view_state;
    [LeaveTab::Pending, LeaveTab::All]
        .into_iter()
        .map(|tab| {
            let vm = vm.clone();
            let selected = move || view_state.with(|state| state.filter.tab == tab);
            view! {
                <button
                    type="button"
                    role="tab"
                    class="px-4 py-2 text-sm font-medium border-b-2"
                    class=("border-action-primary-bg", selected)
                    class=("text-fg", selected)
                    class=("border-transparent", move || !selected())
                    class=("text-fg-muted", move || !selected())
                    aria-selected=move || selected().to_string()
                    on:click=move |_| vm.apply_filter(FilterChange::SelectTab(tab))
                >
                    {tab.label()}
                </button>
            }
        })
        .collect_view()
}

#[component]
pub fn FilterBar(vm: AdminLeavesViewModel) -> impl IntoView {
    let view_state = vm.view_state;
    let options = vm.options;
    let range_start = move || view_state.with(|s| s.range_draft.start.clone());
    let range_end = move || view_state.with(|s| s.range_draft.end.clone());
    let range_error = Signal::derive(move || view_state.with(|s| s.range_draft.error.clone()));

    let on_department = {
        let vm = vm.clone();
        move |ev: web_sys::Event| vm.apply_filter(FilterChange::Department(event_target_value(&ev)))
    };
    let on_position = {
        let vm = vm.clone();
        move |ev: web_sys::Event| vm.apply_filter(FilterChange::Position(event_target_value(&ev)))
    };
    let on_name = {
        let vm = vm.clone();
        move |ev: web_sys::Event| vm.apply_filter(FilterChange::NameSearch(event_target_value(&ev)))
    };
    let on_range_start = {
        let vm = vm.clone();
        move |ev: web_sys::Event| {
            let end = view_state.with_untracked(|s| s.range_draft.end.clone());
            vm.edit_range(event_target_value(&ev), end);
        }
    };
    let on_range_end = {
        let vm = vm.clone();
        move |ev: web_sys::Event| {
            let start = view_state.with_untracked(|s| s.range_draft.start.clone());
            vm.edit_range(start, event_target_value(&ev));
        }
    };
    let on_reset = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.apply_filter(FilterChange::ResetFilters)
    };

    let leave_type_boxes = move || {
        let vm = vm.clone();
        options.with(|opts| {
            opts.leave_types
                .iter()
                .cloned()
                .map(|leave_type| {
                    let vm = vm.clone();
                    let checked_type = leave_type.clone();
                    let toggled_type = leave_type.clone();
                    let checked = move || {
                        view_state.with(|state| state.filter.leave_types.contains(&checked_type))
                    };
                    view! {
                        <label class="inline-flex items-center gap-1 text-sm text-fg">
                            <input
                                type="checkbox"
                                prop:checked=checked
                                on:change=move |_| {
                                    vm.apply_filter(FilterChange::ToggleLeaveType(toggled_type.clone()))
                                }
                            />
                            {leave_type}
                        </label>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="space-y-3">
            <div class="flex flex-col gap-3 lg:flex-row lg:flex-wrap lg:items-end">
                <select class=SELECT_CLASS aria-label="부서" on:change=on_department>
                    <option value="전체" selected=move || view_state.with(|s| s.filter.department.is_empty())>
                        {"전체 부서"}
                    </option>
                    {move || options.with(|opts| opts.departments.iter().cloned().map(|dept| {
                        let selected_dept = dept.clone();
                        view! {
                            <option
                                value=dept.clone()
                                selected=move || view_state.with(|s| s.filter.department == selected_dept)
                            >
                                {dept}
                            </option>
                        }
                    }).collect_view())}
                </select>
                <select class=SELECT_CLASS aria-label="직급" on:change=on_position>
                    <option value="전체" selected=move || view_state.with(|s| s.filter.position.is_empty())>
                        {"전체 직급"}
                    </option>
                    {move || options.with(|opts| opts.positions.iter().cloned().map(|position| {
                        let selected_position = position.clone();
                        view! {
                            <option
                                value=position.clone()
                                selected=move || view_state.with(|s| s.filter.position == selected_position)
                            >
                                {position}
                            </option>
                        }
                    }).collect_view())}
                </select>
                <input
                    type="date"
                    class=SELECT_CLASS
                    aria-label="신청일 시작"
                    prop:value=range_start
                    on:change=on_range_start
                />
                <input
                    type="date"
                    class=SELECT_CLASS
                    aria-label="신청일 종료"
                    prop:value=range_end
                    on:change=on_range_end
                />
                <input
                    type="search"
                    class=SELECT_CLASS
                    placeholder="이름 검색"
                    prop:value=move || view_state.with(|s| s.filter.name_search.clone())
                    on:input=on_name
                />
                <button
                    type="button"
                    class="px-3 py-1 rounded-md text-sm text-fg-muted border border-border hover:bg-action-ghost-bg-hover"
                    on:click=on_reset
                >
                    {"필터 초기화"}
                </button>
            </div>
            <div class="flex flex-wrap gap-3">{leave_type_boxes}</div>
            <InlineErrorMessage error=range_error />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::LeaveStatus;
    use crate::pages::admin_leaves::repository::fake::FakeGateway;
    use crate::test_support::helpers::{approver, date, leave, provide_auth};
    use crate::test_support::ssr::render_to_string;
    use std::rc::Rc;

    fn vm_with_options() -> AdminLeavesViewModel {
        provide_auth(Some(approver()));
        let vm = AdminLeavesViewModel::new(Rc::new(FakeGateway::default()), date(2025, 1, 15));
        let mut half_day = leave("2", "이영희", LeaveStatus::Requested);
        half_day.leave_type = "반차".into();
        half_day.department = "영업팀".into();
        vm.month_data.update(|data| {
            data.snapshot.waiting = vec![leave("1", "김철수", LeaveStatus::Requested), half_day];
        });
        vm
    }

    #[test]
    fn filter_bar_lists_distinct_options() {
        let html = render_to_string(|| {
            let vm = vm_with_options();
            view! { <FilterBar vm=vm /> }
        });
        assert!(html.contains("전체 부서"));
        assert!(html.contains("개발팀"));
        assert!(html.contains("영업팀"));
        assert!(html.contains("반차"));
        assert!(html.contains("연차"));
        assert!(html.contains("필터 초기화"));
    }

    #[test]
    fn tab_switch_empties_date_inputs_and_range_error() {
        let html = render_to_string(|| {
            let vm = vm_with_options();
            vm.edit_range("2025-01-20".into(), "2025-01-01".into());
            vm.apply_filter(FilterChange::SelectTab(LeaveTab::All));
            view! { <FilterBar vm=vm /> }
        });
        assert!(!html.contains("시작일은 종료일보다 늦을 수 없습니다."));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn invalid_date_range_shows_error_under_inputs() {
        let html = render_to_string(|| {
            let vm = vm_with_options();
            vm.edit_range("2025-01-20".into(), "2025-01-01".into());
            view! { <FilterBar vm=vm /> }
        });
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("시작일은 종료일보다 늦을 수 없습니다."));
    }

    #[test]
    fn tabs_mark_the_selected_tab() {
        let html = render_to_string(|| {
            let vm = vm_with_options();
            view! { <div><LeaveTabs vm=vm /></div> }
        });
        assert!(html.contains("승인 대기"));
        assert!(html.contains("전체 내역"));
        assert!(html.contains("aria-selected=\"true\""));
    }
}

use leptos::*;

use super::{
    components::{
        calendar_view::LeaveCalendar,
        filter_bar::{FilterBar, LeaveTabs},
        leave_list::LeaveList,
        status_cards::StatusCards,
        yearly_table::YearlySummary,
    },
    view_model::{use_admin_leaves_view_model, AdminLeavesViewModel},
};
use crate::components::{
    error::InlineErrorMessage,
    layout::{LoadingSpinner, SuccessMessage},
};

#[component]
pub fn AdminLeavesPanel() -> impl IntoView {
    let vm = use_admin_leaves_view_model();
    view! { <AdminLeavesContent vm=vm /> }
}

#[component]
pub fn AdminLeavesContent(vm: AdminLeavesViewModel) -> impl IntoView {
    let loading = vm.loading;
    let load_error = vm.load_error;
    let message = vm.message;
    let on_retry = {
        let vm = vm.clone();
        move |_: ev::MouseEvent| vm.retry()
    };
    let list_vm = store_value(vm.clone());

    view! {
        <div class="space-y-6">
            <div class="flex flex-col gap-1">
                <h2 class="text-2xl font-bold text-fg">{"휴가 승인 관리"}</h2>
                <p class="text-sm text-fg-muted">{"부서원의 휴가 신청을 확인하고 승인 또는 반려합니다."}</p>
            </div>
            {move || message.get().success.map(|msg| view! { <SuccessMessage message=msg /> })}
            <InlineErrorMessage error=Signal::derive(move || message.get().error) />
            <div class="grid grid-cols-2 gap-3 lg:grid-cols-5">
                <StatusCards vm=vm.clone() />
            </div>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div role="tablist" class="flex border-b border-border">
                    <LeaveTabs vm=vm.clone() />
                </div>
                <FilterBar vm=vm.clone() />
                <Show
                    when=move || load_error.with(Option::is_none)
                    fallback=move || view! {
                        <div class="space-y-2">
                            <InlineErrorMessage error=load_error.into() />
                            <button
                                type="button"
                                class="px-3 py-1 rounded-md text-sm border border-border hover:bg-action-ghost-bg-hover"
                                on:click=on_retry.clone()
                            >
                                {"다시 시도"}
                            </button>
                        </div>
                    }
                >
                    <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                        <LeaveList vm=list_vm.get_value() />
                    </Show>
                </Show>
            </div>
            <div class="bg-surface-elevated shadow rounded-lg p-6">
                <LeaveCalendar vm=vm.clone() />
            </div>
            <YearlySummary vm=vm />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiError, LeaveStatus};
    use crate::pages::admin_leaves::repository::fake::FakeGateway;
    use crate::test_support::helpers::{approver, date, leave, provide_auth};
    use crate::test_support::ssr::render_to_string;
    use std::rc::Rc;

    fn vm() -> AdminLeavesViewModel {
        provide_auth(Some(approver()));
        AdminLeavesViewModel::new(Rc::new(FakeGateway::default()), date(2025, 1, 15))
    }

    #[test]
    fn panel_renders_sections() {
        let html = render_to_string(|| {
            let vm = vm();
            vm.month_data
                .update(|data| data.snapshot.waiting = vec![leave("1", "김철수", LeaveStatus::Requested)]);
            view! { <AdminLeavesContent vm=vm /> }
        });
        assert!(html.contains("휴가 승인 관리"));
        assert!(html.contains("김철수"));
        assert!(html.contains("2025년 1월"));
        assert!(html.contains("휴가 현황"));
    }

    #[test]
    fn load_error_replaces_list_with_retry_banner() {
        let html = render_to_string(|| {
            let vm = vm();
            vm.month_data
                .update(|data| data.snapshot.waiting = vec![leave("1", "김철수", LeaveStatus::Requested)]);
            vm.load_error.set(Some(ApiError::request_failed("서버에 연결할 수 없습니다.")));
            view! { <AdminLeavesContent vm=vm /> }
        });
        assert!(html.contains("서버에 연결할 수 없습니다."));
        assert!(html.contains("다시 시도"));
        assert!(!html.contains("김철수"));
    }

    #[test]
    fn success_message_is_shown() {
        let html = render_to_string(|| {
            let vm = vm();
            vm.message.update(|m| m.set_success("1건을 승인했습니다."));
            view! { <AdminLeavesContent vm=vm /> }
        });
        assert!(html.contains("1건을 승인했습니다."));
    }
}

use std::rc::Rc;

use crate::{
    api::ApiClient,
    components::theme::ThemeToggle,
    state::{
        auth::use_auth,
        notifications::{mark_all_read, use_notifications, NotificationSource},
    },
};
use leptos::*;

#[component]
pub fn NotificationBell() -> impl IntoView {
    let (auth, _) = use_auth();
    let store = use_notifications();
    let unread = store.unread_count();
    let items = store.items();
    let (open, set_open) = create_signal(false);
    let client = use_context::<ApiClient>().unwrap_or_default();

    let on_mark_all = move |_: ev::MouseEvent| {
        let Some(user_id) = auth.with_untracked(|state| state.user.as_ref().map(|u| u.id.clone()))
        else {
            return;
        };
        let source: Rc<dyn NotificationSource> = Rc::new(client.clone());
        spawn_local(async move {
            if let Err(err) = mark_all_read(source.as_ref(), store, &user_id).await {
                log::warn!("marking notifications read failed: {}", err);
                store.record_error(err);
            }
        });
    };

    view! {
        <div class="relative">
            <button
                type="button"
                class="relative px-2 py-1 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                aria-label="알림"
                aria-expanded=move || open.get()
                on:click=move |_| set_open.update(|value| *value = !*value)
            >
                <i class="fas fa-bell"></i>
                <Show when=move || { unread.get() > 0 }>
                    <span class="absolute -top-1 -right-1 rounded-full bg-action-danger-bg text-action-danger-text text-xs px-1">
                        {move || unread.get()}
                    </span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-72 rounded-lg border border-border bg-surface-elevated shadow-lg p-3 space-y-2 z-50">
                    <div class="flex items-center justify-between">
                        <span class="text-sm font-semibold text-fg">{"알림"}</span>
                        <button type="button" class="text-xs text-fg-muted hover:text-fg" on:click=on_mark_all.clone()>
                            {"모두 읽음"}
                        </button>
                    </div>
                    <ul class="max-h-64 overflow-y-auto space-y-1">
                        {move || items.get().into_iter().map(|item| view! {
                            <li class="text-sm" class=("font-semibold", !item.is_read)>
                                <p class="text-fg">{item.title}</p>
                                <p class="text-xs text-fg-muted">{item.message}</p>
                            </li>
                        }).collect_view()}
                    </ul>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let user_name = move || {
        auth.get()
            .user
            .map(|user| match user.department {
                Some(dept) => format!("{} ({})", user.name, dept),
                None => user.name,
            })
            .unwrap_or_default()
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"HR Desk"</h1>
                    <div class="flex items-center gap-3">
                        <span class="hidden sm:inline text-sm text-fg-muted">{user_name}</span>
                        <NotificationBell />
                        <ThemeToggle />
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::NotificationItem;
    use crate::state::{notifications::provide_notifications, theme::provide_theme};
    use crate::test_support::helpers::{approver, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_user_and_unread_badge() {
        let html = render_to_string(move || {
            provide_auth(Some(approver()));
            provide_theme();
            let store = provide_notifications();
            store.replace(vec![NotificationItem {
                id: "1".into(),
                title: "휴가 신청".into(),
                message: "김철수님이 연차를 신청했습니다.".into(),
                created_at: None,
                is_read: false,
            }]);
            view! { <Header /> }
        });
        assert!(html.contains("HR Desk"));
        assert!(html.contains("박관리 (인사팀)"));
        assert!(html.contains("aria-label=\"알림\""));
        assert!(html.contains(">1<"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <SuccessMessage message="처리되었습니다.".into() />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("처리되었습니다."));
    }
}

use crate::state::theme::{use_theme, Theme};
use leptos::*;

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme_state = use_theme();
    let current_theme = theme_state.current();
    let is_dark = move || current_theme.get() == Theme::Dark;

    view! {
        <button
            type="button"
            class="relative inline-flex h-6 w-11 items-center rounded-full bg-surface-muted transition-colors focus:outline-none focus:ring-2 focus:ring-action-primary-bg"
            on:click=move |_| theme_state.toggle()
            aria-label="테마 전환"
            aria-pressed=move || is_dark().to_string()
        >
            <span class="sr-only">{move || if is_dark() { "라이트 모드로 전환" } else { "다크 모드로 전환" }}</span>
            <span
                class="inline-block h-4 w-4 transform rounded-full transition-transform shadow"
                class=("translate-x-6", is_dark)
                class=("bg-action-primary-bg", is_dark)
                class=("translate-x-1", move || !is_dark())
                class=("bg-surface-elevated", move || !is_dark())
            />
        </button>
    }
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let theme_state = crate::state::theme::provide_theme();

    view! {
        <div class=move || theme_state.current().get().as_class()>
            {children()}
        </div>
    }
}

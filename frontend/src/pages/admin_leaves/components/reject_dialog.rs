use leptos::ev::KeyboardEvent;
use leptos::*;

/// Modal asking for the rejection reason; confirm stays disabled while it is blank.
#[component]
pub fn RejectDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    reason: RwSignal<String>,
    on_confirm: Callback<String>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] pending: MaybeSignal<bool>,
) -> impl IntoView {
    let blank = Signal::derive(move || reason.with(|text| text.trim().is_empty()));
    let title_text = Signal::derive(move || title.get());

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="닫기"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{move || title_text.get()}</h2>
                    <textarea
                        class="w-full min-h-[96px] border border-form-control-border bg-form-control-bg text-form-control-text rounded-md px-2 py-1"
                        placeholder="반려 사유를 입력해 주세요."
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                    ></textarea>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| on_cancel.call(())
                        >
                            {"취소"}
                        </button>
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
                            disabled=move || blank.get() || pending.get()
                            on:click=move |_| on_confirm.call(reason.get_untracked())
                        >
                            {"반려"}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn dialog_renders_with_disabled_confirm_for_blank_reason() {
        let html = render_to_string(move || {
            let reason = create_rw_signal(String::new());
            view! {
                <RejectDialog
                    is_open=Signal::derive(|| true)
                    title="휴가 반려"
                    reason=reason
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("휴가 반려"));
        assert!(html.contains("반려 사유를 입력해 주세요."));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn closed_dialog_renders_nothing() {
        let html = render_to_string(move || {
            let reason = create_rw_signal(String::new());
            view! {
                <RejectDialog
                    is_open=Signal::derive(|| false)
                    title="휴가 반려"
                    reason=reason
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("role=\"dialog\""));
    }
}

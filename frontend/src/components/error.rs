use crate::api::ApiError;
use leptos::*;

fn detail_lines(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|err| err.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn hint_for(code: &str) -> Option<&'static str> {
    match code {
        "USER_INFO_MISSING" => Some("로그인 정보가 만료되었을 수 있습니다."),
        "REQUEST_FAILED" => Some("네트워크 상태를 확인한 뒤 다시 시도해 주세요."),
        _ => None,
    }
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div
                role="alert"
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2"
            >
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let lines = detail_lines(&e);
                    let hint = hint_for(&e.code);
                    view! {
                        <div class="space-y-1">
                            {(!lines.is_empty()).then(|| view! {
                                <ul class="list-disc list-inside text-sm">
                                    {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                                </ul>
                            })}
                            {hint.map(|hint| view! { <div class="text-sm">{hint}</div> })}
                            {(e.code != "UNKNOWN" && !e.code.is_empty()).then(|| view! {
                                <div class="text-xs opacity-75">{"오류 코드: "}{e.code.clone()}</div>
                            })}
                        </div>
                    }
                })}
            </div>
        </Show>
    }
}

use crate::api::ApiError;
use crate::state::error::use_error_channel;
use leptos::*;

fn detail_lines(error: &ApiError) -> Vec<String> {
    if !error.is_validation() {
        return Vec::new();
    }
    let Some(details) = error.details.as_ref().and_then(|value| value.as_array()) else {
        return Vec::new();
    };
    details
        .iter()
        .filter_map(|entry| {
            if let Some(line) = entry.as_str() {
                return Some(line.to_string());
            }
            let message = entry.get("message").and_then(|m| m.as_str())?;
            match entry.get("field").and_then(|f| f.as_str()) {
                Some(field) => Some(format!("{}: {}", field, message)),
                None => Some(message.to_string()),
            }
        })
        .collect()
}

/// Page-level surface for the shared error slot. Shows the active error
/// with its validation details, if any, until the user acknowledges it.
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let channel = use_error_channel();
    let error = channel.current();

    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-2 my-2">
                <div class="font-bold">
                    {move || error.get().map(|e| e.error).unwrap_or_default()}
                </div>
                {move || {
                    let lines = error.get().map(|e| detail_lines(&e)).unwrap_or_default();
                    if lines.is_empty() {
                        ().into_view()
                    } else {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {lines
                                    .into_iter()
                                    .map(|line| view! { <li>{line}</li> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    }
                }}
                <button
                    class="inline-flex items-center px-3 py-1 border border-status-error-border text-sm font-medium rounded hover:bg-status-error-bg"
                    on:click=move |_| channel.dismiss()
                >
                    "Ok"
                </button>
            </div>
        </Show>
    }
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || {
                    let lines = error.get().map(|e| detail_lines(&e)).unwrap_or_default();
                    if lines.is_empty() {
                        ().into_view()
                    } else {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {lines
                                    .into_iter()
                                    .map(|line| view! { <li>{line}</li> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    }
                }}
            </div>
        </Show>
    }
}

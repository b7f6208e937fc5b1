use leptos::*;

#[component]
pub fn TextField(
    #[prop(into)] value: RwSignal<String>,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5 w-full">
            <label class="text-sm font-bold text-fg-muted ml-1">{label}</label>
            <input
                type=input_type
                class="rounded-xl border-2 border-form-control-border bg-form-control-bg py-2.5 px-4 text-sm shadow-sm disabled:opacity-50"
                disabled=disabled
                value={value.get_untracked()}
                prop:value={move || value.get()}
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn TextArea(
    #[prop(into)] value: RwSignal<String>,
    label: &'static str,
    #[prop(default = 5)] rows: u32,
    #[prop(optional)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5 w-full">
            <label class="text-sm font-bold text-fg-muted ml-1">{label}</label>
            <textarea
                rows=rows
                class="rounded-xl border-2 border-form-control-border bg-form-control-bg py-2.5 px-4 text-sm shadow-sm disabled:opacity-50"
                disabled=disabled
                prop:value={move || value.get()}
                on:input=move |ev| value.set(event_target_value(&ev))
            >
                {value.get_untracked()}
            </textarea>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn text_field_renders_label_and_value() {
        let html = render_to_string(move || {
            let value = create_rw_signal("alice@example.com".to_string());
            view! { <TextField value=value label="E-mail" input_type="email" /> }
        });
        assert!(html.contains("E-mail"));
        assert!(html.contains("email"));
    }

    #[test]
    fn text_area_renders_initial_content() {
        let html = render_to_string(move || {
            let value = create_rw_signal("draft body".to_string());
            view! { <TextArea value=value label="Content" /> }
        });
        assert!(html.contains("Content"));
        assert!(html.contains("draft body"));
    }
}

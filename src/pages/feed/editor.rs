use crate::components::forms::{TextArea, TextField};
use crate::state::feed::{EditTarget, PostDraft};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

fn initial_fields(target: &EditTarget) -> (String, String) {
    match target {
        EditTarget::New => (String::new(), String::new()),
        EditTarget::Existing(post) => (post.title.clone(), post.content.clone()),
    }
}

/// Modal form for a pending edit. The image is read into memory as soon as
/// the user picks a file; submit hands the whole draft to the caller.
#[component]
pub fn PostEditor(
    target: EditTarget,
    pending: Signal<bool>,
    on_cancel: Callback<()>,
    on_submit: Callback<PostDraft>,
) -> impl IntoView {
    let (initial_title, initial_content) = initial_fields(&target);
    let title = create_rw_signal(initial_title);
    let content = create_rw_signal(initial_content);
    let image_bytes = create_rw_signal(Vec::<u8>::new());
    let image_name = create_rw_signal(String::new());

    let heading = match &target {
        EditTarget::New => "New Post",
        EditTarget::Existing(_) => "Edit Post",
    };

    let on_file_change = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let name = file.name();
        spawn_local(async move {
            if let Ok(buffer) = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                image_bytes.set(js_sys::Uint8Array::new(&buffer).to_vec());
                image_name.set(name);
            }
        });
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        on_submit.call(PostDraft {
            title: title.get_untracked(),
            content: content.get_untracked(),
            image: image_bytes.get_untracked(),
            image_name: image_name.get_untracked(),
        });
    };

    view! {
        <div class="bg-surface-elevated rounded-2xl shadow-sm border border-border p-6 my-4">
            <h3 class="text-lg font-semibold text-fg mb-4">{heading}</h3>
            <form class="space-y-4" on:submit=handle_submit>
                <TextField value=title label="Title" />
                <div class="flex flex-col gap-1.5 w-full">
                    <label class="text-sm font-bold text-fg-muted ml-1">"Image"</label>
                    <input
                        type="file"
                        accept="image/*"
                        class="text-sm"
                        on:change=on_file_change
                    />
                    <Show when=move || !image_name.get().is_empty()>
                        <span class="text-xs text-fg-muted ml-1">{move || image_name.get()}</span>
                    </Show>
                </div>
                <TextArea value=content label="Content" />
                <div class="flex justify-end gap-3">
                    <button
                        type="button"
                        class="px-4 py-2 border border-border text-sm font-medium rounded text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                        on:click=move |_| on_cancel.call(())
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="px-4 py-2 rounded bg-action-primary-bg text-text-inverse text-sm font-medium hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Saving..." } else { "Accept" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::initial_fields;
    use crate::state::feed::EditTarget;

    #[test]
    fn new_target_starts_blank() {
        let (title, content) = initial_fields(&EditTarget::New);
        assert!(title.is_empty());
        assert!(content.is_empty());
    }
}

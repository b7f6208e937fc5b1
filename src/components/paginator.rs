use leptos::{ev::MouseEvent, *};

/// Both bounds come from the window: the cursor and the server-derived
/// last page. An empty collection disables both directions.
fn can_go_previous(current_page: u32) -> bool {
    current_page > 1
}

fn can_go_next(current_page: u32, last_page: u32) -> bool {
    current_page < last_page
}

#[component]
pub fn Paginator(
    current_page: Signal<u32>,
    last_page: Signal<u32>,
    disabled: Signal<bool>,
    on_previous: Callback<MouseEvent>,
    on_next: Callback<MouseEvent>,
    children: Children,
) -> impl IntoView {
    let previous_enabled =
        move || !disabled.get() && can_go_previous(current_page.get());
    let next_enabled =
        move || !disabled.get() && can_go_next(current_page.get(), last_page.get());
    view! {
        <div class="space-y-4">
            {children()}
            <div class="flex justify-between items-center">
                <button
                    class="px-4 py-2 border border-border text-sm font-medium rounded text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover disabled:opacity-50"
                    disabled=move || !previous_enabled()
                    on:click=move |ev| on_previous.call(ev)
                >
                    "Previous"
                </button>
                <span class="text-sm text-fg-muted">
                    {move || format!("Page {} of {}", current_page.get(), last_page.get().max(1))}
                </span>
                <button
                    class="px-4 py-2 border border-border text-sm font-medium rounded text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover disabled:opacity-50"
                    disabled=move || !next_enabled()
                    on:click=move |ev| on_next.call(ev)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}

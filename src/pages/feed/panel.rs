use crate::api::PostResponse;
use crate::components::{forms::TextField, layout::LoadingSpinner, paginator::Paginator};
use crate::pages::feed::editor::PostEditor;
use crate::pages::feed::view_model::{use_feed_view_model, FeedViewModel};
use crate::state::feed::{EditTarget, PageTurn};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn FeedPanel() -> impl IntoView {
    let vm = use_feed_view_model();
    let feed = vm.feed;

    let edit_pending = create_memo(move |_| feed.get().edit_loading);
    let posts_loading = create_memo(move |_| feed.get().posts_loading);
    let current_page = Signal::derive(move || feed.get().window.current_page);
    let last_page = Signal::derive(move || feed.get().window.last_page());

    let on_status_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_status();
    };

    view! {
        <div class="space-y-6">
            <form class="flex items-end gap-3" on:submit=on_status_submit>
                <TextField value=vm.status_draft label="Your status" />
                <button
                    type="submit"
                    class="px-4 py-2 rounded-xl bg-action-primary-bg text-text-inverse text-sm font-medium hover:bg-action-primary-bg-hover"
                >
                    "Update"
                </button>
            </form>

            <div class="flex justify-center">
                <button
                    class="px-4 py-2 rounded-xl border-2 border-action-primary-bg text-action-primary-bg text-sm font-bold hover:bg-action-primary-bg hover:text-text-inverse"
                    on:click=move |_| vm.open_editor(EditTarget::New)
                >
                    "New Post"
                </button>
            </div>

            {move || {
                feed.get()
                    .pending_edit
                    .map(|target| {
                        view! {
                            <PostEditor
                                target=target
                                pending=edit_pending.into()
                                on_cancel=Callback::new(move |_| vm.cancel_edit())
                                on_submit=Callback::new(move |draft| vm.submit_edit(draft))
                            />
                        }
                        .into_view()
                    })
                    .unwrap_or_else(|| ().into_view())
            }}

            <Show
                when=move || !posts_loading.get()
                fallback=|| view! { <LoadingSpinner /> }
            >
                <Paginator
                    current_page=current_page
                    last_page=last_page
                    disabled=posts_loading.into()
                    on_previous=Callback::new(move |_| vm.turn_page(PageTurn::Previous))
                    on_next=Callback::new(move |_| vm.turn_page(PageTurn::Next))
                >
                    <Show
                        when=move || !feed.get().window.items.is_empty()
                        fallback=|| {
                            view! {
                                <p class="text-center text-fg-muted py-8">"No posts found."</p>
                            }
                        }
                    >
                        <div class="space-y-4">
                            {move || {
                                feed.get()
                                    .window
                                    .items
                                    .into_iter()
                                    .map(|post| view! { <PostItem post=post vm=vm /> })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </Paginator>
            </Show>
        </div>
    }
}

#[component]
fn PostItem(post: PostResponse, vm: FeedViewModel) -> impl IntoView {
    let post_id = post.id.clone();
    let edit_target = EditTarget::Existing(post.clone());
    let posted = post.created_at.format("%b %e, %Y").to_string();

    view! {
        <article class="bg-surface-elevated rounded-2xl shadow-sm border border-border p-4">
            <p class="text-xs text-fg-muted uppercase tracking-wider">
                {format!("Posted by {} on {}", post.creator.name, posted)}
            </p>
            <h3 class="text-lg font-semibold text-fg mt-1">{post.title.clone()}</h3>
            <div class="flex justify-end gap-3 mt-3">
                <a
                    href=format!("/posts/{}", post.id)
                    class="text-sm font-medium text-action-primary-bg hover:underline"
                >
                    "View"
                </a>
                <button
                    class="text-sm font-medium text-action-primary-bg hover:underline"
                    on:click=move |_| vm.open_editor(edit_target.clone())
                >
                    "Edit"
                </button>
                <button
                    class="text-sm font-medium text-action-danger-bg hover:underline"
                    on:click=move |_| vm.delete(post_id.clone())
                >
                    "Delete"
                </button>
            </div>
        </article>
    }
}

use crate::api::{ApiClient, ApiError, PostResponse};
use crate::components::layout::LoadingSpinner;
use crate::config;
use leptos::*;
use leptos_router::use_params_map;

fn image_src(base_url: &str, image_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), image_url)
}

#[component]
pub fn SinglePostPage() -> impl IntoView {
    let params = use_params_map();
    let post_id = create_memo(move |_| params.get().get("id").cloned().unwrap_or_default());
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let post_resource = create_resource(
        move || post_id.get(),
        move |id| {
            let api = api.clone();
            async move {
                let post = api.get_post(&id).await?;
                let base_url = config::await_api_base_url().await;
                Ok::<(PostResponse, String), ApiError>((post, base_url))
            }
        },
    );

    view! {
        <div class="max-w-2xl mx-auto">
            {move || match post_resource.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! {
                    <p class="text-center text-status-error-text py-8">{err.error}</p>
                }
                .into_view(),
                Some(Ok((post, base_url))) => {
                    let posted = post.created_at.format("%b %e, %Y").to_string();
                    view! {
                        <article class="bg-surface-elevated rounded-2xl shadow-sm border border-border p-6 space-y-4">
                            <p class="text-xs text-fg-muted uppercase tracking-wider">
                                {format!("Posted by {} on {}", post.creator.name, posted)}
                            </p>
                            <h2 class="text-2xl font-semibold text-fg">{post.title}</h2>
                            <img
                                class="w-full rounded-xl"
                                src=image_src(&base_url, &post.image_url)
                                alt=""
                            />
                            <p class="text-fg whitespace-pre-wrap">{post.content}</p>
                        </article>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::image_src;

    #[test]
    fn image_src_joins_base_and_locator() {
        assert_eq!(
            image_src("http://localhost:8080", "images/p-1.png"),
            "http://localhost:8080/images/p-1.png"
        );
        assert_eq!(
            image_src("http://localhost:8080/", "images/p-1.png"),
            "http://localhost:8080/images/p-1.png"
        );
    }
}

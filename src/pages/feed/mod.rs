use leptos::*;

pub mod editor;
pub mod view_model;

mod panel;

pub use panel::FeedPanel;

#[component]
pub fn FeedPage() -> impl IntoView {
    view! { <FeedPanel /> }
}

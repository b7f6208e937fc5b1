use crate::{
    components::error::ErrorBanner,
    state::session::{use_logout, use_session},
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (session, _set_session) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated());
    let logout = use_logout();
    let on_logout = move |_| {
        logout();
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-3xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-semibold text-fg">
                            "Blogfeed"
                        </h1>
                    </div>
                    <nav class="flex items-center space-x-4">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| {
                                view! {
                                    <a href="/login" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                        "Login"
                                    </a>
                                    <a href="/signup" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                        "Signup"
                                    </a>
                                }
                            }
                        >
                            <a href="/" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "Feed"
                            </a>
                            <button
                                on:click=on_logout
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                            >
                                "Logout"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-3xl mx-auto py-6 sm:px-6 lg:px-8">
                <ErrorBanner/>
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

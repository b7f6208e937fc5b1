use leptos::*;
use leptos_router::*;

mod api;
mod components;
pub mod config;
mod pages;
mod state;
pub mod utils;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_support;

use components::guard::RequireAuth;
use components::layout::Layout;
use pages::{
    feed::FeedPage, login::LoginPage, signup::SignupPage, single_post::SinglePostPage,
};

#[component]
pub fn App() -> impl IntoView {
    provide_context(api::ApiClient::new());
    state::error::provide_error_channel();

    view! {
        <state::session::SessionProvider>
            <Router>
                <Layout>
                    <Routes>
                        <Route path="/" view=ProtectedFeed/>
                        <Route path="/posts/:id" view=ProtectedSinglePost/>
                        <Route path="/login" view=LoginPage/>
                        <Route path="/signup" view=SignupPage/>
                    </Routes>
                </Layout>
            </Router>
        </state::session::SessionProvider>
    }
}

#[component]
fn ProtectedFeed() -> impl IntoView {
    view! { <RequireAuth><FeedPage/></RequireAuth> }
}

#[component]
fn ProtectedSinglePost() -> impl IntoView {
    view! { <RequireAuth><SinglePostPage/></RequireAuth> }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("starting blogfeed frontend (wasm)");

    // Runtime config comes from ./config.json; loading it is non-blocking
    // and window.__BLOGFEED_ENV takes precedence when present.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("runtime config initialized");
    });

    mount_to_body(|| view! { <App/> });
}

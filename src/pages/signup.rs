use crate::{
    api::{ApiClient, ApiError, SignupRequest},
    components::forms::TextField,
    state::{error::use_error_channel, session::signup_request},
};
use leptos::{ev::SubmitEvent, *};

fn validate_signup(email: &str, name: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err("Please enter a valid e-mail address.".to_string());
    }
    if name.trim().is_empty() {
        return Err("Please enter your name.".to_string());
    }
    if password.len() < 5 {
        return Err("Password must be at least 5 characters long.".to_string());
    }
    Ok(())
}

/// Account creation never authenticates; on success the user lands on the
/// login page and signs in with the new credentials.
#[component]
pub fn SignupPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let name = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let channel = use_error_channel();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let signup_action = create_action(move |request: &SignupRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { signup_request(&api, request).await }
    });
    let pending = signup_action.pending();

    {
        create_effect(move |_| {
            if let Some(result) = signup_action.value().get() {
                match result {
                    Ok(_) => {
                        channel.dismiss();
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/login");
                        }
                    }
                    Err(err) => channel.show(err),
                }
            }
        });
    }

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let name = name.get_untracked();
        let password = password.get_untracked();

        if let Err(msg) = validate_signup(&email, &name, &password) {
            channel.show(ApiError::validation(msg));
            return;
        }

        channel.dismiss();
        signup_action.dispatch(SignupRequest {
            email,
            name,
            password,
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-8 bg-surface-elevated rounded-2xl shadow-sm border border-border p-6">
            <h2 class="text-lg font-semibold text-fg mb-4">"Signup"</h2>
            <form class="space-y-4" on:submit=handle_submit>
                <TextField value=email label="E-mail" input_type="email" />
                <TextField value=name label="Name" />
                <TextField value=password label="Password" input_type="password" />
                <button
                    type="submit"
                    class="w-full px-4 py-2 rounded-xl bg-action-primary-bg text-text-inverse font-medium hover:bg-action-primary-bg-hover disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Signing up..." } else { "Signup" }}
                </button>
            </form>
            <p class="mt-4 text-sm text-fg-muted">
                "Already have an account? "
                <a href="/login" class="text-action-primary-bg hover:underline">"Login"</a>
            </p>
        </div>
    }
}

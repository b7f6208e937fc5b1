use crate::{
    api::LoginRequest,
    components::forms::TextField,
    state::{error::use_error_channel, session},
};
use leptos::{ev::SubmitEvent, *};

fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err("Please enter a valid e-mail address.".to_string());
    }
    if password.is_empty() {
        return Err("Please enter your password.".to_string());
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let channel = use_error_channel();

    let login_action = session::use_login_action();
    let pending = login_action.pending();

    {
        create_effect(move |_| {
            if let Some(result) = login_action.value().get() {
                match result {
                    Ok(_) => {
                        channel.dismiss();
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
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
        let password = password.get_untracked();

        if let Err(msg) = validate_credentials(&email, &password) {
            channel.show(crate::api::ApiError::validation(msg));
            return;
        }

        channel.dismiss();
        login_action.dispatch(LoginRequest { email, password });
    };

    view! {
        <div class="max-w-md mx-auto mt-8 bg-surface-elevated rounded-2xl shadow-sm border border-border p-6">
            <h2 class="text-lg font-semibold text-fg mb-4">"Login"</h2>
            <form class="space-y-4" on:submit=handle_submit>
                <TextField value=email label="E-mail" input_type="email" />
                <TextField value=password label="Password" input_type="password" />
                <button
                    type="submit"
                    class="w-full px-4 py-2 rounded-xl bg-action-primary-bg text-text-inverse font-medium hover:bg-action-primary-bg-hover disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="mt-4 text-sm text-fg-muted">
                "No account yet? "
                <a href="/signup" class="text-action-primary-bg hover:underline">"Signup"</a>
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::validate_credentials;

    #[test]
    fn credentials_require_an_email_shape_and_a_password() {
        assert!(validate_credentials("", "secret").is_err());
        assert!(validate_credentials("not-an-email", "secret").is_err());
        assert!(validate_credentials("a@example.com", "").is_err());
        assert!(validate_credentials("a@example.com", "secret").is_ok());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::error::provide_error_channel;
    use crate::test_support::helpers::provide_session;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_page_renders_both_fields() {
        let html = render_to_string(move || {
            provide_error_channel();
            provide_session(false);
            view! { <LoginPage /> }
        });
        assert!(html.contains("E-mail"));
        assert!(html.contains("Password"));
        assert!(html.contains("Signup"));
    }
}

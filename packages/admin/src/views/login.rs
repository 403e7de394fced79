//! Login page view with email and password.

use api::{gate, ApiError};
use dioxus::prelude::*;
use ui::{make_client, sign_in, use_session};

fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Validation(message) => message.clone(),
        ApiError::Status { status: 401 } => "Invalid email or password".to_string(),
        _ => "Login failed. Please try again.".to_string(),
    }
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut state = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Already signed in: same answer the server gate gives
    let current = state();
    if !current.loading {
        let credential = current.session.credential().map(|c| c.as_str());
        if let Some(location) = gate::decide(gate::LOGIN_PATH, credential).location() {
            nav.replace(location);
        }
    }

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        spawn(async move {
            submitting.set(true);
            error.set(None);

            match make_client().login(&email(), &password()).await {
                Ok(session) => match sign_in(&mut state, session) {
                    Ok(()) => {
                        nav.push(gate::DASHBOARD_PATH);
                    }
                    Err(e) => {
                        tracing::error!("Failed to persist session: {}", e);
                        error.set(Some("Could not save your session".to_string()));
                    }
                },
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    error.set(Some(login_error_message(&e)));
                }
            }

            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",

            h1 { class: "login-title", "GRC Platform" }
            p { class: "login-subtitle", "Sign in to your account" }

            form {
                class: "login-form",
                onsubmit: onsubmit,

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                div {
                    class: "form-field",
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                }

                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            login_error_message(&ApiError::Status { status: 401 }),
            "Invalid email or password"
        );
        assert_eq!(
            login_error_message(&ApiError::Validation("Email is required".to_string())),
            "Email is required"
        );
        assert_eq!(
            login_error_message(&ApiError::Network("refused".to_string())),
            "Login failed. Please try again."
        );
    }
}

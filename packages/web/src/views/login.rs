//! Login page view with username/password form.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use store::UserInfo;
use ui::{use_api, use_session, use_session_revision, LogoutButton};

const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Debug, Serialize)]
struct Credentials {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    token: String,
    #[serde(default, rename = "userInfo")]
    user_info: UserInfo,
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    let session = use_session();
    let client = use_api();
    let revision = use_session_revision();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut remember = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Re-read the session whenever someone signs in or out.
    let _ = revision();
    let signed_in = session.is_logged_in();
    let name = session
        .user_info()
        .display_name()
        .unwrap_or("user")
        .to_string();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(client) = client.clone() else {
            error.set(Some("The API client is not available.".to_string()));
            return;
        };
        let session = session.clone();
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let credentials = Credentials {
                username: username().trim().to_string(),
                password: password(),
            };
            match client.post::<LoginResult>(LOGIN_ENDPOINT, &credentials).await {
                Ok(result) => {
                    session.set_token(result.token, remember());
                    session.set_user_info(result.user_info);
                    password.set(String::new());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "sign-in failed");
                    error.set(Some(e.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",

            h1 { "Sign in" }

            if signed_in {
                div {
                    class: "login-banner",
                    p { "Signed in as {name}" }
                    LogoutButton { class: "login-btn secondary" }
                }
            } else {
                form {
                    class: "login-form",
                    onsubmit: onsubmit,

                    input {
                        r#type: "text",
                        placeholder: "Username",
                        autocomplete: "username",
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                    label {
                        class: "remember",
                        input {
                            r#type: "checkbox",
                            checked: remember(),
                            onchange: move |evt| remember.set(evt.checked()),
                        }
                        "Remember me"
                    }

                    if let Some(message) = error() {
                        p { class: "login-error", "{message}" }
                    }

                    button {
                        class: "login-btn",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() {
                            "Signing in..."
                        } else {
                            "Sign in"
                        }
                    }
                }
            }
        }
    }
}

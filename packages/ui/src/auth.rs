//! Session context and hooks for the UI.

use std::rc::Rc;

use api::ClientConfig;
use dioxus::prelude::*;

use crate::repo::{make_client, open_session, AppClient, AppSession};

/// Get the session opened by [`SessionProvider`].
pub fn use_session() -> AppSession {
    use_context::<AppSession>()
}

/// Get the HTTP client bound to the session, if it could be built.
pub fn use_api() -> Option<Rc<AppClient>> {
    use_context::<Option<Rc<AppClient>>>()
}

/// Signal bumped after every session change, including the sign-out forced by
/// an expired token, so components reading the session re-render.
pub fn use_session_revision() -> Signal<u64> {
    use_context::<Signal<u64>>()
}

/// Provider component that opens the session and the client once.
/// Wrap your app with this component.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let revision = use_signal(|| 0u64);
    use_context_provider(|| revision);
    let session = use_context_provider(move || {
        let session = open_session();
        session.subscribe(move || {
            let mut revision = revision;
            *revision.write() += 1;
        });
        session
    });
    use_context_provider(move || match make_client(&config, session) {
        Ok(client) => Some(Rc::new(client)),
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            None
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    let onclick = move |_| {
        session.logout();
        tracing::debug!("signed out");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

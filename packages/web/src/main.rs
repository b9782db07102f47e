use api::ClientConfig;
use dioxus::prelude::*;

use ui::SessionProvider;
use views::Login;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// Read the client configuration, falling back to defaults when it is invalid.
fn load_config() -> ClientConfig {
    ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid client configuration, using defaults");
        ClientConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config: config.clone(),
            Router::<Route> {}
        }
    }
}

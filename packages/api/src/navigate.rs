//! Hard navigation, used to send the user to the login page.

/// Performs a full-page navigation to `path`.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Sets `window.location.href` in the browser. Elsewhere there is no page to
/// leave, so the request is only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                tracing::warn!(path, "no window to navigate");
                return;
            };
            if let Err(e) = window.location().set_href(path) {
                tracing::error!(path, error = ?e, "navigation failed");
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!(path, "navigation requested outside the browser");
        }
    }
}

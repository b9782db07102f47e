//! Platform-appropriate session and client constructors.
//!
//! - **Web** (WASM + `web` feature): `localStorage` / `sessionStorage` via [`store::BrowserStorage`]
//! - **Native**: process-local [`store::MemoryStorage`], nothing survives a restart

use api::{standard_pipeline, ApiClient, BrowserNavigator, ClientConfig, ReqwestTransport, TransportError};
use store::SessionContext;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type AppStorage = store::BrowserStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type AppStorage = store::MemoryStorage;

pub type AppSession = SessionContext<AppStorage>;
pub type AppClient = ApiClient<ReqwestTransport>;

/// Open the session persisted on this platform.
pub fn open_session() -> AppSession {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionContext::open(store::BrowserStorage::local(), store::BrowserStorage::session())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        SessionContext::open(store::MemoryStorage::new(), store::MemoryStorage::new())
    }
}

/// Build the HTTP client bound to `session`.
pub fn make_client(config: &ClientConfig, session: AppSession) -> Result<AppClient, TransportError> {
    let transport = ReqwestTransport::new(config)?;
    let pipeline = standard_pipeline(config, session, BrowserNavigator);
    Ok(ApiClient::new(transport, pipeline))
}

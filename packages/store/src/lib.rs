pub mod models;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserStorage;

pub use models::UserInfo;
pub use session::{SessionContext, SessionStore, TOKEN_KEY, USER_INFO_KEY};
pub use storage::{KeyValueStorage, StorageScope};

//! This crate contains the shared session glue for the app.

mod repo;
pub use repo::{make_client, open_session, AppClient, AppSession, AppStorage};

mod auth;
pub use auth::{use_api, use_session, use_session_revision, LogoutButton, SessionProvider};

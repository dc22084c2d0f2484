//! # sight-auth
//!
//! Client-side session management for Sight.
//!
//! Holds the access credential obtained through the identity provider's
//! redirect flow, persists it (memory, file or OS keychain), attaches it to
//! outbound API requests while it is valid, and resets the session when the
//! backend rejects it.
//!
//! Wiring, leaves first:
//! - [`storage`] / [`credential_store`]: durable `auth_token` + `auth_token_expiry`
//! - [`session`]: in-memory state behind a shared [`SessionContext`]
//! - [`authorizer`] / [`gatekeeper`]: outbound and inbound request hooks
//! - [`controller`]: login, callback, logout and startup rehydration

pub mod authorizer;
pub mod backend;
pub mod browser_flow;
pub mod clock;
pub mod controller;
pub mod credential_store;
pub mod error;
pub mod gatekeeper;
pub mod navigator;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use authorizer::RequestAuthorizer;
pub use backend::IdentityBackend;
pub use clock::{Clock, SystemClock};
pub use controller::SessionController;
pub use credential_store::{CredentialRecord, CredentialStore};
pub use error::AuthError;
pub use gatekeeper::ResponseGatekeeper;
pub use navigator::{BrowserNavigator, Navigator};
pub use session::{Routes, SessionContext, SessionState, SessionStatus};
pub use storage::{FileStorage, KeyValueStorage, KeyringStorage, MemoryStorage};

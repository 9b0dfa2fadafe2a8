//! Session bookkeeping and the account operations built on it
//!
//! - `SessionRegistry`: session records, the active-token map and blacklist
//!   entries in the shared store
//! - `SessionService`: login, relogin, logout and refresh
//! - `CredentialVerifier`: the pluggable credential check used by login

mod credentials;
mod registry;
mod service;

#[cfg(test)]
mod tests;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use registry::SessionRegistry;
pub use service::{SessionService, SessionServiceConfig};

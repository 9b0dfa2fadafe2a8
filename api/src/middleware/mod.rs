pub mod auth;

pub use auth::{SessionGuard, SessionGuardMiddleware};

//! # Gateway Core
//!
//! Token lifecycle, session bookkeeping and the per-request authorization
//! pipeline for the JWT gateway. Storage is reached only through the
//! [`SessionStore`] trait; the Redis adapter lives in `gate_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, DecodedToken, Identity, IssuedToken, SessionClaims};
pub use errors::{DomainError, DomainResult, SessionError, StoreError, TokenError};
pub use repositories::{InMemorySessionStore, SessionStore};
pub use services::{
    bearer_token, AuthDecision, AuthRequest, AuthorizationFilter, CredentialVerifier, Rejection,
    RejectionKind, SessionRegistry, SessionService, SessionServiceConfig, Stage,
    StaticCredentials, TokenCodec, TokenService, TokenServiceConfig,
};

//! Business services containing domain logic and use cases.

pub mod authorization;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use authorization::{bearer_token, AuthDecision, AuthRequest, AuthorizationFilter, Rejection, RejectionKind, Stage};
pub use session::{CredentialVerifier, SessionRegistry, SessionService, SessionServiceConfig, StaticCredentials};
pub use token::{TokenCodec, TokenService, TokenServiceConfig};

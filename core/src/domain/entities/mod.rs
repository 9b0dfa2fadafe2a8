//! Domain entities representing core business objects.

pub mod identity;
pub mod token;

pub use identity::Identity;
pub use token::{Claims, DecodedToken, IssuedToken, SessionClaims};

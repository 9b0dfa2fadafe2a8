//! Per-request authorization
//!
//! `AuthorizationFilter` runs an ordered list of stages over each request and
//! settles on forward, forward-with-refreshed-token, or reject.

mod decision;
mod filter;

#[cfg(test)]
mod tests;

pub use decision::{AuthDecision, AuthRequest, Rejection, RejectionKind};
pub use filter::{bearer_token, AuthorizationFilter, Stage};

//! # Gateway API
//!
//! Actix-web front for the JWT gateway: the session guard middleware and
//! the account routes behind it.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{Gateway, SharedStore};

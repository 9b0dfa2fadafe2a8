pub mod account;

pub use account::{HealthResponse, InfoResponse, LoginRequest, TokenResponse};

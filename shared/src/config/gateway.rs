//! Authorization filter configuration
//!
//! Key templates use a single `{}` placeholder, e.g. `jwt:blacklist:{}`.

use serde::{Deserialize, Serialize};

use super::{list_or, string_or};

/// Gateway authorization filter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Request header carrying the bearer token
    pub token_header: String,

    /// Paths forwarded without any token check
    pub skip_uris: Vec<String>,

    /// Paths forwarded once the token is well formed, even if superseded
    pub check_token_uris: Vec<String>,

    /// Logout path, always forwarded for a live session
    pub logout_uri: String,

    /// Session record key template, keyed by identity id
    pub username_key_format: String,

    /// Blacklist entry key template, keyed by invalidation group
    pub blacklist_key_format: String,

    /// Name of the hash holding the active token per identity id
    pub token_hash_key: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            token_header: String::from("Authorization"),
            skip_uris: vec![String::from("/jwt-client/login"), String::from("/health")],
            check_token_uris: vec![
                String::from("/jwt-client/relogin"),
                String::from("/jwt-client/token/refresh"),
            ],
            logout_uri: String::from("/jwt-client/logout"),
            username_key_format: String::from("jwt:username:{}"),
            blacklist_key_format: String::from("jwt:blacklist:{}"),
            token_hash_key: String::from("jwt:token"),
        }
    }
}

impl GatewayConfig {
    /// Create from a variable lookup
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let skip: Vec<&str> = defaults.skip_uris.iter().map(String::as_str).collect();
        let check: Vec<&str> = defaults.check_token_uris.iter().map(String::as_str).collect();

        Self {
            token_header: string_or(lookup, "AUTH_TOKEN_HEADER", &defaults.token_header),
            skip_uris: list_or(lookup, "AUTH_SKIP_URIS", &skip),
            check_token_uris: list_or(lookup, "AUTH_CHECK_TOKEN_URIS", &check),
            logout_uri: string_or(lookup, "AUTH_LOGOUT_URI", &defaults.logout_uri),
            username_key_format: string_or(
                lookup,
                "JWT_USERNAME_FORMAT",
                &defaults.username_key_format,
            ),
            blacklist_key_format: string_or(
                lookup,
                "JWT_BLACKLIST_FORMAT",
                &defaults.blacklist_key_format,
            ),
            token_hash_key: string_or(lookup, "JWT_TOKEN_KEY", &defaults.token_hash_key),
        }
    }

    /// Session record key for an identity
    pub fn session_key(&self, identity_id: &str) -> String {
        fill(&self.username_key_format, identity_id)
    }

    /// Blacklist entry key for an invalidation group
    pub fn blacklist_key(&self, group: &str) -> String {
        fill(&self.blacklist_key_format, group)
    }

    /// Whether the path bypasses the filter entirely
    pub fn is_skipped(&self, path: &str) -> bool {
        self.skip_uris.iter().any(|uri| uri == path)
    }

    /// Whether the path only needs a well-formed token
    pub fn is_token_checked_only(&self, path: &str) -> bool {
        self.check_token_uris.iter().any(|uri| uri == path)
    }

    /// Whether the path is the logout endpoint
    pub fn is_logout(&self, path: &str) -> bool {
        self.logout_uri == path
    }
}

fn fill(template: &str, value: &str) -> String {
    if template.contains("{}") {
        template.replacen("{}", value, 1)
    } else {
        format!("{}{}", template, value)
    }
}

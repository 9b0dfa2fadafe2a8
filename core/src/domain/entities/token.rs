//! Token entities for the gateway's self-contained session tokens.
//!
//! Wire payload (HS512 JWT):
//! `{"sub": ..., "id": ..., "username": ..., "created": ms, "holdtime": ms, "group": ..., "exp": s}`

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// Claims structure for the JWT payload
///
/// Identity, group and time claims are optional on the wire so that a
/// structurally valid token with missing fields can still be decoded and
/// rejected explicitly; see [`Claims::session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Fixed service identifier
    pub sub: String,

    /// Identity id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identity display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Issued-at, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// End of the hold window, milliseconds since the epoch
    #[serde(rename = "holdtime", default, skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<i64>,

    /// Invalidation group, fresh on every issuance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Hard expiration, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    /// Builds claims for a newly issued token
    pub fn new(
        subject: impl Into<String>,
        identity: &Identity,
        issued_at: DateTime<Utc>,
        hold_until: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            sub: subject.into(),
            id: Some(identity.id.clone()),
            username: Some(identity.name.clone()),
            created: Some(issued_at.timestamp_millis()),
            hold_time: Some(hold_until.timestamp_millis()),
            group: Some(group.into()),
            exp: expires_at.timestamp(),
        }
    }

    /// Validated view of the claims the filter depends on
    ///
    /// Returns `None` when the identity, name, group or hold boundary is
    /// absent or empty.
    pub fn session(&self) -> Option<SessionClaims> {
        let id = non_empty(self.id.as_deref())?;
        let name = non_empty(self.username.as_deref())?;
        let group = non_empty(self.group.as_deref())?;
        let hold_until = Utc.timestamp_millis_opt(self.hold_time?).single()?;

        Some(SessionClaims {
            identity: Identity::new(id, name),
            group: group.to_string(),
            hold_until,
            expires_at: self.exp,
        })
    }

    /// `true` once the hard expiration has passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    /// `true` while `now` is strictly before the hold boundary
    pub fn is_within_hold_at(&self, now: DateTime<Utc>) -> bool {
        match self.hold_time {
            Some(hold) => now.timestamp_millis() < hold,
            None => false,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Claims after completeness validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub identity: Identity,
    pub group: String,
    pub hold_until: DateTime<Utc>,
    /// Hard expiration, seconds since the epoch
    pub expires_at: i64,
}

impl SessionClaims {
    /// Time left in the hold window, `None` once it has closed
    pub fn remaining_hold(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        (self.hold_until - now).to_std().ok().filter(|d| !d.is_zero())
    }
}

/// Result of decoding a token whose signature verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedToken {
    /// Signature valid and not hard-expired
    Valid(Claims),
    /// Signature valid but past `exp`; still readable for bookkeeping
    Expired(Claims),
}

impl DecodedToken {
    pub fn claims(&self) -> &Claims {
        match self {
            DecodedToken::Valid(claims) | DecodedToken::Expired(claims) => claims,
        }
    }

    pub fn into_claims(self) -> Claims {
        match self {
            DecodedToken::Valid(claims) | DecodedToken::Expired(claims) => claims,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, DecodedToken::Expired(_))
    }
}

/// A freshly minted token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

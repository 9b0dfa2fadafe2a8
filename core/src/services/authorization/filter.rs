//! The authorization pipeline

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::token::{DecodedToken, SessionClaims};
use crate::errors::{DomainError, DomainResult, SessionError, TokenError};
use crate::repositories::SessionStore;
use crate::services::session::SessionRegistry;
use crate::services::token::TokenService;

use super::decision::{AuthDecision, AuthRequest, Rejection};

/// One guard in the pipeline
///
/// Stages run in [`Stage::PIPELINE`] order; the first one that stops decides
/// the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configured public paths pass without a token
    PreAuthBypass,
    TokenPresence,
    SignatureCheck,
    /// Identity, name, group and hold boundary must all be present
    ClaimCompleteness,
    /// Paths that only need a well-formed token, even a superseded one
    PostAuthBypass,
    Blacklist,
    ActiveToken,
    HoldWindow,
    LogoutPassthrough,
    /// Renew hard-expired tokens still inside their hold window
    Refresh,
}

impl Stage {
    pub const PIPELINE: [Stage; 10] = [
        Stage::PreAuthBypass,
        Stage::TokenPresence,
        Stage::SignatureCheck,
        Stage::ClaimCompleteness,
        Stage::PostAuthBypass,
        Stage::Blacklist,
        Stage::ActiveToken,
        Stage::HoldWindow,
        Stage::LogoutPassthrough,
        Stage::Refresh,
    ];
}

enum Step {
    Continue,
    Stop(AuthDecision),
}

/// Per-request state accumulated by the stages
struct Exchange<'a> {
    request: AuthRequest<'a>,
    now: DateTime<Utc>,
    token: &'a str,
    decoded: Option<DecodedToken>,
    session: Option<SessionClaims>,
}

impl<'a> Exchange<'a> {
    fn decoded(&self) -> DomainResult<&DecodedToken> {
        self.decoded.as_ref().ok_or_else(|| out_of_order("decoded token"))
    }

    fn session(&self) -> DomainResult<&SessionClaims> {
        self.session.as_ref().ok_or_else(|| out_of_order("session claims"))
    }
}

fn out_of_order(what: &str) -> DomainError {
    DomainError::Internal {
        message: format!("{} read before it was set", what),
    }
}

/// Decides allow, deny or refresh-and-allow for each request
///
/// Holds no per-request mutable state; all coordination between requests
/// and gateway instances goes through the session store.
pub struct AuthorizationFilter<S> {
    tokens: Arc<TokenService>,
    registry: Arc<SessionRegistry<S>>,
}

impl<S: SessionStore> AuthorizationFilter<S> {
    pub fn new(tokens: Arc<TokenService>, registry: Arc<SessionRegistry<S>>) -> Self {
        Self { tokens, registry }
    }

    /// Run the pipeline for one request
    ///
    /// Never fails: every error becomes a [`Rejection`].
    pub async fn authorize(&self, request: AuthRequest<'_>) -> AuthDecision {
        self.authorize_at(request, Utc::now()).await
    }

    /// Run the pipeline as if the current time were `now`
    pub async fn authorize_at(&self, request: AuthRequest<'_>, now: DateTime<Utc>) -> AuthDecision {
        let mut exchange = Exchange {
            request,
            now,
            token: request.token.unwrap_or_default().trim(),
            decoded: None,
            session: None,
        };

        for stage in Stage::PIPELINE {
            match self.run_stage(stage, &mut exchange).await {
                Ok(Step::Continue) => {}
                Ok(Step::Stop(decision)) => {
                    tracing::debug!(path = %request.path, ?stage, "Request forwarded");
                    return decision;
                }
                Err(error) => {
                    let rejection = Rejection::from(error);
                    if rejection.is_server_fault() {
                        tracing::error!(path = %request.path, ?stage, code = rejection.code(), "Authorization failed on server fault");
                    } else {
                        tracing::info!(path = %request.path, ?stage, code = rejection.code(), "Request rejected");
                    }
                    return AuthDecision::Reject(rejection);
                }
            }
        }

        AuthDecision::Forward
    }

    async fn run_stage(&self, stage: Stage, exchange: &mut Exchange<'_>) -> DomainResult<Step> {
        let config = self.registry.config();
        let path = exchange.request.path;

        match stage {
            Stage::PreAuthBypass => Ok(stop_if(config.is_skipped(path), AuthDecision::Forward)),

            Stage::TokenPresence => {
                if exchange.token.is_empty() {
                    return Err(SessionError::NoToken.into());
                }
                Ok(Step::Continue)
            }

            Stage::SignatureCheck => {
                exchange.decoded = Some(self.tokens.decode(exchange.token)?);
                Ok(Step::Continue)
            }

            Stage::ClaimCompleteness => {
                let session = exchange
                    .decoded()?
                    .claims()
                    .session()
                    .ok_or(TokenError::InvalidToken)?;
                exchange.session = Some(session);
                Ok(Step::Continue)
            }

            Stage::PostAuthBypass => Ok(stop_if(
                config.is_token_checked_only(path),
                AuthDecision::Forward,
            )),

            Stage::Blacklist => {
                let session = exchange.session()?;
                if self.registry.is_blacklisted(&session.group).await? {
                    return Err(SessionError::SessionInvalidated {
                        reason: format!("{} has logged out", session.identity.name),
                    }
                    .into());
                }
                Ok(Step::Continue)
            }

            Stage::ActiveToken => {
                let session = exchange.session()?;
                if !self
                    .registry
                    .is_active_token(&session.identity.id, exchange.token)
                    .await?
                {
                    return Err(SessionError::SessionInvalidated {
                        reason: "session information mismatch".to_string(),
                    }
                    .into());
                }
                Ok(Step::Continue)
            }

            Stage::HoldWindow => {
                if !exchange.decoded()?.claims().is_within_hold_at(exchange.now) {
                    return Err(SessionError::SessionExpired.into());
                }
                Ok(Step::Continue)
            }

            Stage::LogoutPassthrough => Ok(stop_if(config.is_logout(path), AuthDecision::Forward)),

            Stage::Refresh => {
                if !TokenService::is_renewable_at(exchange.decoded()?.claims(), exchange.now) {
                    return Ok(Step::Stop(AuthDecision::Forward));
                }

                // Same logical session: the old token is replaced, not blacklisted
                let renewed = self.tokens.renew_at(exchange.token, exchange.now)?;
                self.registry
                    .replace_active_token(&renewed.claims.identity.id, &renewed.token)
                    .await?;

                tracing::info!(
                    identity_id = %renewed.claims.identity.id,
                    group = %renewed.claims.group,
                    "Refreshed token in flight"
                );
                Ok(Step::Stop(AuthDecision::ForwardRefreshed {
                    token: renewed.token,
                }))
            }
        }
    }
}

fn stop_if(condition: bool, decision: AuthDecision) -> Step {
    if condition {
        Step::Stop(decision)
    } else {
        Step::Continue
    }
}

/// Token carried in a bearer header value
///
/// Accepts both a raw token and `Bearer <token>`.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let value = header_value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    };

    (!token.is_empty()).then_some(token)
}

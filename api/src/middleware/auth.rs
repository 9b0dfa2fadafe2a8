//! Session guard middleware.
//!
//! Runs every inbound request through the core [`AuthorizationFilter`] and
//! acts on its decision:
//! 1. Forward: the request reaches the route untouched
//! 2. ForwardRefreshed: the bearer header is replaced with the renewed token
//!    on the request, and the same header is set on the response so the
//!    client can pick the new token up
//! 3. Reject: a `{code, message}` body is returned without calling the route

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    http::header::{HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use gate_core::{bearer_token, AuthDecision, AuthRequest, AuthorizationFilter};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::app::SharedStore;
use crate::handlers::error::rejection_response;

/// Session guard middleware factory
#[derive(Clone)]
pub struct SessionGuard {
    filter: Arc<AuthorizationFilter<SharedStore>>,
    /// Header carrying the bearer token
    header: HeaderName,
}

impl SessionGuard {
    /// Creates a guard reading the token from `header`
    pub fn new(filter: Arc<AuthorizationFilter<SharedStore>>, header: HeaderName) -> Self {
        Self { filter, header }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
            filter: Arc::clone(&self.filter),
            header: self.header.clone(),
        }))
    }
}

/// Session guard middleware service
pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
    filter: Arc<AuthorizationFilter<SharedStore>>,
    header: HeaderName,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let filter = Arc::clone(&self.filter);
        let header = self.header.clone();

        Box::pin(async move {
            let path = req.path().to_owned();
            let token = extract_token(&req, &header);
            let decision = filter
                .authorize(AuthRequest::new(&path, token.as_deref()))
                .await;

            match decision {
                AuthDecision::Forward => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                AuthDecision::ForwardRefreshed { token } => {
                    let value = HeaderValue::from_str(&token).map_err(ErrorInternalServerError)?;
                    req.headers_mut().insert(header.clone(), value.clone());

                    let mut res = service.call(req).await?;
                    res.headers_mut().insert(header, value);
                    Ok(res.map_into_left_body())
                }
                AuthDecision::Reject(rejection) => {
                    let response = rejection_response(&rejection);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Bearer token from the configured header, `Bearer ` prefix optional
pub fn extract_token(req: &ServiceRequest, header: &HeaderName) -> Option<String> {
    req.headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned)
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication gateway.
//!
//! Runs once per request in front of every route:
//!
//! 1. Exempt paths pass straight through, nothing else is inspected.
//! 2. A credential is taken from the `Authorization` header or `auth` cookie.
//! 3. The token is decoded and its subject resolved to a principal.
//! 4. The token is checked for signature and expiry at the current time.
//! 5. The principal is installed into the request's [`AuthContext`].
//!
//! Any failure ends the request with a 401 and the downstream handler is
//! never invoked.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/v1/secure/user/me", get(me))
//!     .layer(axum::middleware::from_fn_with_state(gateway, auth_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use tracing::Level;

use super::{
    claims::Principal,
    context::AuthContext,
    credential::extract_credential,
    path_policy::PathPolicy,
    resolver::PrincipalResolver,
    token::TokenCodec,
    AuthError,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// How a request left the gateway when it was allowed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// Path matched an exemption pattern; no authentication attempted
    Exempt,
    /// Principal installed for the request
    Authenticated(Principal),
}

/// Per-request authentication filter.
#[derive(Clone)]
pub struct AuthGateway {
    policy: PathPolicy,
    codec: Arc<TokenCodec>,
    resolver: Arc<dyn PrincipalResolver>,
    clock: Clock,
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("policy", &self.policy)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl AuthGateway {
    pub fn new(
        policy: PathPolicy,
        codec: Arc<TokenCodec>,
        resolver: Arc<dyn PrincipalResolver>,
    ) -> Self {
        Self {
            policy,
            codec,
            resolver,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used for expiry checks.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    /// Authenticate a request in place.
    ///
    /// On success the request's extensions carry an [`AuthContext`], populated
    /// unless the path was exempt.
    pub async fn authenticate<B>(
        &self,
        request: &mut Request<B>,
    ) -> Result<GatewayOutcome, AuthError> {
        if self.policy.is_exempt(request.uri().path()) {
            return Ok(GatewayOutcome::Exempt);
        }

        let credential = extract_credential(request.headers()).ok_or(AuthError::MissingCredential)?;
        let decoded = self
            .codec
            .decode(&credential.token)
            .map_err(|_| AuthError::CredentialMalformed)?;

        let context = context_of(request);
        if context.is_set() {
            return Err(AuthError::CredentialInvalid);
        }

        let principal = self
            .resolver
            .resolve_principal(decoded.subject)
            .await
            .ok_or(AuthError::PrincipalUnknown)?;

        if !self.codec.is_valid_at(&credential.token, (self.clock)()) {
            return Err(AuthError::CredentialInvalidOrExpired);
        }

        context
            .install(principal.clone())
            .map_err(|_| AuthError::CredentialInvalid)?;
        Ok(GatewayOutcome::Authenticated(principal))
    }
}

/// The request's context, inserting an empty one if absent.
fn context_of<B>(request: &mut Request<B>) -> AuthContext {
    if let Some(context) = request.extensions().get::<AuthContext>() {
        return context.clone();
    }
    let context = AuthContext::new();
    request.extensions_mut().insert(context.clone());
    context
}

fn credential_source(headers: &http::HeaderMap) -> &'static str {
    extract_credential(headers)
        .map(|credential| credential.source.as_str())
        .unwrap_or("none")
}

/// Missing credentials log at `debug`, every other rejection at `warn`.
fn rejection_level(err: &AuthError) -> Level {
    match err {
        AuthError::MissingCredential => Level::DEBUG,
        _ => Level::WARN,
    }
}

/// Axum middleware wrapping [`AuthGateway::authenticate`].
pub async fn auth_middleware(
    State(gateway): State<Arc<AuthGateway>>,
    mut request: Request,
    next: Next,
) -> Response {
    match gateway.authenticate(&mut request).await {
        Ok(GatewayOutcome::Exempt) => next.run(request).await,
        Ok(GatewayOutcome::Authenticated(principal)) => {
            tracing::debug!(
                principal_id = %principal.id,
                path = %request.uri().path(),
                "request authenticated"
            );
            next.run(request).await
        }
        Err(err) => {
            let reason = err.error_code();
            let source = credential_source(request.headers());
            let method = request.method();
            let path = request.uri().path();
            if rejection_level(&err) == Level::DEBUG {
                tracing::debug!(reason, source, %method, path, "request rejected by auth gateway");
            } else {
                tracing::warn!(reason, source, %method, path, "request rejected by auth gateway");
            }
            err.into_response()
        }
    }
}

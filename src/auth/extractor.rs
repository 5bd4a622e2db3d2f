// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the authenticated principal.
//!
//! The gateway has already authenticated the request by the time a handler
//! runs; these extractors only read the [`AuthContext`] it installed.
//!
//! ```rust,ignore
//! async fn me(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal.id is the caller's user id
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{claims::Principal, context::AuthContext, AuthError, UserAuthority};

fn installed_principal(parts: &Parts) -> Option<Principal> {
    parts
        .extensions
        .get::<AuthContext>()
        .and_then(|ctx| ctx.principal())
        .cloned()
}

/// Extractor for an authenticated principal.
///
/// Rejects with `401` when the request carries no principal, e.g. a handler
/// mounted on an exempt path.
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        installed_principal(parts)
            .map(Auth)
            .ok_or(AuthError::MissingCredential)
    }
}

/// Require the principal to hold at least `required`.
pub fn require_authority(principal: &Principal, required: UserAuthority) -> Result<(), AuthError> {
    if principal.has_authority_at_least(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientAuthority)
    }
}

/// Require the principal to be `user_id` itself or hold at least `required`.
pub fn require_self_or_authority(
    principal: &Principal,
    user_id: uuid::Uuid,
    required: UserAuthority,
) -> Result<(), AuthError> {
    if principal.is_self_or_at_least(user_id, required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientAuthority)
    }
}

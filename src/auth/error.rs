// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::responder;

/// Message returned when no credential was presented.
pub const MISSING_MSG: &str =
    "The authorization token is missing. Provide Bearer or cookie 'auth'.";

/// Message returned for every other authentication failure.
pub const FAILED_MSG: &str = "The authorization token has failed validation.";

/// Token codec failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The string is not a parseable signed token
    #[error("token is malformed")]
    MalformedToken,
    /// The signature does not verify with the configured secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Signing failed while issuing a token
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Authentication error type.
///
/// The gateway variants all surface as HTTP 401 with one of two public
/// messages ([`MISSING_MSG`] or [`FAILED_MSG`]); the distinct reason is kept
/// for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token in the `Authorization` header or the `auth` cookie
    MissingCredential,
    /// Token could not be decoded or verified
    CredentialMalformed,
    /// Token subject does not resolve to a principal
    PrincipalUnknown,
    /// Token failed the full signature and expiry check
    CredentialInvalidOrExpired,
    /// A principal was already installed for this request
    CredentialInvalid,
    /// Authenticated, but the principal's authorities are too weak
    InsufficientAuthority,
}

impl AuthError {
    /// Internal reason code, for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::CredentialMalformed => "credential_malformed",
            AuthError::PrincipalUnknown => "principal_unknown",
            AuthError::CredentialInvalidOrExpired => "credential_invalid_or_expired",
            AuthError::CredentialInvalid => "credential_invalid",
            AuthError::InsufficientAuthority => "insufficient_authority",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InsufficientAuthority => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message exposed to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => MISSING_MSG,
            AuthError::InsufficientAuthority => crate::error::MSG_PERMISSION_NOT_ALLOWED,
            _ => FAILED_MSG,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "No credential presented"),
            AuthError::CredentialMalformed => write!(f, "Credential could not be decoded"),
            AuthError::PrincipalUnknown => write!(f, "Credential subject is unknown"),
            AuthError::CredentialInvalidOrExpired => {
                write!(f, "Credential signature is invalid or the credential expired")
            }
            AuthError::CredentialInvalid => {
                write!(f, "Authentication context already populated")
            }
            AuthError::InsufficientAuthority => {
                write!(f, "Insufficient authority for this operation")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self.status_code() {
            StatusCode::UNAUTHORIZED => responder::unauthorized(self.public_message()),
            status => responder::failure(status, self.public_message()),
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Raw credential extraction from request headers.
//!
//! ## Precedence
//!
//! 1. `Authorization` header. When present it is the only source consulted:
//!    a `Bearer ` prefix yields the remainder (even if empty), anything else
//!    yields no credential.
//! 2. Otherwise the `auth` cookie, if any.

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};

/// Name of the cookie carrying the raw token.
pub const AUTH_COOKIE_NAME: &str = "auth";

/// Literal prefix of a bearer `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Where a credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    BearerHeader,
    Cookie,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::BearerHeader => "bearer",
            CredentialSource::Cookie => "cookie",
        }
    }
}

/// Candidate token, not yet validated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Pull a candidate token out of the request headers.
pub fn extract_credential(headers: &HeaderMap) -> Option<Credential> {
    if let Some(header) = headers.get(AUTHORIZATION) {
        return header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(|token| Credential {
                token: token.to_string(),
                source: CredentialSource::BearerHeader,
            });
    }

    cookie_value(headers, AUTH_COOKIE_NAME).map(|token| Credential {
        token,
        source: CredentialSource::Cookie,
    })
}

/// First value of the named cookie across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

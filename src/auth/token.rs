// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stateless access token codec.
//!
//! Tokens are compact HS256 JWTs carrying `sub`, `iat` and `exp`. A single
//! symmetric secret, loaded at startup, both signs and verifies. Nothing is
//! stored server-side: expiry is the only way a token stops being valid.
//!
//! [`TokenCodec::decode`] verifies the signature only, so callers can tell
//! "bad signature" from "expired". [`TokenCodec::is_valid_at`] folds both
//! checks into one boolean.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::claims::{DecodedToken, TokenClaims};
use super::error::TokenError;

/// Token lifetime in seconds (30 days).
pub const TOKEN_LIFETIME_SECS: i64 = 2_592_000;

/// Token lifetime as a duration.
pub fn token_lifetime() -> TimeDelta {
    TimeDelta::seconds(TOKEN_LIFETIME_SECS)
}

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Encodes and verifies access tokens with the shared secret.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked separately in `is_valid_at`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `subject`, valid from `now` for [`token_lifetime`].
    ///
    /// Claims use whole seconds; `now` is truncated accordingly.
    pub fn encode(&self, subject: Uuid, now: DateTime<Utc>) -> Result<String, TokenError> {
        let issued_at = now.timestamp();
        let claims = TokenClaims {
            sub: subject.hyphenated().to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Parse and verify a token's signature, without checking expiry.
    pub fn decode(&self, token: &str) -> Result<DecodedToken, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::MalformedToken,
            })?;

        let claims = data.claims;

        // A verified payload whose subject is not an identifier is treated as
        // a signature-class failure rather than a missing subject.
        let subject = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::InvalidSignature)?;

        let issued_at =
            DateTime::<Utc>::from_timestamp(claims.iat, 0).ok_or(TokenError::MalformedToken)?;
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(TokenError::MalformedToken)?;

        Ok(DecodedToken {
            subject,
            issued_at,
            expires_at,
        })
    }

    /// True iff the token verifies and expires strictly after `now`.
    pub fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.decode(token) {
            Ok(decoded) => decoded.expires_at > now,
            Err(_) => false,
        }
    }

    /// [`Self::is_valid_at`] against the current wall clock.
    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(token, Utc::now())
    }
}

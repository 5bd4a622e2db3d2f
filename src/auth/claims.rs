// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the authenticated principal.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::roles::UserAuthority;

/// Wire claims carried by an access token.
///
/// Timestamps are JWT NumericDate values (Unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal's UUID in hyphenated form
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// Verified contents of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub subject: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Authenticated identity attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub id: Uuid,
    pub authorities: BTreeSet<UserAuthority>,
}

impl Principal {
    pub fn new(id: Uuid, authorities: impl IntoIterator<Item = UserAuthority>) -> Self {
        Self {
            id,
            authorities: authorities.into_iter().collect(),
        }
    }

    /// Weight of the strongest authority held, zero when none.
    pub fn max_weight(&self) -> u8 {
        self.authorities
            .iter()
            .map(|a| a.weight())
            .max()
            .unwrap_or(0)
    }

    /// Check if any held authority reaches the required one.
    pub fn has_authority_at_least(&self, required: UserAuthority) -> bool {
        self.authorities.iter().any(|a| a.has_privilege(required))
    }

    /// The principal is the given user, or holds at least `required`.
    pub fn is_self_or_at_least(&self, user_id: Uuid, required: UserAuthority) -> bool {
        self.id == user_id || self.has_authority_at_least(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_weight_picks_strongest() {
        let principal = Principal::new(
            Uuid::new_v4(),
            [UserAuthority::User, UserAuthority::Moderator],
        );
        assert_eq!(principal.max_weight(), 80);
        assert!(principal.has_authority_at_least(UserAuthority::Owner));
        assert!(!principal.has_authority_at_least(UserAuthority::Admin));
    }

    #[test]
    fn empty_principal_has_no_privilege() {
        let principal = Principal::new(Uuid::new_v4(), []);
        assert_eq!(principal.max_weight(), 0);
        assert!(!principal.has_authority_at_least(UserAuthority::User));
    }

    #[test]
    fn self_access_bypasses_authority() {
        let id = Uuid::new_v4();
        let principal = Principal::new(id, [UserAuthority::User]);
        assert!(principal.is_self_or_at_least(id, UserAuthority::Admin));
        assert!(!principal.is_self_or_at_least(Uuid::new_v4(), UserAuthority::Admin));
    }
}

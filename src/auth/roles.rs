// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User authorities for authorization.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authority granted to a user.
///
/// ## Weights
///
/// Privilege comparisons use the explicit weight of each authority, never
/// the declaration order of the variants. `Ord` follows the weight, so
/// `User < Admin < God`.
///
/// | Authority | Weight |
/// |-----------|--------|
/// | `God` | 100 |
/// | `Admin` | 90 |
/// | `Moderator` | 80 |
/// | `Owner` | 70 |
/// | `Manager` | 60 |
/// | `Volunteer` | 50 |
/// | `User` | 10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAuthority {
    God,
    Admin,
    Moderator,
    Owner,
    Manager,
    Volunteer,
    User,
}

impl UserAuthority {
    pub const ALL: [UserAuthority; 7] = [
        UserAuthority::God,
        UserAuthority::Admin,
        UserAuthority::Moderator,
        UserAuthority::Owner,
        UserAuthority::Manager,
        UserAuthority::Volunteer,
        UserAuthority::User,
    ];

    /// Privilege weight; higher outranks lower.
    pub const fn weight(self) -> u8 {
        match self {
            UserAuthority::God => 100,
            UserAuthority::Admin => 90,
            UserAuthority::Moderator => 80,
            UserAuthority::Owner => 70,
            UserAuthority::Manager => 60,
            UserAuthority::Volunteer => 50,
            UserAuthority::User => 10,
        }
    }

    /// Human readable role name.
    pub const fn display_name(self) -> &'static str {
        match self {
            UserAuthority::God => "God",
            UserAuthority::Admin => "Admin",
            UserAuthority::Moderator => "Moderator",
            UserAuthority::Owner => "Owner",
            UserAuthority::Manager => "Manager",
            UserAuthority::Volunteer => "Volunteer",
            UserAuthority::User => "User",
        }
    }

    /// Compare two authorities by privilege weight.
    pub fn compare_privilege(self, other: UserAuthority) -> Ordering {
        self.cmp(&other)
    }

    /// Check if this authority carries at least the privileges of `required`.
    pub fn has_privilege(self, required: UserAuthority) -> bool {
        self.compare_privilege(required) != Ordering::Less
    }

}

impl Ord for UserAuthority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl PartialOrd for UserAuthority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for UserAuthority {
    /// Authority granted to freshly registered users.
    fn default() -> Self {
        UserAuthority::User
    }
}

impl std::fmt::Display for UserAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_follow_hierarchy() {
        let weights: Vec<u8> = UserAuthority::ALL.iter().map(|a| a.weight()).collect();
        assert_eq!(weights, vec![100, 90, 80, 70, 60, 50, 10]);
    }

    #[test]
    fn admin_outranks_manager() {
        assert!(UserAuthority::Admin.has_privilege(UserAuthority::Manager));
        assert!(UserAuthority::Admin.has_privilege(UserAuthority::Admin));
        assert!(!UserAuthority::Manager.has_privilege(UserAuthority::Admin));
        assert_eq!(
            UserAuthority::Volunteer.compare_privilege(UserAuthority::Owner),
            Ordering::Less
        );
    }

    #[test]
    fn user_only_has_user_privilege() {
        for authority in UserAuthority::ALL {
            let expected = authority == UserAuthority::User;
            assert_eq!(UserAuthority::User.has_privilege(authority), expected);
        }
    }

    #[test]
    fn ordering_follows_privilege() {
        assert!(UserAuthority::User < UserAuthority::God);
        assert!(UserAuthority::Manager < UserAuthority::Admin);
        assert_eq!(UserAuthority::ALL.iter().max(), Some(&UserAuthority::God));

        let mut sorted = UserAuthority::ALL;
        sorted.sort();
        assert_eq!(sorted.first(), Some(&UserAuthority::User));
        assert_eq!(sorted.last(), Some(&UserAuthority::God));
    }

    #[test]
    fn serializes_as_screaming_snake() {
        let json = serde_json::to_string(&UserAuthority::Moderator).unwrap();
        assert_eq!(json, "\"MODERATOR\"");
        assert_eq!(UserAuthority::Moderator.to_string(), "Moderator");
    }

    #[test]
    fn default_authority_is_user() {
        assert_eq!(UserAuthority::default(), UserAuthority::User);
    }
}

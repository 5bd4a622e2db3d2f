// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the stored entities and the request and response
//! structures used by the REST API.
//!
//! ## Response Envelope
//!
//! Every JSON response, successful or not, is wrapped in
//! [`RestResponseBody`]: `{"timestamp", "success", "message", "data"}`.
//!
//! ## Model Categories
//!
//! - **Users**: accounts, their authorities and organization membership
//! - **Organizations**: registered organizations and their managers
//! - **Chains**: hierarchical groupings of organizations
//! - **News**: public news articles

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::UserAuthority;

/// Current time as Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Uniform response body.
///
/// `message` and `data` serialize as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestResponseBody<T> {
    /// Creation time of the response (Unix epoch milliseconds).
    pub timestamp: i64,
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> RestResponseBody<T> {
    pub fn new(success: bool, message: Option<String>, data: Option<T>) -> Self {
        Self {
            timestamp: now_millis(),
            success,
            message,
            data,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(true, None, Some(data))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, Some(message.into()), None)
    }
}

impl RestResponseBody<()> {
    /// Successful response without payload.
    pub fn empty() -> Self {
        Self::new(true, None, None)
    }
}

// =============================================================================
// User Models
// =============================================================================

/// A stored user account.
///
/// Never serialized directly; see [`UserDto`] and [`UserConfidentialDto`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub phone_number: String,
    pub authorities: BTreeSet<UserAuthority>,
    pub organization_id: Option<Uuid>,
    pub created_at: i64,
    pub last_seen_at: i64,
    pub online: bool,
    pub level: i32,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    pub created_at: i64,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            organization_id: user.organization_id,
            created_at: user.created_at,
        }
    }
}

/// Security-relevant view of a user, returned to the user themselves.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserConfidentialDto {
    pub id: Uuid,
    pub email: String,
    pub authorities: Vec<UserAuthority>,
    pub last_seen_at: i64,
    pub online: bool,
    pub level: i32,
}

impl From<&User> for UserConfidentialDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            authorities: user.authorities.iter().copied().collect(),
            last_seen_at: user.last_seen_at,
            online: user.online,
            level: user.level,
        }
    }
}

/// Request to register or update a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
}

/// Fully populated user request.
#[derive(Debug, Clone)]
pub struct UserFields {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

impl CreateUserRequest {
    /// All fields present and non-empty.
    pub fn into_complete(self) -> Option<UserFields> {
        Some(UserFields {
            name: non_empty(self.name)?,
            surname: non_empty(self.surname)?,
            email: non_empty(self.email)?,
            password: non_empty(self.password)?,
            phone_number: non_empty(self.phone_number)?,
        })
    }
}

/// Query for the public user lookup. A non-empty `email` wins over `id`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserLookupQuery {
    /// Email address of the account (case-insensitive).
    pub email: Option<String>,
    /// Account identifier.
    pub id: Option<Uuid>,
}

/// Login credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address or phone number identifying the account.
    pub email_or_phone_number: Option<String>,
    pub password: Option<String>,
}

// =============================================================================
// Organization Models
// =============================================================================

/// A registered organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub postcode: String,
    pub number: String,
    pub email: String,
    /// Chain this organization belongs to, if any.
    pub chain_id: Option<Uuid>,
    /// Users managing this organization.
    pub managers: BTreeSet<Uuid>,
    pub created_at: i64,
}

/// Request to register or update an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub number: Option<String>,
    pub email: Option<String>,
}

/// Fully populated organization request.
#[derive(Debug, Clone)]
pub struct OrganizationFields {
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub postcode: String,
    pub number: String,
    pub email: String,
}

impl CreateOrganizationRequest {
    pub fn into_complete(self) -> Option<OrganizationFields> {
        Some(OrganizationFields {
            name: non_empty(self.name)?,
            country: non_empty(self.country)?,
            city: non_empty(self.city)?,
            address: non_empty(self.address)?,
            postcode: non_empty(self.postcode)?,
            number: non_empty(self.number)?,
            email: non_empty(self.email)?,
        })
    }
}

// =============================================================================
// Organization Chain Models
// =============================================================================

/// A named grouping of organizations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationChain {
    pub id: Uuid,
    pub name: String,
    pub organizations: BTreeSet<Uuid>,
}

/// Request to register an organization chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateChainRequest {
    pub name: Option<String>,
}

// =============================================================================
// News Models
// =============================================================================

/// A news article.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    /// Main image URL.
    pub featured_image: String,
    pub additional_images: Vec<String>,
}

/// Request to create or update a news article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub additional_images: Option<Vec<String>>,
}

/// Fully populated news request.
#[derive(Debug, Clone)]
pub struct NewsFields {
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub additional_images: Vec<String>,
}

impl CreateNewsRequest {
    pub fn into_complete(self) -> Option<NewsFields> {
        Some(NewsFields {
            title: non_empty(self.title)?,
            content: non_empty(self.content)?,
            featured_image: non_empty(self.featured_image)?,
            additional_images: self.additional_images?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_body_serializes_nulls() {
        let body: RestResponseBody<()> = RestResponseBody::failure("nope");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "nope");
        assert!(json["data"].is_null());
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn ok_body_has_null_message() {
        let body = RestResponseBody::ok("token".to_string());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["message"].is_null());
        assert_eq!(json["data"], "token");
    }

    #[test]
    fn incomplete_user_request_is_rejected() {
        let request = CreateUserRequest {
            name: Some("Ada".into()),
            surname: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            password: Some("  ".into()),
            phone_number: Some("+100".into()),
        };
        assert!(request.into_complete().is_none());
    }

    #[test]
    fn news_request_requires_image_list() {
        let request = CreateNewsRequest {
            title: Some("Title".into()),
            content: Some("Body".into()),
            featured_image: Some("https://img.example/1.png".into()),
            additional_images: None,
        };
        assert!(request.clone().into_complete().is_none());

        let complete = CreateNewsRequest {
            additional_images: Some(vec![]),
            ..request
        }
        .into_complete()
        .unwrap();
        assert_eq!(complete.title, "Title");
        assert!(complete.additional_images.is_empty());
    }

    #[test]
    fn login_request_uses_camel_case() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"emailOrPhoneNumber":"a@b.c","password":"pw"}"#).unwrap();
        assert_eq!(request.email_or_phone_number.as_deref(), Some("a@b.c"));
        assert_eq!(request.password.as_deref(), Some("pw"));
    }
}

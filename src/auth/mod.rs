// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless token authentication for the API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in at `POST /api/v1/public/auth` and receives an HS256
//!    token, both in the response body and as the `auth` cookie
//! 2. Client sends `Authorization: Bearer <token>` or the cookie back
//! 3. The [`AuthGateway`] middleware, for every non-exempt path:
//!    - decodes and verifies the token with the shared secret
//!    - resolves `sub` to a [`Principal`] through a [`PrincipalResolver`]
//!    - checks expiry and installs the principal into the request's
//!      [`AuthContext`]
//! 4. Handlers read the principal with the [`Auth`] extractor
//!
//! ## Security
//!
//! - Tokens expire 30 days after issuance; no leeway is applied
//! - Failures never reveal which check failed
//! - Token strings are never logged

pub mod claims;
pub mod context;
pub mod credential;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod path_policy;
pub mod resolver;
pub mod responder;
pub mod roles;
pub mod token;

pub use claims::Principal;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractor::{require_authority, require_self_or_authority, Auth};
pub use middleware::{auth_middleware, AuthGateway, GatewayOutcome};
pub use path_policy::PathPolicy;
pub use resolver::{PrincipalResolver, StorePrincipalResolver};
pub use roles::UserAuthority;
pub use token::TokenCodec;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OrgNet Server - Organization Management Backend
//!
//! Users, organizations, organization chains and news, served over a JSON
//! REST API. Every route outside the configured exemption patterns passes
//! through a stateless bearer-token gateway.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, authentication gateway and authorities
//! - `config` - Environment configuration
//! - `store` - In-memory repository

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from the environment once at startup. The loaded
//! configuration is immutable for the lifetime of the process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET_KEY` | HMAC-SHA256 secret used to sign and verify tokens | Required |
//! | `AUTH_EXCLUDED_PATHS` | Comma-separated path patterns that skip authentication | See [`DEFAULT_EXCLUDED_PATHS`] |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SEED_ADMIN_EMAIL` | Bootstrap admin account email | Optional |
//! | `SEED_ADMIN_PASSWORD` | Bootstrap admin account password | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable holding the token signing secret (`jwt.secret.key`).
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";

/// Environment variable overriding the authentication exemption list.
pub const EXCLUDED_PATHS_ENV: &str = "AUTH_EXCLUDED_PATHS";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Paths that bypass the authentication gateway unless overridden.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "/api/v1/public/**",
    "/favicon.ico",
    "/health/**",
    "/docs/**",
    "/api-doc/**",
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set to a non-empty value")]
    MissingSecret(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Bootstrap administrator credentials.
#[derive(Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Process-wide configuration, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub excluded_paths: Vec<String>,
    pub host: String,
    pub port: u16,
    pub seed_admin: Option<SeedAdmin>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("excluded_paths", &self.excluded_paths)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("seed_admin", &self.seed_admin)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup(JWT_SECRET_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret(JWT_SECRET_ENV))?;

        let excluded_paths = match lookup(EXCLUDED_PATHS_ENV) {
            Some(raw) => parse_path_list(&raw),
            None => DEFAULT_EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let seed_admin = match (lookup(SEED_ADMIN_EMAIL_ENV), lookup(SEED_ADMIN_PASSWORD_ENV)) {
            (Some(email), Some(password)) => Some(SeedAdmin { email, password }),
            _ => None,
        };

        Ok(Self {
            jwt_secret,
            excluded_paths,
            host,
            port,
            seed_admin,
        })
    }

    /// Socket address string to bind the HTTP listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

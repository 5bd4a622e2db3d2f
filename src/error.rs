// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::AuthError;
use crate::models::RestResponseBody;

pub const MSG_BAD_REQUEST: &str = "Bad request.";
pub const MSG_NOT_FOUND: &str = "Resource not found.";
pub const MSG_EMAIL_TAKEN: &str = "Email is already taken.";
pub const MSG_NAME_TAKEN: &str = "Name is already taken.";
pub const MSG_WRONG_LOGIN: &str = "Wrong login or password.";
pub const MSG_PHONE_TAKEN: &str = "Phone number is already taken.";
pub const MSG_EMAIL_CHANGE_FORBIDDEN: &str = "Email change is forbidden.";
pub const MSG_NAME_CHANGE_FORBIDDEN: &str = "Name change is forbidden.";
pub const MSG_PERMISSION_NOT_ALLOWED: &str = "Permission not allowed.";
pub const MSG_ALREADY_EXISTS: &str = "Item already exists.";
pub const MSG_INTERNAL_ERROR: &str = "Internal error.";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, MSG_PERMISSION_NOT_ALLOWED)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL_ERROR)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::bad_request(MSG_BAD_REQUEST)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(err.status_code(), err.public_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(RestResponseBody::<()>::failure(self.message));
        (self.status, body).into_response()
    }
}

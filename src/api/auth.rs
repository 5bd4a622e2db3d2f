// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and logout endpoints.
//!
//! Login issues a token in the body and mirrors it into the `auth` cookie so
//! browser clients can authenticate without handling the token themselves.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::{
    api::ok,
    auth::{
        credential::AUTH_COOKIE_NAME, password::verify_password, token::TOKEN_LIFETIME_SECS, Auth,
    },
    error::{ApiError, MSG_BAD_REQUEST, MSG_WRONG_LOGIN},
    models::{LoginRequest, RestResponseBody},
    state::AppState,
};

fn auth_cookie(token: &str, max_age: i64) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&format!(
        "{AUTH_COOKIE_NAME}={token}; HttpOnly; Secure; Path=/; Max-Age={max_age}"
    ))
    .map_err(|_| ApiError::internal())
}

#[utoipa::path(
    post,
    path = "/api/v1/public/auth",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued; also set as the `auth` cookie", body = String),
        (status = 400, description = "Wrong login or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let (Some(login), Some(password)) = (request.email_or_phone_number, request.password) else {
        return Err(ApiError::bad_request(MSG_BAD_REQUEST));
    };
    if login.trim().is_empty() {
        return Err(ApiError::bad_request(MSG_BAD_REQUEST));
    }

    let user_id = {
        let store = state.store.read().await;
        match store.user_by_login(&login) {
            Some(user) if verify_password(&user.password_hash, &password) => user.id,
            _ => {
                tracing::debug!("login rejected");
                return Err(ApiError::bad_request(MSG_WRONG_LOGIN));
            }
        }
    };

    let token = state.tokens.encode(user_id, Utc::now()).map_err(|e| {
        tracing::error!(error = %e, "failed to issue token");
        ApiError::internal()
    })?;
    state.store.write().await.touch_user(user_id);
    tracing::info!(user_id = %user_id, "user logged in");

    let cookie = auth_cookie(&token, TOKEN_LIFETIME_SECS)?;
    let mut response = ok(token).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// Clear the `auth` cookie and mark the user offline. Issued tokens stay
/// valid until they expire.
#[utoipa::path(
    post,
    path = "/api/v1/secure/auth/logout",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Cookie cleared"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Response, ApiError> {
    state.store.write().await.sign_out_user(principal.id);
    tracing::info!(user_id = %principal.id, "user logged out");
    let cookie = auth_cookie("", 0)?;
    let mut response = (StatusCode::OK, Json(RestResponseBody::<()>::empty())).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

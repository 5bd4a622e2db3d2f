// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{created, ok, Envelope},
    auth::{password::hash_password, require_self_or_authority, Auth, UserAuthority},
    error::{ApiError, MSG_BAD_REQUEST},
    models::{CreateUserRequest, UserConfidentialDto, UserDto, UserFields, UserLookupQuery},
    state::AppState,
};

fn complete(payload: Result<Json<CreateUserRequest>, JsonRejection>) -> Result<UserFields, ApiError> {
    let Json(request) = payload?;
    request
        .into_complete()
        .ok_or_else(|| ApiError::bad_request(MSG_BAD_REQUEST))
}

fn hashed(password: &str) -> Result<String, ApiError> {
    hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::internal()
    })
}

/// Look up a user by email or id.
#[utoipa::path(
    get,
    path = "/api/v1/public/user",
    params(UserLookupQuery),
    tag = "Users",
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Neither email nor id given"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserLookupQuery>,
) -> Result<(StatusCode, Envelope<UserDto>), ApiError> {
    let email = query.email.filter(|e| !e.trim().is_empty());
    let store = state.store.read().await;
    let user = match (email, query.id) {
        (Some(email), _) => store.user_by_email(&email),
        (None, Some(id)) => store.user(id),
        (None, None) => return Err(ApiError::bad_request(MSG_BAD_REQUEST)),
    };
    let user = user.ok_or_else(ApiError::not_found)?;
    Ok(ok(UserDto::from(user)))
}

/// Register a new account with the `User` authority.
#[utoipa::path(
    post,
    path = "/api/v1/public/user",
    request_body = CreateUserRequest,
    tag = "Users",
    responses(
        (status = 201, description = "User registered", body = UserDto),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "Email or phone number is already taken"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<UserDto>), ApiError> {
    let fields = complete(payload)?;
    let password_hash = hashed(&fields.password)?;

    let user = state
        .store
        .write()
        .await
        .insert_user(fields, password_hash, [UserAuthority::User])?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok(created(UserDto::from(&user)))
}

/// Get the current authenticated user's account details.
#[utoipa::path(
    get,
    path = "/api/v1/secure/user/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserConfidentialDto),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<(StatusCode, Envelope<UserConfidentialDto>), ApiError> {
    let store = state.store.read().await;
    let user = store.user(principal.id).ok_or_else(ApiError::not_found)?;
    Ok(ok(UserConfidentialDto::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/v1/secure/user/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = CreateUserRequest,
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Missing fields or email change"),
        (status = 403, description = "Not the account owner or an administrator"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Phone number is already taken"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<UserDto>), ApiError> {
    require_self_or_authority(&principal, id, UserAuthority::Admin)?;
    let fields = complete(payload)?;
    let password_hash = hashed(&fields.password)?;

    let user = state
        .store
        .write()
        .await
        .update_user(id, fields, password_hash)?;
    Ok(ok(UserDto::from(&user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/secure/user/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Not the account owner or an administrator"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_self_or_authority(&principal, id, UserAuthority::Admin)?;
    state.store.write().await.delete_user(id)?;
    tracing::info!(user_id = %id, deleted_by = %principal.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Organization endpoints.
//!
//! Any `Manager`+ may register an organization. Changing one requires being
//! one of its managers or holding `Admin`+; deletion always requires `Admin`+.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{created, ok, Envelope},
    auth::{require_authority, Auth, AuthError, Principal, UserAuthority},
    error::{ApiError, MSG_BAD_REQUEST},
    models::{CreateOrganizationRequest, Organization, OrganizationFields, UserDto},
    state::AppState,
    store::InMemoryStore,
};

fn complete(
    payload: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Result<OrganizationFields, ApiError> {
    let Json(request) = payload?;
    request
        .into_complete()
        .ok_or_else(|| ApiError::bad_request(MSG_BAD_REQUEST))
}

/// Admins, or `Manager`+ principals listed among the organization's managers.
pub(crate) fn require_manager_of(
    store: &InMemoryStore,
    principal: &Principal,
    organization_id: Uuid,
) -> Result<(), ApiError> {
    if principal.has_authority_at_least(UserAuthority::Admin) {
        return Ok(());
    }
    let organization = store.organization(organization_id)?;
    if principal.has_authority_at_least(UserAuthority::Manager)
        && organization.managers.contains(&principal.id)
    {
        Ok(())
    } else {
        Err(AuthError::InsufficientAuthority.into())
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/public/organization/{id}",
    params(("id" = Uuid, Path, description = "Organization identifier")),
    tag = "Organizations",
    responses(
        (status = 200, body = Organization),
        (status = 404, description = "Organization not found"),
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Envelope<Organization>), ApiError> {
    let store = state.store.read().await;
    Ok(ok(store.organization(id)?.clone()))
}

#[utoipa::path(
    post,
    path = "/api/v1/secure/organization",
    request_body = CreateOrganizationRequest,
    tag = "Organizations",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Organization),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Requires manager authority"),
        (status = 409, description = "Name is already taken"),
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    Auth(principal): Auth,
    payload: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Organization>), ApiError> {
    require_authority(&principal, UserAuthority::Manager)?;
    let fields = complete(payload)?;
    let organization = state.store.write().await.create_organization(fields)?;
    tracing::info!(organization_id = %organization.id, "organization created");
    Ok(created(organization))
}

#[utoipa::path(
    put,
    path = "/api/v1/secure/organization/{id}",
    params(("id" = Uuid, Path, description = "Organization identifier")),
    request_body = CreateOrganizationRequest,
    tag = "Organizations",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Organization),
        (status = 400, description = "Missing fields or name change"),
        (status = 403, description = "Not a manager of this organization"),
        (status = 404, description = "Organization not found"),
    )
)]
pub async fn update_organization(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
    payload: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Organization>), ApiError> {
    let fields = complete(payload)?;
    let mut store = state.store.write().await;
    require_manager_of(&store, &principal, id)?;
    Ok(ok(store.update_organization(id, fields)?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/secure/organization/{id}",
    params(("id" = Uuid, Path, description = "Organization identifier")),
    tag = "Organizations",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Requires admin authority"),
        (status = 404, description = "Organization not found"),
    )
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_authority(&principal, UserAuthority::Admin)?;
    state.store.write().await.delete_organization(id)?;
    tracing::info!(organization_id = %id, "organization deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/secure/organization/{id}/managers",
    params(("id" = Uuid, Path, description = "Organization identifier")),
    tag = "Organizations",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [UserDto]),
        (status = 404, description = "Organization not found"),
    )
)]
pub async fn list_managers(
    State(state): State<AppState>,
    Auth(_principal): Auth,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Envelope<Vec<UserDto>>), ApiError> {
    let store = state.store.read().await;
    let managers = store.managers(id)?.into_iter().map(UserDto::from).collect();
    Ok(ok(managers))
}

#[utoipa::path(
    post,
    path = "/api/v1/secure/organization/{id}/managers/{user_id}",
    params(
        ("id" = Uuid, Path, description = "Organization identifier"),
        ("user_id" = Uuid, Path, description = "User to make a manager")
    ),
    tag = "Organizations",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Organization),
        (status = 403, description = "Not a manager of this organization"),
        (status = 404, description = "Organization or user not found"),
        (status = 409, description = "User already manages an organization"),
    )
)]
pub async fn add_manager(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Envelope<Organization>), ApiError> {
    let mut store = state.store.write().await;
    require_manager_of(&store, &principal, id)?;
    Ok(ok(store.add_manager(id, user_id)?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/secure/organization/{id}/managers/{user_id}",
    params(
        ("id" = Uuid, Path, description = "Organization identifier"),
        ("user_id" = Uuid, Path, description = "Manager to remove")
    ),
    tag = "Organizations",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Not a manager of this organization"),
        (status = 404, description = "Organization or manager not found"),
    )
)]
pub async fn remove_manager(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    require_manager_of(&store, &principal, id)?;
    store.remove_manager(id, user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

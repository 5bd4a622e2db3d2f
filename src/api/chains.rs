// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{created, ok, organizations::require_manager_of, Envelope},
    auth::{require_authority, Auth, UserAuthority},
    error::{ApiError, MSG_BAD_REQUEST},
    models::{CreateChainRequest, Organization, OrganizationChain},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/secure/chain",
    request_body = CreateChainRequest,
    tag = "Chains",
    security(("bearer" = [])),
    responses(
        (status = 201, body = OrganizationChain),
        (status = 403, description = "Requires manager authority"),
        (status = 409, description = "Name is already taken"),
    )
)]
pub async fn create_chain(
    State(state): State<AppState>,
    Auth(principal): Auth,
    payload: Result<Json<CreateChainRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<OrganizationChain>), ApiError> {
    require_authority(&principal, UserAuthority::Manager)?;
    let Json(request) = payload?;
    let name = request
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(MSG_BAD_REQUEST))?;

    let chain = state.store.write().await.create_chain(name)?;
    tracing::info!(chain_id = %chain.id, "organization chain created");
    Ok(created(chain))
}

#[utoipa::path(
    get,
    path = "/api/v1/secure/chain/{chain_id}/organizations",
    params(("chain_id" = Uuid, Path, description = "Chain identifier")),
    tag = "Chains",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Organization]),
        (status = 404, description = "Chain not found"),
    )
)]
pub async fn list_chain_organizations(
    State(state): State<AppState>,
    Auth(_principal): Auth,
    Path(chain_id): Path<Uuid>,
) -> Result<(StatusCode, Envelope<Vec<Organization>>), ApiError> {
    let store = state.store.read().await;
    let organizations = store
        .chain_organizations(chain_id)?
        .into_iter()
        .cloned()
        .collect();
    Ok(ok(organizations))
}

/// Attach an organization to a chain. Callers must manage the organization.
#[utoipa::path(
    post,
    path = "/api/v1/secure/chain/{chain_id}/organizations/{organization_id}",
    params(
        ("chain_id" = Uuid, Path, description = "Chain identifier"),
        ("organization_id" = Uuid, Path, description = "Organization identifier")
    ),
    tag = "Chains",
    security(("bearer" = [])),
    responses(
        (status = 200, body = OrganizationChain),
        (status = 403, description = "Not a manager of this organization"),
        (status = 404, description = "Chain or organization not found"),
        (status = 409, description = "Organization already belongs to a chain"),
    )
)]
pub async fn add_organization(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path((chain_id, organization_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Envelope<OrganizationChain>), ApiError> {
    let mut store = state.store.write().await;
    require_manager_of(&store, &principal, organization_id)?;
    Ok(ok(store.add_organization_to_chain(chain_id, organization_id)?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/secure/chain/{chain_id}/organizations/{organization_id}",
    params(
        ("chain_id" = Uuid, Path, description = "Chain identifier"),
        ("organization_id" = Uuid, Path, description = "Organization identifier")
    ),
    tag = "Chains",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Not a manager of this organization"),
        (status = 404, description = "Chain or membership not found"),
    )
)]
pub async fn remove_organization(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path((chain_id, organization_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    require_manager_of(&store, &principal, organization_id)?;
    store.remove_organization_from_chain(chain_id, organization_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/secure/chain/{chain_id}",
    params(("chain_id" = Uuid, Path, description = "Chain identifier")),
    tag = "Chains",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Requires admin authority"),
        (status = 404, description = "Chain not found"),
    )
)]
pub async fn delete_chain(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(chain_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_authority(&principal, UserAuthority::Admin)?;
    state.store.write().await.delete_chain(chain_id)?;
    tracing::info!(chain_id = %chain_id, "organization chain deleted");
    Ok(StatusCode::NO_CONTENT)
}

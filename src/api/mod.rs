// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{auth_middleware, Principal, UserAuthority},
    models::{
        CreateChainRequest, CreateNewsRequest, CreateOrganizationRequest, CreateUserRequest,
        LoginRequest, News, Organization, OrganizationChain, RestResponseBody, UserConfidentialDto,
        UserDto,
    },
    state::AppState,
};

pub mod auth;
pub mod chains;
pub mod health;
pub mod news;
pub mod organizations;
pub mod users;

/// JSON envelope returned by every handler.
pub type Envelope<T> = Json<RestResponseBody<T>>;

pub(crate) fn ok<T>(data: T) -> (StatusCode, Envelope<T>) {
    (StatusCode::OK, Json(RestResponseBody::ok(data)))
}

pub(crate) fn created<T>(data: T) -> (StatusCode, Envelope<T>) {
    (StatusCode::CREATED, Json(RestResponseBody::ok(data)))
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth", post(auth::login))
        .route("/user", get(users::get_user).post(users::register))
        .route("/news", get(news::list_news))
        .route("/news/{id}", get(news::get_news))
        .route("/organization/{id}", get(organizations::get_organization));

    let secure_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/user/me", get(users::get_current_user))
        .route(
            "/user/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/news", post(news::create_news))
        .route(
            "/news/{id}",
            put(news::update_news).delete(news::delete_news),
        )
        .route("/organization", post(organizations::create_organization))
        .route(
            "/organization/{id}",
            put(organizations::update_organization).delete(organizations::delete_organization),
        )
        .route("/organization/{id}/managers", get(organizations::list_managers))
        .route(
            "/organization/{id}/managers/{user_id}",
            post(organizations::add_manager).delete(organizations::remove_manager),
        )
        .route("/chain", post(chains::create_chain))
        .route("/chain/{chain_id}", delete(chains::delete_chain))
        .route(
            "/chain/{chain_id}/organizations",
            get(chains::list_chain_organizations),
        )
        .route(
            "/chain/{chain_id}/organizations/{organization_id}",
            post(chains::add_organization).delete(chains::remove_organization),
        );

    let gateway = state.gateway.clone();

    Router::new()
        .nest("/api/v1/public", public_routes)
        .nest("/api/v1/secure", secure_routes)
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(gateway, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::logout,
        users::get_user,
        users::register,
        users::get_current_user,
        users::update_user,
        users::delete_user,
        news::list_news,
        news::get_news,
        news::create_news,
        news::update_news,
        news::delete_news,
        organizations::get_organization,
        organizations::create_organization,
        organizations::update_organization,
        organizations::delete_organization,
        organizations::list_managers,
        organizations::add_manager,
        organizations::remove_manager,
        chains::create_chain,
        chains::delete_chain,
        chains::list_chain_organizations,
        chains::add_organization,
        chains::remove_organization,
        health::liveness
    ),
    components(
        schemas(
            Principal,
            UserAuthority,
            UserDto,
            UserConfidentialDto,
            CreateUserRequest,
            LoginRequest,
            News,
            CreateNewsRequest,
            Organization,
            CreateOrganizationRequest,
            OrganizationChain,
            CreateChainRequest,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and logout"),
        (name = "Users", description = "Registration and account management"),
        (name = "News", description = "News articles"),
        (name = "Organizations", description = "Organizations and their managers"),
        (name = "Chains", description = "Organization chains"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request},
    };
    use tower::ServiceExt;

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn secure_route_requires_credential() {
        let app = router(test_state());
        let request = Request::get("/api/v1/secure/user/me")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], crate::auth::error::MISSING_MSG);
    }

    #[tokio::test]
    async fn secure_route_with_bearer() {
        let state = test_state();
        let user = add_user(&state, "me@example.com", UserAuthority::User).await;
        let app = router(state.clone());
        let request = Request::get("/api/v1/secure/user/me")
            .header(AUTHORIZATION, bearer_for(&state, &user))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], user.id.to_string());
        assert_eq!(body["data"]["email"], "me@example.com");
    }

    #[tokio::test]
    async fn public_and_ambient_routes_are_open() {
        let app = router(test_state());

        for path in ["/api/v1/public/news", "/health/live", "/api-doc/openapi.json"] {
            let request = Request::get(path).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn public_user_lookup_is_routed() {
        let state = test_state();
        let user = add_user(&state, "lookup@example.com", UserAuthority::User).await;
        let app = router(state);

        let request = Request::get("/api/v1/public/user?email=lookup@example.com")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], user.id.to_string());

        let request = Request::get(format!("/api/v1/public/user?id={}", user.id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::get("/api/v1/public/user").body(Body::empty()).unwrap();
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let request = Request::get("/api/v1/public/user?email=nobody@example.com")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_secure_path_is_still_guarded() {
        let app = router(test_state());
        let request = Request::get("/api/v1/secure/does-not-exist")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_id_is_propagated() {
        let app = router(test_state());
        let request = Request::get("/health/live").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn openapi_lists_secure_and_public_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/public/auth"));
        assert!(doc.paths.paths.contains_key("/api/v1/public/user"));
        assert!(doc.paths.paths.contains_key("/api/v1/secure/user/me"));
        assert!(doc
            .components
            .as_ref()
            .unwrap()
            .security_schemes
            .contains_key("bearer"));
    }
}

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
    api::{created, ok, Envelope},
    auth::{require_authority, Auth, UserAuthority},
    error::{ApiError, MSG_BAD_REQUEST},
    models::{CreateNewsRequest, News, NewsFields},
    state::AppState,
};

fn complete(payload: Result<Json<CreateNewsRequest>, JsonRejection>) -> Result<NewsFields, ApiError> {
    let Json(request) = payload?;
    request
        .into_complete()
        .ok_or_else(|| ApiError::bad_request(MSG_BAD_REQUEST))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/news",
    tag = "News",
    responses((status = 200, description = "All news, newest first", body = [News]))
)]
pub async fn list_news(State(state): State<AppState>) -> (StatusCode, Envelope<Vec<News>>) {
    let store = state.store.read().await;
    ok(store.list_news())
}

#[utoipa::path(
    get,
    path = "/api/v1/public/news/{id}",
    params(("id" = Uuid, Path, description = "News identifier")),
    tag = "News",
    responses(
        (status = 200, body = News),
        (status = 404, description = "News not found"),
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Envelope<News>), ApiError> {
    let store = state.store.read().await;
    Ok(ok(store.news(id)?.clone()))
}

#[utoipa::path(
    post,
    path = "/api/v1/secure/news",
    request_body = CreateNewsRequest,
    tag = "News",
    security(("bearer" = [])),
    responses(
        (status = 201, body = News),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Requires moderator authority"),
    )
)]
pub async fn create_news(
    State(state): State<AppState>,
    Auth(principal): Auth,
    payload: Result<Json<CreateNewsRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<News>), ApiError> {
    require_authority(&principal, UserAuthority::Moderator)?;
    let fields = complete(payload)?;
    let news = state.store.write().await.create_news(fields);
    tracing::info!(news_id = %news.id, author = %principal.id, "news created");
    Ok(created(news))
}

#[utoipa::path(
    put,
    path = "/api/v1/secure/news/{id}",
    params(("id" = Uuid, Path, description = "News identifier")),
    request_body = CreateNewsRequest,
    tag = "News",
    security(("bearer" = [])),
    responses(
        (status = 200, body = News),
        (status = 403, description = "Requires moderator authority"),
        (status = 404, description = "News not found"),
    )
)]
pub async fn update_news(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
    payload: Result<Json<CreateNewsRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<News>), ApiError> {
    require_authority(&principal, UserAuthority::Moderator)?;
    let fields = complete(payload)?;
    let news = state.store.write().await.update_news(id, fields)?;
    Ok(ok(news))
}

#[utoipa::path(
    delete,
    path = "/api/v1/secure/news/{id}",
    params(("id" = Uuid, Path, description = "News identifier")),
    tag = "News",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Requires moderator authority"),
        (status = 404, description = "News not found"),
    )
)]
pub async fn delete_news(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_authority(&principal, UserAuthority::Moderator)?;
    state.store.write().await.delete_news(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::*;

    fn article(title: &str) -> CreateNewsRequest {
        CreateNewsRequest {
            title: Some(title.into()),
            content: Some("Body".into()),
            featured_image: Some("https://img.example/a.png".into()),
            additional_images: Some(vec![]),
        }
    }

    #[tokio::test]
    async fn moderator_publishes_and_public_reads() {
        let state = test_state();
        let moderator = add_user(&state, "mod@example.com", UserAuthority::Moderator).await;

        let (status, Json(body)) = create_news(
            State(state.clone()),
            Auth(principal_of(&moderator)),
            Ok(Json(article("Opening day"))),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let news = body.data.unwrap();

        let (_, Json(body)) = get_news(State(state.clone()), Path(news.id)).await.unwrap();
        assert_eq!(body.data.unwrap().title, "Opening day");

        let (_, Json(body)) = list_news(State(state)).await;
        assert_eq!(body.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn plain_user_cannot_publish() {
        let state = test_state();
        let user = add_user(&state, "user@example.com", UserAuthority::User).await;

        let err = create_news(State(state), Auth(principal_of(&user)), Ok(Json(article("x"))))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_news_is_not_found() {
        let err = get_news(State(test_state()), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let state = test_state();
        let admin = add_user(&state, "admin@example.com", UserAuthority::Admin).await;
        let news = state
            .store
            .write()
            .await
            .create_news(article("Old").into_complete().unwrap());

        let (_, Json(body)) = update_news(
            State(state.clone()),
            Auth(principal_of(&admin)),
            Path(news.id),
            Ok(Json(article("New"))),
        )
        .await
        .unwrap();
        assert_eq!(body.data.unwrap().title, "New");

        let status = delete_news(State(state.clone()), Auth(principal_of(&admin)), Path(news.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.read().await.news(news.id).is_err());
    }
}

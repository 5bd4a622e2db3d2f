// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Terminal failure responses for the authentication gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::RestResponseBody;

/// `401 Unauthorized` with a `{success:false, message, data:null}` body.
///
/// The body is fully buffered, so nothing further is written once the
/// gateway hands this response back.
pub fn unauthorized(message: &str) -> Response {
    failure(StatusCode::UNAUTHORIZED, message)
}

pub fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(RestResponseBody::<()>::failure(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::header::CONTENT_TYPE};

    #[tokio::test]
    async fn unauthorized_is_json_401() {
        let response = unauthorized("nope");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "nope");
        assert!(body["data"].is_null());
        assert!(body["timestamp"].is_i64());
    }
}

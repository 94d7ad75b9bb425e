//! REST API endpoints.
//!
//! Axum-based HTTP boundary over the query pipelines. Every failure is
//! answered with a JSON body of the form `{"detail": "..."}`.

pub mod routes;
pub mod state;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::PipelineError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    BadGateway(String),
}

impl ApiError {
    fn detail(self) -> String {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::BadGateway(msg) => msg,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            tracing::warn!("{}", self);
        }

        let body = ErrorResponse {
            detail: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            PipelineError::NotFound(msg) => ApiError::NotFound(msg),
            PipelineError::Upstream(e) => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/players", get(routes::players::list_players))
        .route("/players/player/info", get(routes::players::player_info))
        .route("/players/player/awards", get(routes::players::player_awards))
        .route(
            "/players/stats/career/:player_id",
            get(routes::stats::career_stats),
        )
        .route(
            "/players/stats/advanced/:player_id",
            get(routes::stats::advanced_stats),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for read-only access from `origin` ("*" allows any).
pub fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET]),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
            CorsLayer::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::build_router;
    use super::state::AppState;
    use crate::upstream::mock::MockProvider;

    pub async fn get_json(provider: Arc<MockProvider>, uri: &str) -> (StatusCode, Value) {
        let app = build_router(AppState::new(provider));
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamError;

    #[test]
    fn test_pipeline_error_mapping() {
        let err: ApiError = PipelineError::InvalidArgument("missing".into()).into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "missing"));

        let err: ApiError = PipelineError::NotFound("gone".into()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = PipelineError::Upstream(UpstreamError::HttpStatus {
            status: 503,
            message: "Service Unavailable".into(),
        })
        .into();
        assert!(matches!(err, ApiError::BadGateway(ref m) if m.contains("503")));
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadGateway("x".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_detail_is_bare_message() {
        assert_eq!(
            ApiError::NotFound("No players found with that name".into()).detail(),
            "No players found with that name"
        );
    }
}

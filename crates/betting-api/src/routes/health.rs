//! 헬스 체크 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /` - 서비스 liveness 메시지
//! - `GET /health` - 저장소 연결 상태 확인

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use betting_core::AccountStore;

use crate::state::AppState;

// ==================== 응답 타입 ====================

/// 루트 liveness 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    /// 서비스 동작 메시지
    pub message: String,
}

/// 헬스 체크 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 상태 ("OK" 또는 "Error")
    pub status: String,
    /// 저장소 상태 ("Connected" 또는 "Disconnected")
    pub database: String,
}

// ==================== handler ====================

/// 루트 liveness 메시지.
///
/// GET /
pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Betting API is running!".to_string(),
    })
}

/// 저장소 연결 확인.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK".to_string(),
                database: "Connected".to_string(),
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "Error".to_string(),
                    database: "Disconnected".to_string(),
                }),
            )
        }
    }
}

// ==================== router ====================

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_message() {
        let app = health_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: RootResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Betting API is running!");
    }

    #[tokio::test]
    async fn test_health_check_connected() {
        let app = health_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "OK");
        assert_eq!(body.database, "Connected");
    }
}

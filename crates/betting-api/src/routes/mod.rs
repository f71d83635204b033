//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `GET /` - liveness 메시지
//! - `GET /health` - 저장소 연결 확인
//! - `POST /auth/register` - 회원가입
//! - `POST /auth/login` - 로그인
//! - `GET /api/admin` - 관리자 대시보드 (admin 전용)
//! - `GET /api/user` - 사용자 대시보드 (user 전용)
//! - `GET /api/operator` - 운영자 대시보드 (operator 전용)

pub mod auth;
pub mod dashboard;
pub mod health;

pub use auth::{auth_router, AuthResponse, LoginRequest, RegisterRequest, UserView};
pub use dashboard::{
    dashboard_router, AdminDashboardResponse, CallerIdentity, OperatorDashboardResponse,
    UserDashboardResponse,
};
pub use health::{health_router, HealthResponse, RootResponse};

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .nest("/auth", auth_router())
        .nest("/api", dashboard_router())
}

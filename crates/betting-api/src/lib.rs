//! Betting API - 계정 서비스 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회원가입, 로그인, 역할별 대시보드)
//! - JWT 발급/검증 및 역할 기반 접근 제어
//! - Argon2id 비밀번호 해싱
//! - PostgreSQL / 인메모리 계정 저장소
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - `auth` - JWT, 비밀번호 해싱, 인증 extractor
//! - `config` - 서버/데이터베이스 설정
//! - `error` - API 에러 타입
//! - `repository` - `AccountStore` 구현체
//! - `routes` - HTTP 엔드포인트
//! - `state` - 애플리케이션 공유 상태

pub mod auth;
pub mod config;
pub mod error;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    create_token, decode_token, hash_password, require_role, verify_password, AuthKeys, Claims,
    JwtAuth, JwtError, PasswordError, Role, TOKEN_TTL_MINUTES,
};
pub use config::{DatabaseConfig, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use repository::{MemoryAccountStore, PgAccountStore};
pub use routes::{
    auth_router, create_api_router, dashboard_router, health_router, AdminDashboardResponse,
    AuthResponse, CallerIdentity, HealthResponse, LoginRequest, OperatorDashboardResponse,
    RegisterRequest, RootResponse, UserDashboardResponse, UserView,
};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;

//! 역할별 대시보드 endpoint.
//!
//! 모든 엔드포인트는 유효한 Bearer 토큰과 정확히 일치하는 역할을
//! 요구합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/admin` - 관리자 대시보드 (전체 계정 목록)
//! - `GET /api/user` - 사용자 대시보드 (본인 프로필)
//! - `GET /api/operator` - 운영자 대시보드

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use betting_core::{AccountProfile, AccountStore, Role};

use crate::auth::{require_role, Claims, JwtAuth};
use crate::error::ApiError;
use crate::state::AppState;

// ==================== 응답 타입 ====================

/// 토큰에서 추출한 호출자 식별 정보.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// 계정 ID
    pub id: Uuid,
    /// 역할
    pub role: Role,
}

impl From<&Claims> for CallerIdentity {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// 관리자 대시보드 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminDashboardResponse {
    /// 결과 메시지
    pub message: String,
    /// 전체 계정 프로필 목록 (최신 가입 순)
    pub users: Vec<AccountProfile>,
    /// 호출한 관리자
    pub admin: CallerIdentity,
}

/// 사용자 대시보드 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDashboardResponse {
    /// 결과 메시지
    pub message: String,
    /// 본인 프로필
    pub user: AccountProfile,
}

/// 운영자 대시보드 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct OperatorDashboardResponse {
    /// 결과 메시지
    pub message: String,
    /// 호출한 운영자
    pub operator: CallerIdentity,
    /// 운영 중인 이벤트 목록 (이벤트 도메인 구현 전까지 빈 목록)
    pub events: Vec<serde_json::Value>,
}

// ==================== handler ====================

/// 관리자 대시보드.
///
/// GET /api/admin
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> Result<Json<AdminDashboardResponse>, ApiError> {
    require_role(Role::Admin, &claims)?;

    let users = state.store.list_profiles().await?;

    Ok(Json(AdminDashboardResponse {
        message: "Admin dashboard data".to_string(),
        users,
        admin: CallerIdentity::from(&claims),
    }))
}

/// 사용자 대시보드.
///
/// GET /api/user
pub async fn user_dashboard(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> Result<Json<UserDashboardResponse>, ApiError> {
    require_role(Role::User, &claims)?;

    // 토큰은 유효하지만 계정이 삭제된 경우 404
    let user = state
        .store
        .find_profile(claims.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(UserDashboardResponse {
        message: "User dashboard data".to_string(),
        user,
    }))
}

/// 운영자 대시보드.
///
/// GET /api/operator
pub async fn operator_dashboard(
    JwtAuth(claims): JwtAuth,
) -> Result<Json<OperatorDashboardResponse>, ApiError> {
    require_role(Role::Operator, &claims)?;

    Ok(Json(OperatorDashboardResponse {
        message: "Operator dashboard data".to_string(),
        operator: CallerIdentity::from(&claims),
        events: Vec::new(),
    }))
}

// ==================== router ====================

/// 대시보드 라우터 생성.
pub fn dashboard_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/user", get(user_dashboard))
        .route("/operator", get(operator_dashboard))
}

// ==================== 테스트 ====================

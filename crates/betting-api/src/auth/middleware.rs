//! 인증 미들웨어.
//!
//! Authorization 헤더의 Bearer 토큰을 검증하는 extractor와
//! 역할 검사 함수를 제공합니다.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use betting_core::Role;

use crate::auth::jwt::{decode_token, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// 인증된 요청에서 Claims를 추출하는 extractor.
///
/// Authorization 헤더를 공백으로 나눈 뒤 두 번째 조각을 토큰으로
/// 사용합니다. 헤더가 없거나 토큰 조각이 없으면 401, 검증에
/// 실패하면 403을 반환합니다.
///
/// # 사용 예시
///
/// ```ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Hello, {}!", claims.id)
/// }
/// ```
pub struct JwtAuth(pub Claims);

impl FromRequestParts<Arc<AppState>> for JwtAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let token = header
            .split_whitespace()
            .nth(1)
            .ok_or(ApiError::MissingToken)?;

        let token_data = decode_token(token, &state.auth).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            ApiError::InvalidToken
        })?;

        Ok(JwtAuth(token_data.claims))
    }
}

/// 역할 검사.
///
/// 호출자의 역할이 요구 역할과 정확히 일치해야 통과합니다.
/// 역할 간 상하 관계는 없으므로 admin 토큰으로 user 전용
/// 엔드포인트에 접근할 수 없습니다.
pub fn require_role(required: Role, claims: &Claims) -> Result<(), ApiError> {
    if claims.role == required {
        Ok(())
    } else {
        Err(ApiError::AccessDenied)
    }
}

// ==================== 테스트 ====================

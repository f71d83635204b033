//! API 에러 타입.
//!
//! 모든 핸들러가 사용하는 공통 에러 타입을 정의합니다.
//! 각 variant는 HTTP 상태 코드와 클라이언트에 노출되는 메시지로 변환되며,
//! 응답 바디는 항상 `{"error": "<메시지>"}` 형태입니다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use betting_core::StoreError;

use crate::auth::{JwtError, PasswordError};

/// API 에러.
///
/// `Internal`의 상세 내용은 서버 로그에만 남고 클라이언트에는
/// 일반화된 메시지만 전달됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 필수 필드 누락 (400)
    #[error("{0}")]
    MissingFields(&'static str),

    /// 이메일 중복 가입 시도 (400)
    #[error("User already exists")]
    AccountExists,

    /// 이메일 없음 또는 비밀번호 불일치 (400)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authorization 헤더에 토큰 없음 (401)
    #[error("No token provided")]
    MissingToken,

    /// 서명 불일치, 만료, 형식 오류 등 검증 실패 (403)
    #[error("Invalid token")]
    InvalidToken,

    /// 역할 불일치 (403)
    #[error("Access denied")]
    AccessDenied,

    /// 토큰은 유효하지만 계정 레코드 없음 (404)
    #[error("User not found")]
    NotFound,

    /// 저장소 장애 등 내부 오류 (500)
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// HTTP 상태 코드 매핑.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ApiError::AccountExists => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            tracing::error!(detail = %detail, "Request failed with internal error");
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => ApiError::AccountExists,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// API Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::MissingFields("Email and password are required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::AccountExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("db down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(ApiError::AccountExists.to_string(), "User already exists");
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(ApiError::MissingToken.to_string(), "No token provided");
        assert_eq!(ApiError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(ApiError::AccessDenied.to_string(), "Access denied");
        assert_eq!(ApiError::NotFound.to_string(), "User not found");

        // 내부 상세는 클라이언트 메시지에 노출되지 않는다
        let err = ApiError::Internal("connection refused".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = ApiError::AccessDenied.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Access denied" }));
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ApiError = StoreError::DuplicateEmail("a@b.com".to_string()).into();
        assert!(matches!(err, ApiError::AccountExists));

        let err: ApiError = StoreError::database("timeout").into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}

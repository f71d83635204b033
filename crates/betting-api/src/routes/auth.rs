//! 인증 endpoint.
//!
//! 회원가입과 로그인을 처리하고 JWT 토큰을 발급합니다.
//!
//! # 엔드포인트
//!
//! - `POST /auth/register` - 회원가입 (기본 역할 user 부여)
//! - `POST /auth/login` - 로그인

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use betting_core::{AccountStore, AccountWithRole, NewAccount, Role, RoleRecord};

use crate::auth::{create_token, hash_password, verify_password, Claims};
use crate::error::ApiError;
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 회원가입 요청.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 이메일 (계정 식별자)
    #[serde(default)]
    pub email: Option<String>,
    /// 평문 비밀번호
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// 필수 필드 확인. 누락되거나 빈 필드가 있으면 에러.
    fn validate(self) -> Result<(String, String, String), ApiError> {
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password))
                if !name.is_empty() && !email.is_empty() && !password.is_empty() =>
            {
                Ok((name, email, password))
            }
            _ => Err(ApiError::MissingFields(
                "Name, email and password are required",
            )),
        }
    }
}

/// 로그인 요청.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 이메일
    #[serde(default)]
    pub email: Option<String>,
    /// 평문 비밀번호
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    fn validate(self) -> Result<(String, String), ApiError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(ApiError::MissingFields("Email and password are required")),
        }
    }
}

/// 인증 응답에 포함되는 사용자 정보.
///
/// 비밀번호 해시는 절대 포함되지 않습니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    /// 계정 ID
    pub id: Uuid,
    /// 표시 이름
    pub name: String,
    /// 이메일
    pub email: String,
    /// 역할
    pub role: Role,
}

impl From<&AccountWithRole> for UserView {
    fn from(account: &AccountWithRole) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

/// 회원가입/로그인 성공 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// 결과 메시지
    pub message: String,
    /// 발급된 JWT 토큰
    pub token: String,
    /// 사용자 정보
    pub user: UserView,
}

// ==================== handler ====================

/// 회원가입.
///
/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (name, email, password) = payload.validate()?;

    if state.store.find_by_email(&email).await?.is_some() {
        return Err(ApiError::AccountExists);
    }

    let password_hash = hash_password(&password)?;
    let account = state
        .store
        .insert_account(NewAccount::new(name, email, password_hash))
        .await?;

    let role = resolve_default_role(state.store.as_ref()).await?;
    state.store.assign_role(account.id, role.id).await?;

    let claims = Claims::new(account.id, Role::User);
    let token = create_token(&claims, &state.auth)?;

    info!(account_id = %account.id, "New account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: UserView {
                id: account.id,
                name: account.name,
                email: account.email,
                role: Role::User,
            },
        }),
    ))
}

/// 로그인.
///
/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = payload.validate()?;

    // 존재하지 않는 이메일과 비밀번호 불일치는 같은 에러로 응답한다.
    // 계정 존재 여부를 응답으로 구분할 수 없어야 한다.
    let Some(account) = state.store.find_for_login(&email).await? else {
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&password, &account.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let claims = Claims::new(account.id, account.role);
    let token = create_token(&claims, &state.auth)?;

    info!(account_id = %account.id, "Login successful");

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserView::from(&account),
    }))
}

/// 기본 역할("user") 레코드 확보.
///
/// 역할이 없으면 만든 뒤 다시 조회합니다. 생성은 충돌 무시 insert이므로
/// 동시에 들어온 최초 가입 두 건이 모두 이 경로를 통과해도 안전합니다.
async fn resolve_default_role(store: &dyn AccountStore) -> Result<RoleRecord, ApiError> {
    if let Some(role) = store.find_role(Role::User.as_str()).await? {
        return Ok(role);
    }

    store
        .insert_role(Role::User.as_str(), "Regular user")
        .await?;

    store
        .find_role(Role::User.as_str())
        .await?
        .ok_or_else(|| ApiError::Internal("default role missing after insert".to_string()))
}

// ==================== router ====================

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::decode_token;
    use crate::state::create_test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> (Router, AppState) {
        let state = create_test_state();
        let app = Router::new()
            .nest("/auth", auth_router())
            .with_state(Arc::new(state.clone()));
        (app, state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_creates_account() {
        let (app, state) = test_app();

        let response = app
            .oneshot(post_json(
                "/auth/register",
                json!({ "name": "Ana", "email": "ana@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: AuthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "User created successfully");
        assert_eq!(body.user.name, "Ana");
        assert_eq!(body.user.email, "ana@example.com");
        assert_eq!(body.user.role, Role::User);

        // 발급된 토큰이 해당 계정과 역할을 담고 있어야 한다
        let decoded = decode_token(&body.token, &state.auth).unwrap();
        assert_eq!(decoded.claims.id, body.user.id);
        assert_eq!(decoded.claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(post_json(
                "/auth/register",
                json!({ "email": "ana@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Name, email and password are required");
    }

    #[tokio::test]
    async fn test_register_empty_field_rejected() {
        let (app, _state) = test_app();

        // 빈 문자열도 누락으로 취급한다
        let response = app
            .oneshot(post_json(
                "/auth/register",
                json!({ "name": "", "email": "ana@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Name, email and password are required");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (app, _state) = test_app();

        let payload = json!({ "name": "Ana", "email": "ana@example.com", "password": "secret123" });

        let response = app
            .clone()
            .oneshot(post_json("/auth/register", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(post_json("/auth/register", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(body["error"], "User already exists");
    }

    #[tokio::test]
    async fn test_login_success() {
        let (app, state) = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/register",
                json!({ "name": "Ana", "email": "ana@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(post_json(
                "/auth/login",
                json!({ "email": "ana@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: AuthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Login successful");
        assert_eq!(body.user.role, Role::User);

        let decoded = decode_token(&body.token, &state.auth).unwrap();
        assert_eq!(decoded.claims.id, body.user.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_identically() {
        let (app, _state) = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/register",
                json!({ "name": "Ana", "email": "ana@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // 비밀번호 불일치
        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/login",
                json!({ "email": "ana@example.com", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let wrong_password_body = read_json(response).await;

        // 존재하지 않는 이메일
        let response = app
            .oneshot(post_json(
                "/auth/login",
                json!({ "email": "nobody@example.com", "password": "secret123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let unknown_email_body = read_json(response).await;

        // 두 실패는 응답으로 구분할 수 없어야 한다
        assert_eq!(wrong_password_body, unknown_email_body);
        assert_eq!(wrong_password_body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(post_json("/auth/login", json!({ "email": "ana@example.com" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Email and password are required");
    }
}

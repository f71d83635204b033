//! JWT 토큰 생성 및 검증.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use betting_core::Role;

/// 발급 토큰의 유효 기간 (분).
pub const TOKEN_TTL_MINUTES: i64 = 15;

/// JWT Claims 구조체.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 계정 ID
    pub id: Uuid,
    /// 계정 역할
    pub role: Role,
    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성. 만료 시간은 발급 시점 기준 15분 후입니다.
    pub fn new(account_id: Uuid, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: account_id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp(),
        }
    }

    /// 토큰 만료 여부 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT 관련 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// 토큰 인코딩 실패
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    /// 토큰 디코딩 실패
    #[error("토큰 디코딩 실패")]
    DecodingError,

    /// 토큰 만료
    #[error("토큰이 만료되었습니다")]
    TokenExpired,

    /// 유효하지 않은 토큰
    #[error("잘못된 토큰 형식")]
    InvalidToken,

    /// JWT_SECRET 환경변수 미설정
    #[error("JWT_SECRET 환경변수가 설정되지 않았습니다")]
    MissingSecret,
}

/// 서명 및 검증 키 쌍.
///
/// 시크릿은 프로세스 시작 시 한 번 로드되며 이후 요청 처리 중에는
/// 환경변수를 다시 읽지 않습니다.
#[derive(Clone)]
pub struct AuthKeys {
    /// 토큰 서명용 키
    pub encoding: EncodingKey,
    /// 토큰 검증용 키
    pub decoding: DecodingKey,
}

impl AuthKeys {
    /// 시크릿 문자열로부터 키 쌍 생성.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// `JWT_SECRET` 환경변수로부터 키 쌍 생성.
    ///
    /// # Errors
    ///
    /// 환경변수가 없으면 `JwtError::MissingSecret`을 반환합니다.
    /// 서버는 이 경우 기동을 거부해야 합니다.
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;
        Ok(Self::from_secret(&secret))
    }
}

/// JWT 토큰 생성.
pub fn create_token(claims: &Claims, keys: &AuthKeys) -> Result<String, JwtError> {
    encode(&Header::default(), claims, &keys.encoding).map_err(JwtError::from)
}

/// JWT 토큰 디코딩 및 검증.
///
/// 서명과 만료 시간을 모두 검증합니다.
pub fn decode_token(token: &str, keys: &AuthKeys) -> Result<TokenData<Claims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(token, &keys.decoding, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::InvalidToken,
        _ => JwtError::DecodingError,
    })
}

// ==================== 테스트 ====================

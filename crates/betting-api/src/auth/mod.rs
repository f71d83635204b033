//! 인증 및 권한 부여 모듈.
//!
//! # 구성 요소
//!
//! - `jwt` - JWT 토큰 생성/검증 및 서명 키 관리
//! - `middleware` - Bearer 토큰 extractor 및 역할 검사
//! - `password` - Argon2id 비밀번호 해싱/검증

mod jwt;
mod middleware;
mod password;

pub use betting_core::Role;
pub use jwt::{
    create_token, decode_token, AuthKeys, Claims, JwtError, TOKEN_TTL_MINUTES,
};
pub use middleware::{require_role, JwtAuth};
pub use password::{hash_password, verify_password, PasswordError};

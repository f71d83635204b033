//! 비밀번호 해싱 및 검증.
//!
//! Argon2id 알고리즘을 사용하여 비밀번호를 해싱하고 검증합니다.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// 해싱 실패
    #[error("비밀번호 해싱 실패: {0}")]
    HashingFailed(String),
}

/// 비밀번호를 Argon2id로 해싱.
///
/// 호출마다 새로운 랜덤 salt를 생성하므로 같은 비밀번호라도
/// 매번 다른 해시가 나옵니다.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(hash.to_string())
}

/// 비밀번호와 저장된 해시 비교.
///
/// 해시가 손상되었거나 형식이 잘못된 경우에도 panic 없이 `false`를
/// 반환합니다. 호출자는 실패 원인을 구분할 수 없습니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// ==================== 테스트 ====================

//! 계정 저장소의 에러 타입.
//!
//! 이 모듈은 저장소 구현 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 계정 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 이미 등록된 이메일
    #[error("이미 등록된 이메일: {0}")]
    DuplicateEmail(String),

    /// 손상된 레코드
    #[error("손상된 레코드: {0}")]
    Corrupt(String),
}

/// 저장소 작업을 위한 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// 데이터베이스 에러를 생성합니다.
    pub fn database(msg: impl Into<String>) -> Self {
        StoreError::Database(msg.into())
    }

    /// 손상된 레코드 에러를 생성합니다.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        StoreError::Corrupt(msg.into())
    }

    /// 유니크 제약 충돌인지 확인합니다.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateEmail(_))
    }
}

//! 계정 레코드.
//!
//! 이 모듈은 계정 관련 타입을 정의합니다:
//! - `Account` - 저장된 계정 레코드
//! - `NewAccount` - 계정 생성 입력
//! - `AccountWithRole` - 로그인 조회 결과 (비밀번호 해시 포함)
//! - `AccountProfile` - 외부 노출용 계정 정보 (해시 제외)
//! - `RoleRecord` - 역할 레코드

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Role;

/// 저장된 계정 레코드.
///
/// 비밀번호 해시를 포함하므로 직렬화하지 않습니다.
#[derive(Debug, Clone)]
pub struct Account {
    /// 계정 ID
    pub id: Uuid,
    /// 표시 이름
    pub name: String,
    /// 이메일 (유니크)
    pub email: String,
    /// 비밀번호 해시 (PHC 문자열)
    pub password_hash: String,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// 역할을 붙여 외부 노출용 프로필로 변환합니다.
    pub fn profile(&self, role: Role) -> AccountProfile {
        AccountProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role,
            created_at: self.created_at,
        }
    }

    /// 역할을 붙여 로그인 검증용 레코드로 변환합니다.
    pub fn with_role(&self, role: Role) -> AccountWithRole {
        AccountWithRole {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            role,
        }
    }
}

/// 계정 생성 입력.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// 표시 이름
    pub name: String,
    /// 이메일
    pub email: String,
    /// 비밀번호 해시
    pub password_hash: String,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// 로그인 조회 결과.
///
/// 계정, 역할 할당, 역할을 이메일로 조인한 한 행입니다.
/// 비밀번호 검증에 쓰이므로 해시를 포함하며 직렬화하지 않습니다.
#[derive(Debug, Clone)]
pub struct AccountWithRole {
    /// 계정 ID
    pub id: Uuid,
    /// 표시 이름
    pub name: String,
    /// 이메일
    pub email: String,
    /// 비밀번호 해시
    pub password_hash: String,
    /// 할당된 역할
    pub role: Role,
}

/// 외부 노출용 계정 정보.
///
/// 비밀번호 해시는 절대 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// 계정 ID
    pub id: Uuid,
    /// 표시 이름
    pub name: String,
    /// 이메일
    pub email: String,
    /// 할당된 역할
    pub role: Role,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

/// 역할 레코드.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    /// 역할 ID
    pub id: Uuid,
    /// 역할 이름 (유니크: admin, user, operator)
    pub name: String,
    /// 역할 설명
    pub description: Option<String>,
}

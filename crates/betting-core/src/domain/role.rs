//! 사용자 역할 정의.
//!
//! 역할 비교는 항상 정확히 일치해야 합니다. admin이라고 해서
//! user 전용 엔드포인트를 통과할 수 없습니다 (계층 없음).

use serde::{Deserialize, Serialize};

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 관리자 - 전체 계정 목록 조회
    Admin,
    /// 일반 사용자 - 본인 계정 조회
    User,
    /// 운영자 - 이벤트 운영 대시보드
    Operator,
}

impl Role {
    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            "operator" => Some(Role::Operator),
            _ => None,
        }
    }

    /// 역할 이름 반환 (저장소의 roles.name 컬럼 값과 동일).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Operator => "operator",
        }
    }
}

impl Default for Role {
    /// 회원가입 시 부여되는 기본 역할.
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! 계정 저장소 추상화.
//!
//! 계정, 역할, 역할 할당을 조회/생성하기 위한 저장소 중립적인
//! 인터페이스를 제공합니다. 운영 환경에서는 PostgreSQL 구현을,
//! 테스트에서는 인메모리 구현을 주입합니다.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, AccountProfile, AccountWithRole, NewAccount, RoleRecord};
use crate::error::StoreError;

// =============================================================================
// AccountStore Trait
// =============================================================================

/// 계정 저장소 trait.
///
/// 모든 메서드는 한 번의 저장소 왕복에 해당하며 트랜잭션으로 묶이지
/// 않습니다. 다단계 시퀀스의 정합성은 유니크 제약(이메일, 역할 이름)에
/// 의존합니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct PgAccountStore {
///     pool: PgPool,
/// }
///
/// #[async_trait]
/// impl AccountStore for PgAccountStore {
///     async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
///         // SELECT ... WHERE email = $1
///     }
///
///     // ... 나머지 메서드 구현
/// }
/// ```
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 이메일로 계정 조회.
    ///
    /// 회원가입 시 중복 검사에 사용합니다.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// 계정 생성.
    ///
    /// ID와 생성 시각은 저장소가 생성합니다.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateEmail`: 이메일 유니크 제약 충돌
    /// - `StoreError::Database`: 그 외 저장소 실패
    async fn insert_account(&self, new: NewAccount) -> Result<Account, StoreError>;

    /// 이름으로 역할 조회.
    async fn find_role(&self, name: &str) -> Result<Option<RoleRecord>, StoreError>;

    /// 역할 생성.
    ///
    /// 같은 이름의 역할이 이미 있으면 아무것도 하지 않습니다. 동시에
    /// 들어온 최초 회원가입 두 건이 모두 성공할 수 있게 하기 위함입니다.
    async fn insert_role(&self, name: &str, description: &str) -> Result<(), StoreError>;

    /// 계정-역할 할당 생성.
    async fn assign_role(&self, account_id: Uuid, role_id: Uuid) -> Result<(), StoreError>;

    /// 로그인 검증용 조회.
    ///
    /// 계정, 할당, 역할을 이메일로 조인합니다. 비밀번호 해시를 포함하는
    /// 유일한 조회 경로입니다.
    async fn find_for_login(&self, email: &str) -> Result<Option<AccountWithRole>, StoreError>;

    /// ID로 계정 프로필 조회.
    ///
    /// 토큰 발급 후 계정이 삭제되면 `None`을 반환할 수 있습니다.
    async fn find_profile(&self, account_id: Uuid) -> Result<Option<AccountProfile>, StoreError>;

    /// 전체 계정 프로필 목록 조회.
    ///
    /// 생성 시각 내림차순으로 반환합니다.
    async fn list_profiles(&self) -> Result<Vec<AccountProfile>, StoreError>;

    /// 저장소 연결 확인.
    async fn ping(&self) -> Result<(), StoreError>;
}

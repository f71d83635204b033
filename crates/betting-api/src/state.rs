//! 애플리케이션 상태 관리.

use std::sync::Arc;

use betting_core::AccountStore;

use crate::auth::AuthKeys;

/// 애플리케이션 공유 상태.
///
/// 모든 핸들러가 `State<Arc<AppState>>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// 계정 저장소 (PostgreSQL 또는 인메모리)
    pub store: Arc<dyn AccountStore>,
    /// JWT 서명/검증 키
    pub auth: AuthKeys,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(store: Arc<dyn AccountStore>, auth: AuthKeys) -> Self {
        Self { store, auth }
    }
}

/// 테스트용 AppState 생성.
///
/// 빈 인메모리 저장소와 고정 시크릿으로 상태를 구성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::repository::MemoryAccountStore;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    AppState::new(
        Arc::new(MemoryAccountStore::new()),
        AuthKeys::from_secret(TEST_SECRET),
    )
}

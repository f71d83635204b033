//! 인메모리 계정 저장소.
//!
//! 테스트 및 로컬 개발용입니다. 모든 데이터를 메모리에 보관하며
//! 프로세스 종료 시 사라집니다. PostgreSQL 저장소와 같은 제약을
//! 흉내냅니다 (이메일 유일성, 역할 이름 유일성, 계정당 역할 1개).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use betting_core::{
    Account, AccountProfile, AccountStore, AccountWithRole, NewAccount, Role, RoleRecord,
    StoreError,
};

/// 인메모리 `AccountStore` 구현.
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
    roles: RwLock<HashMap<Uuid, RoleRecord>>,
    /// account_id -> role_id. 계정당 역할은 하나만 유지된다.
    assignments: RwLock<HashMap<Uuid, Uuid>>,
}

impl MemoryAccountStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            roles: RwLock::new(HashMap::new()),
            assignments: RwLock::new(HashMap::new()),
        }
    }

    /// 계정에 할당된 역할 조회.
    async fn assigned_role(&self, account_id: Uuid) -> Result<Option<Role>, StoreError> {
        let role_id = match self.assignments.read().await.get(&account_id) {
            Some(id) => *id,
            None => return Ok(None),
        };

        let roles = self.roles.read().await;
        let record = roles
            .get(&role_id)
            .ok_or_else(|| StoreError::corrupt(format!("missing role record: {}", role_id)))?;
        let role = Role::parse(&record.name)
            .ok_or_else(|| StoreError::corrupt(format!("unknown role name: {}", record.name)))?;

        Ok(Some(role))
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn insert_account(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == new.email) {
            return Err(StoreError::DuplicateEmail(new.email));
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_role(&self, name: &str) -> Result<Option<RoleRecord>, StoreError> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.name == name).cloned())
    }

    async fn insert_role(&self, name: &str, description: &str) -> Result<(), StoreError> {
        let mut roles = self.roles.write().await;

        // 이름 충돌은 무시 (ON CONFLICT DO NOTHING과 동일)
        if roles.values().any(|r| r.name == name) {
            return Ok(());
        }

        let record = RoleRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(description.to_string()),
        };
        roles.insert(record.id, record);

        Ok(())
    }

    async fn assign_role(&self, account_id: Uuid, role_id: Uuid) -> Result<(), StoreError> {
        self.assignments.write().await.insert(account_id, role_id);
        Ok(())
    }

    async fn find_for_login(&self, email: &str) -> Result<Option<AccountWithRole>, StoreError> {
        let account = match self.find_by_email(email).await? {
            Some(account) => account,
            None => return Ok(None),
        };

        // 역할이 할당되지 않은 계정은 로그인 조회에 나타나지 않는다
        match self.assigned_role(account.id).await? {
            Some(role) => Ok(Some(account.with_role(role))),
            None => Ok(None),
        }
    }

    async fn find_profile(&self, account_id: Uuid) -> Result<Option<AccountProfile>, StoreError> {
        let account = {
            let accounts = self.accounts.read().await;
            match accounts.get(&account_id) {
                Some(account) => account.clone(),
                None => return Ok(None),
            }
        };

        match self.assigned_role(account.id).await? {
            Some(role) => Ok(Some(account.profile(role))),
            None => Ok(None),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<AccountProfile>, StoreError> {
        let accounts: Vec<Account> = {
            let guard = self.accounts.read().await;
            guard.values().cloned().collect()
        };

        let mut profiles = Vec::with_capacity(accounts.len());
        for account in accounts {
            if let Some(role) = self.assigned_role(account.id).await? {
                profiles.push(account.profile(role));
            }
        }

        // 최신 가입 순
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(profiles)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount::new(name, email, "$argon2id$fake-hash")
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryAccountStore::new();

        store
            .insert_account(new_account("Ana", "ana@example.com"))
            .await
            .unwrap();

        let err = store
            .insert_account(new_account("Ana Clone", "ana@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_insert_role_is_idempotent() {
        let store = MemoryAccountStore::new();

        store.insert_role("user", "Regular user").await.unwrap();
        store.insert_role("user", "Regular user").await.unwrap();

        let record = store.find_role("user").await.unwrap().unwrap();
        assert_eq!(record.name, "user");

        // 두 번째 insert가 새 레코드를 만들지 않았는지 확인
        store.insert_role("admin", "Administrator").await.unwrap();
        assert!(store.find_role("admin").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_login_requires_role_assignment() {
        let store = MemoryAccountStore::new();

        let account = store
            .insert_account(new_account("Bob", "bob@example.com"))
            .await
            .unwrap();

        // 역할 할당 전에는 로그인 조회에 나타나지 않는다
        assert!(store
            .find_for_login("bob@example.com")
            .await
            .unwrap()
            .is_none());

        store.insert_role("user", "Regular user").await.unwrap();
        let role = store.find_role("user").await.unwrap().unwrap();
        store.assign_role(account.id, role.id).await.unwrap();

        let found = store
            .find_for_login("bob@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, account.id);
        assert_eq!(found.role, Role::User);
    }

    #[tokio::test]
    async fn test_list_profiles_newest_first() {
        let store = MemoryAccountStore::new();
        store.insert_role("user", "Regular user").await.unwrap();
        let role = store.find_role("user").await.unwrap().unwrap();

        for (name, email) in [("First", "a@x.com"), ("Second", "b@x.com")] {
            let account = store.insert_account(new_account(name, email)).await.unwrap();
            store.assign_role(account.id, role.id).await.unwrap();
            // created_at 순서를 확실히 하기 위한 짧은 지연
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let profiles = store.list_profiles().await.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "Second");
        assert_eq!(profiles[1].name, "First");
    }
}

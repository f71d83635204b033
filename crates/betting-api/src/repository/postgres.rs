//! PostgreSQL 계정 저장소.
//!
//! `accounts`, `roles`, `account_roles` 세 테이블을 사용합니다.
//! 역할 컬럼은 문자열로 저장되며 조회 시점에 `Role`로 변환합니다.
//! 알 수 없는 역할 이름이 발견되면 숨기지 않고 `Corrupt` 에러로
//! 표면화합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use betting_core::{
    Account, AccountProfile, AccountStore, AccountWithRole, NewAccount, Role, RoleRecord,
    StoreError,
};

// ==================================================
// Row 타입
// ==================================================

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct LoginRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    #[sqlx(default)]
    description: Option<String>,
}

fn parse_role(name: &str) -> Result<Role, StoreError> {
    Role::parse(name).ok_or_else(|| StoreError::corrupt(format!("unknown role name: {}", name)))
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<LoginRow> for AccountWithRole {
    type Error = StoreError;

    fn try_from(row: LoginRow) -> Result<Self, Self::Error> {
        Ok(AccountWithRole {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: parse_role(&row.role)?,
        })
    }
}

impl TryFrom<ProfileRow> for AccountProfile {
    type Error = StoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(AccountProfile {
            id: row.id,
            name: row.name,
            email: row.email,
            role: parse_role(&row.role)?,
            created_at: row.created_at,
        })
    }
}

impl From<RoleRow> for RoleRecord {
    fn from(row: RoleRow) -> Self {
        RoleRecord {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

// ==================================================
// PgAccountStore
// ==================================================

/// PostgreSQL 기반 `AccountStore` 구현.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// 커넥션 풀로부터 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        Ok(row.map(Account::from))
    }

    async fn insert_account(&self, new: NewAccount) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail(new.email.clone())
            }
            _ => StoreError::database(e.to_string()),
        })?;

        Ok(row.into())
    }

    async fn find_role(&self, name: &str) -> Result<Option<RoleRecord>, StoreError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        Ok(row.map(RoleRecord::from))
    }

    async fn insert_role(&self, name: &str, description: &str) -> Result<(), StoreError> {
        // 동시 최초 가입 두 건이 모두 이 경로에 들어올 수 있으므로
        // 충돌은 조용히 무시한다
        sqlx::query(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        Ok(())
    }

    async fn assign_role(&self, account_id: Uuid, role_id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO account_roles (account_id, role_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(account_id)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        Ok(())
    }

    async fn find_for_login(&self, email: &str) -> Result<Option<AccountWithRole>, StoreError> {
        let row = sqlx::query_as::<_, LoginRow>(
            r#"
            SELECT a.id, a.name, a.email, a.password_hash, r.name AS role
            FROM accounts a
            INNER JOIN account_roles ar ON a.id = ar.account_id
            INNER JOIN roles r ON ar.role_id = r.id
            WHERE a.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        row.map(AccountWithRole::try_from).transpose()
    }

    async fn find_profile(&self, account_id: Uuid) -> Result<Option<AccountProfile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT a.id, a.name, a.email, r.name AS role, a.created_at
            FROM accounts a
            INNER JOIN account_roles ar ON a.id = ar.account_id
            INNER JOIN roles r ON ar.role_id = r.id
            WHERE a.id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        row.map(AccountProfile::try_from).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<AccountProfile>, StoreError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT a.id, a.name, a.email, r.name AS role, a.created_at
            FROM accounts a
            INNER JOIN account_roles ar ON a.id = ar.account_id
            INNER JOIN roles r ON ar.role_id = r.id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::database(e.to_string()))?;

        rows.into_iter().map(AccountProfile::try_from).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::database(e.to_string()))?;

        Ok(())
    }
}

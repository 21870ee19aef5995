use std::sync::Mutex;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never plaintext
    pub created_at: OffsetDateTime,
}

/// Rejection from `CredentialStore::create`. The store enforces
/// uniqueness at write time; callers treat this verdict as authoritative
/// even when their own pre-checks passed.
#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("username already exists")]
    UsernameTaken,
    #[error("email address already in use")]
    EmailTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, CreateUserError>;
    async fn update_password_hash(&self, user_id: i64, new_hash: &str) -> anyhow::Result<()>;
}

/// Postgres-backed store. Uniqueness of username and email is guaranteed
/// by the `UNIQUE` constraints in the `users` migration.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, CreateUserError> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                // The constraint name tells us which field collided.
                match db.constraint() {
                    Some("users_email_key") => Err(CreateUserError::EmailTaken),
                    _ => Err(CreateUserError::UsernameTaken),
                }
            }
            Err(e) => Err(CreateUserError::Other(e.into())),
        }
    }

    async fn update_password_hash(&self, user_id: i64, new_hash: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET password_hash = $2 WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(new_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-memory store with the same write-time uniqueness semantics as
/// `PgStore`. Backs `AppState::fake()` and handler tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: i64,
    users: Vec<User>,
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, CreateUserError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.username == username) {
            return Err(CreateUserError::UsernameTaken);
        }
        if inner.users.iter().any(|u| u.email == email) {
            return Err(CreateUserError::EmailTaken);
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update_password_hash(&self, user_id: i64, new_hash: &str) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| anyhow::anyhow!("no user with id {user_id}"))?;
        user.password_hash = new_hash.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_ids_and_enforces_uniqueness() {
        let store = MemoryStore::default();
        let alice = store.create("alice", "a@x.com", "hash-1").await.expect("first create");
        assert_eq!(alice.id, 1);

        let err = store.create("alice", "other@x.com", "hash-2").await.unwrap_err();
        assert!(matches!(err, CreateUserError::UsernameTaken));

        let err = store.create("bob", "a@x.com", "hash-3").await.unwrap_err();
        assert!(matches!(err, CreateUserError::EmailTaken));

        // The losing inserts left nothing behind.
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_password_hash_replaces_only_the_hash() {
        let store = MemoryStore::default();
        let alice = store.create("alice", "a@x.com", "old-hash").await.unwrap();

        store.update_password_hash(alice.id, "new-hash").await.unwrap();

        let reloaded = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "new-hash");
        assert_eq!(reloaded.email, "a@x.com");
        assert_eq!(reloaded.id, alice.id);
    }

    #[tokio::test]
    async fn update_password_hash_rejects_unknown_id() {
        let store = MemoryStore::default();
        assert!(store.update_password_hash(42, "hash").await.is_err());
    }
}

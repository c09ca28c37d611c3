use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use time::OffsetDateTime;

use crate::users::repo_types::{NewUser, User};

/// Why an insert was rejected.
#[derive(Debug, Error)]
pub enum InsertError {
    #[error("user_name already exists")]
    UserNameTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistence boundary for user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// True iff a record with exactly this user_name exists.
    async fn user_name_exists(&self, user_name: &str) -> anyhow::Result<bool>;

    /// Persist a new user and return the stored row with the generated id
    /// and creation timestamp. The uniqueness constraint on user_name is the
    /// source of truth for duplicates; callers must handle `UserNameTaken`
    /// even after a clean existence check.
    async fn insert(&self, new_user: NewUser) -> Result<User, InsertError>;
}

/// Postgres-backed directory over the `users` table.
pub struct PgUsers {
    db: PgPool,
}

impl PgUsers {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgUsers {
    async fn user_name_exists(&self, user_name: &str) -> anyhow::Result<bool> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.db)
        .await?;
        Ok(id.is_some())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, InsertError> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, password, full_name, nickname)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_name, password, full_name, nickname, date_created
            "#,
        )
        .bind(&new_user.user_name)
        .bind(&new_user.password)
        .bind(&new_user.full_name)
        .bind(&new_user.nickname)
        .fetch_one(&self.db)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(InsertError::UserNameTaken)
            }
            Err(e) => Err(InsertError::Other(e.into())),
        }
    }
}

/// In-memory directory with the same uniqueness semantics as the Postgres
/// table. Backs `AppState::fake()` and the pipeline tests.
#[derive(Default)]
pub struct InMemoryUsers {
    inner: Mutex<InMemoryInner>,
}

#[derive(Default)]
struct InMemoryInner {
    next_id: i64,
    by_name: HashMap<String, User>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn user_name_exists(&self, user_name: &str) -> anyhow::Result<bool> {
        let inner = self.inner.lock().expect("users lock poisoned");
        Ok(inner.by_name.contains_key(user_name))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, InsertError> {
        let mut inner = self.inner.lock().expect("users lock poisoned");
        if inner.by_name.contains_key(&new_user.user_name) {
            return Err(InsertError::UserNameTaken);
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            user_name: new_user.user_name.clone(),
            password: new_user.password,
            full_name: new_user.full_name,
            nickname: new_user.nickname,
            date_created: OffsetDateTime::now_utc(),
        };
        inner.by_name.insert(new_user.user_name, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(user_name: &str) -> NewUser {
        NewUser {
            user_name: user_name.to_string(),
            password: "$argon2id$fake".to_string(),
            full_name: "Test User".to_string(),
            nickname: None,
        }
    }

    #[tokio::test]
    async fn in_memory_insert_assigns_sequential_ids() {
        let users = InMemoryUsers::new();
        let first = users.insert(new_user("first")).await.expect("insert");
        let second = users.insert(new_user("second")).await.expect("insert");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn in_memory_insert_rejects_duplicate_user_name() {
        let users = InMemoryUsers::new();
        users.insert(new_user("taken")).await.expect("insert");
        let err = users.insert(new_user("taken")).await.unwrap_err();
        assert!(matches!(err, InsertError::UserNameTaken));
    }

    #[tokio::test]
    async fn in_memory_exists_tracks_inserts() {
        let users = InMemoryUsers::new();
        assert!(!users.user_name_exists("ghost").await.expect("exists"));
        users.insert(new_user("ghost")).await.expect("insert");
        assert!(users.user_name_exists("ghost").await.expect("exists"));
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // assigned by storage
    pub user_name: String,          // unique across all records
    #[serde(skip_serializing)]
    pub password: String,           // argon2 hash, not exposed in JSON
    pub full_name: String,
    pub nickname: Option<String>,
    pub date_created: OffsetDateTime, // assigned at insert, never mutated
}

/// Fields for a user about to be persisted. The password is already hashed
/// by the time this struct exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub password: String,
    pub full_name: String,
    pub nickname: Option<String>,
}

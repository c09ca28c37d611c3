use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request body for user registration.
///
/// Every field deserializes as optional so the pipeline can report missing
/// fields with its own messages instead of a serde rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub nickname: Option<String>,
}

/// Public part of the user returned to the client. Free-text fields are
/// already escaped; there is no password field.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub user_name: String,
    pub full_name: String,
    pub nickname: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_created: OffsetDateTime,
}

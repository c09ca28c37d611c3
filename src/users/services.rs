use tracing::{info, warn};

use crate::error::ApiError;
use crate::users::dto::RegisterRequest;
use crate::users::password::{check_password, hash_password};
use crate::users::repo::{InsertError, UserDirectory};
use crate::users::repo_types::{NewUser, User};

fn require_field(name: &'static str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::MissingField(name)),
    }
}

/// Run the registration pipeline: required fields, password policy, username
/// collision, hashing, insert.
///
/// The existence check and the insert are separate queries, so two
/// concurrent registrations can both pass the check. The uniqueness
/// constraint at insert time is authoritative; the pre-check only reports
/// duplicates earlier.
pub async fn register_user(
    users: &dyn UserDirectory,
    req: RegisterRequest,
) -> Result<User, ApiError> {
    let RegisterRequest {
        user_name,
        password,
        full_name,
        nickname,
    } = req;

    // checked in this order so the first missing field is deterministic
    let full_name = require_field("full_name", full_name)?;
    let user_name = require_field("user_name", user_name)?;
    let password = require_field("password", password)?;

    if let Some(message) = check_password(&password) {
        warn!(user_name = %user_name, "registration rejected: password policy");
        return Err(ApiError::InvalidPassword(message));
    }

    if users.user_name_exists(&user_name).await? {
        warn!(user_name = %user_name, "registration rejected: user_name taken");
        return Err(ApiError::UserNameTaken);
    }

    let hashed = hash_password(&password)?;

    let new_user = NewUser {
        user_name,
        password: hashed,
        full_name,
        nickname,
    };

    let user = match users.insert(new_user).await {
        Ok(user) => user,
        Err(InsertError::UserNameTaken) => {
            // pre-check raced with another registration; the constraint wins
            warn!("registration rejected: user_name taken at insert");
            return Err(ApiError::UserNameTaken);
        }
        Err(InsertError::Other(e)) => return Err(ApiError::Internal(e)),
    };

    info!(user_id = user.id, user_name = %user.user_name, "user registered");
    Ok(user)
}

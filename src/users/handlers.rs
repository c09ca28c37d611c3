use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{PublicUser, RegisterRequest},
        sanitize, services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<PublicUser>), ApiError> {
    let user = services::register_user(state.users.as_ref(), payload).await?;
    let location = format!("/api/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sanitize::public_view(user)),
    ))
}

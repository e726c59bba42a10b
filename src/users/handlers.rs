use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::UserChanges;
use crate::users::dto::{EditUserRequest, UserProfile};
use crate::validate::ValidatedJson;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/users/current",
        get(current_user).patch(edit_current_user),
    )
}

#[instrument(skip(state))]
async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("user no longer exists"))?;

    Ok(Json(UserProfile::from(user)))
}

#[instrument(skip(state, payload))]
async fn edit_current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(payload): ValidatedJson<EditUserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let changes = UserChanges {
        email: payload.email.map(|e| e.trim().to_lowercase()),
        first_name: payload.first_name,
        last_name: payload.last_name,
    };

    let user = state.store.update(user_id, changes).await?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(UserProfile::from(user)))
}

//! User routes — public listing and profile pages.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::image;
use crate::services::user::{self as user_svc, UserRow};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: UserSummary,
    pub image_count: i64,
}

fn to_summary(row: UserRow) -> UserSummary {
    UserSummary {
        id: row.id,
        username: row.username,
        display_name: row.display_name,
        avatar_url: row.avatar_url,
        created_at: row.created_at,
    }
}

/// `GET /users` — all users, newest first. Public.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let rows = user_svc::list(&state.pool).await?;
    Ok(Json(rows.into_iter().map(to_summary).collect()))
}

async fn profile_for(state: &AppState, row: UserRow) -> Result<UserProfile, ApiError> {
    let image_count = image::count_by_owner(&state.pool, row.id).await?;
    Ok(UserProfile { user: to_summary(row), image_count })
}

/// `GET /users/:id` — profile summary plus owned-image count.
pub async fn user_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let row = user_svc::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(profile_for(&state, row).await?))
}

/// `GET /users/username/:username` — same profile, looked up by username.
pub async fn user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let row = user_svc::find_by_username(&state.pool, &username)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(profile_for(&state, row).await?))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

//! Image routes — gallery listing, create, delete, like toggle.
//!
//! DESIGN
//! ======
//! Listing is public; every mutation goes through the `AuthUser` extractor.
//! Each mutating endpoint runs an explicit validation function before any
//! repository call, returning the full list of field errors at once.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::routes::auth::AuthUser;
use crate::services::image::{self, ImageRecord, LikeToggle};
use crate::state::AppState;

const DEFAULT_PAGE_LIMIT: i64 = 20;
const TITLE_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 500;

// =============================================================================
// RESPONSE SHAPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub owner: OwnerSummary,
    pub likes: Vec<Uuid>,
    pub likes_count: i32,
    pub created_at: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Serialize)]
pub struct ImagePage {
    pub images: Vec<ImageResponse>,
    pub pagination: Pagination,
}

fn to_response(record: ImageRecord) -> ImageResponse {
    ImageResponse {
        id: record.id,
        url: record.url,
        title: record.title,
        description: record.description,
        owner: OwnerSummary {
            id: record.owner_id,
            username: record.owner_username,
            display_name: record.owner_display_name,
            avatar_url: record.owner_avatar_url,
        },
        likes: record.likes,
        likes_count: record.likes_count,
        created_at: record.created_at,
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Apply defaults and floor non-positive values at 1. A page past the end is
/// allowed through; it simply selects an empty window.
fn normalize_paging(query: &PageQuery) -> (i64, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);
    (page, limit)
}

/// Ceiling of `total / limit`, saturating so an extreme `limit` from the
/// query string cannot overflow. `limit` is already floored at 1.
fn page_count(total: i64, limit: i64) -> i64 {
    total.saturating_add(limit - 1) / limit
}

async fn list_page_response(
    state: &AppState,
    owner: Option<Uuid>,
    query: &PageQuery,
) -> Result<ImagePage, ApiError> {
    let (page, limit) = normalize_paging(query);
    let (records, total) = image::list_page(&state.pool, owner, page, limit).await?;

    Ok(ImagePage {
        images: records.into_iter().map(to_response).collect(),
        pagination: Pagination { page, limit, total, pages: page_count(total, limit) },
    })
}

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Deserialize)]
pub struct CreateImageBody {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Trimmed, validated create payload.
#[derive(Debug)]
pub(crate) struct NewImage {
    pub url: String,
    pub title: String,
    pub description: String,
}

fn is_valid_image_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validate a create request, collecting every field error before returning.
pub(crate) fn validate_create_image(body: &CreateImageBody) -> Result<NewImage, Vec<FieldError>> {
    let mut errors = Vec::new();

    let url = body.url.as_deref().unwrap_or("").trim();
    if !is_valid_image_url(url) {
        errors.push(FieldError { field: "url", message: "Valid URL is required" });
    }

    let title = body.title.as_deref().unwrap_or("").trim();
    let title_chars = title.chars().count();
    if title_chars < 1 || title_chars > TITLE_MAX_CHARS {
        errors.push(FieldError { field: "title", message: "Title must be 1-100 characters" });
    }

    let description = body.description.as_deref().unwrap_or("").trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push(FieldError { field: "description", message: "Description must be less than 500 characters" });
    }

    if errors.is_empty() {
        Ok(NewImage { url: url.to_owned(), title: title.to_owned(), description: description.to_owned() })
    } else {
        Err(errors)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /images` — paginated gallery, newest first. Public.
pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ImagePage>, ApiError> {
    Ok(Json(list_page_response(&state, None, &query).await?))
}

/// `GET /images/user/:user_id` — paginated gallery for one owner. Public.
pub async fn list_user_images(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ImagePage>, ApiError> {
    Ok(Json(list_page_response(&state, Some(user_id), &query).await?))
}

/// `POST /images` — create an image reference owned by the caller.
pub async fn create_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateImageBody>,
) -> Result<(StatusCode, Json<ImageResponse>), ApiError> {
    let new_image = validate_create_image(&body).map_err(ApiError::Validation)?;

    let (id, created_at) =
        image::create(&state.pool, auth.user.id, &new_image.url, &new_image.title, &new_image.description).await?;

    // Echo the stored record; the owner summary comes from the session user.
    Ok((
        StatusCode::CREATED,
        Json(ImageResponse {
            id,
            url: new_image.url,
            title: new_image.title,
            description: new_image.description,
            owner: OwnerSummary {
                id: auth.user.id,
                username: auth.user.username,
                display_name: auth.user.display_name,
                avatar_url: auth.user.avatar_url,
            },
            likes: Vec::new(),
            likes_count: 0,
            created_at,
        }),
    ))
}

/// `DELETE /images/:id` — owner-only delete.
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    image::delete(&state.pool, id, auth.user.id).await?;
    Ok(Json(serde_json::json!({ "message": "Image deleted successfully" })))
}

/// `POST /images/:id/like` — flip the caller's like and report the new state.
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LikeToggle>, ApiError> {
    let toggle = image::toggle_like(&state.pool, id, auth.user.id).await?;
    Ok(Json(toggle))
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;

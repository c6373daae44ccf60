//! Image repository — paginated listing, create, delete, like toggling.
//!
//! DESIGN
//! ======
//! Images are plain rows behind explicit repository functions; the route
//! layer owns request parsing and response shaping. The denormalized
//! `likes_count` column is kept in lockstep with the `image_likes` set
//! inside a single transaction, so concurrent toggles cannot lose updates.

use sqlx::{PgPool, Row};
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(Uuid),
    #[error("user {user_id} does not own image {image_id}")]
    NotOwner { image_id: Uuid, user_id: Uuid },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Joined image row with its owner summary and liker set.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub likes: Vec<Uuid>,
    pub likes_count: i32,
    pub created_at: String,
    pub owner_id: Uuid,
    pub owner_username: String,
    pub owner_display_name: String,
    pub owner_avatar_url: Option<String>,
}

/// Post-toggle like state returned to the client.
#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: i32,
}

// =============================================================================
// QUERIES
// =============================================================================

const LIST_SQL: &str = r#"
    SELECT i.id, i.url, i.title, i.description, i.likes_count,
           to_char(i.created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
           u.id AS owner_id, u.username, u.display_name, u.avatar_url,
           COALESCE(array_agg(l.user_id) FILTER (WHERE l.user_id IS NOT NULL), '{}'::uuid[]) AS likes
    FROM images i
    JOIN users u ON u.id = i.owner_id
    LEFT JOIN image_likes l ON l.image_id = i.id
    GROUP BY i.id, u.id
    ORDER BY i.created_at DESC
    LIMIT $1 OFFSET $2"#;

const LIST_BY_OWNER_SQL: &str = r#"
    SELECT i.id, i.url, i.title, i.description, i.likes_count,
           to_char(i.created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
           u.id AS owner_id, u.username, u.display_name, u.avatar_url,
           COALESCE(array_agg(l.user_id) FILTER (WHERE l.user_id IS NOT NULL), '{}'::uuid[]) AS likes
    FROM images i
    JOIN users u ON u.id = i.owner_id
    LEFT JOIN image_likes l ON l.image_id = i.id
    WHERE i.owner_id = $3
    GROUP BY i.id, u.id
    ORDER BY i.created_at DESC
    LIMIT $1 OFFSET $2"#;

fn record_from_row(row: &sqlx::postgres::PgRow) -> ImageRecord {
    ImageRecord {
        id: row.get("id"),
        url: row.get("url"),
        title: row.get("title"),
        description: row.get("description"),
        likes: row.get("likes"),
        likes_count: row.get("likes_count"),
        created_at: row.get("created_at"),
        owner_id: row.get("owner_id"),
        owner_username: row.get("username"),
        owner_display_name: row.get("display_name"),
        owner_avatar_url: row.get("avatar_url"),
    }
}

/// Row offset for a 1-based page. Saturates so an absurdly large page
/// degrades to an empty window instead of overflowing.
fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

/// List one page of images, newest first, optionally filtered by owner.
/// Returns the page plus the unpaginated total for the same filter.
pub async fn list_page(
    pool: &PgPool,
    owner: Option<Uuid>,
    page: i64,
    limit: i64,
) -> Result<(Vec<ImageRecord>, i64), ImageError> {
    let offset = page_offset(page, limit);

    let rows = match owner {
        Some(owner_id) => {
            sqlx::query(LIST_BY_OWNER_SQL)
                .bind(limit)
                .bind(offset)
                .bind(owner_id)
                .fetch_all(pool)
                .await?
        }
        None => sqlx::query(LIST_SQL).bind(limit).bind(offset).fetch_all(pool).await?,
    };

    let total: i64 = match owner {
        Some(owner_id) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(pool)
                .await?
        }
        None => sqlx::query_scalar("SELECT COUNT(*) FROM images").fetch_one(pool).await?,
    };

    Ok((rows.iter().map(record_from_row).collect(), total))
}

/// Count images owned by a user. Used for profile `imageCount`.
pub async fn count_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<i64, ImageError> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a new image for the given owner. Returns the generated ID and the
/// formatted creation timestamp; the caller already holds the owner summary.
pub async fn create(
    pool: &PgPool,
    owner_id: Uuid,
    url: &str,
    title: &str,
    description: &str,
) -> Result<(Uuid, String), ImageError> {
    let id = Uuid::new_v4();
    let row = sqlx::query(
        r#"INSERT INTO images (id, owner_id, url, title, description)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(url)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok((id, row.get("created_at")))
}

/// Delete an image, enforcing ownership.
///
/// # Errors
///
/// `NotFound` if the image does not exist, `NotOwner` if the requester is
/// not the image's owner.
pub async fn delete(pool: &PgPool, image_id: Uuid, requester: Uuid) -> Result<(), ImageError> {
    let row = sqlx::query("SELECT owner_id FROM images WHERE id = $1")
        .bind(image_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ImageError::NotFound(image_id))?;

    let owner_id: Uuid = row.get("owner_id");
    if owner_id != requester {
        return Err(ImageError::NotOwner { image_id, user_id: requester });
    }

    sqlx::query("DELETE FROM images WHERE id = $1")
        .bind(image_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count movement implied by a toggle's set mutations. Only a row actually
/// inserted or removed moves the count; a delete that lost the race to a
/// concurrent unlike reports zero rows and must leave the count alone.
fn count_delta(inserted: u64, removed: u64) -> i64 {
    if inserted == 1 {
        1
    } else if removed == 1 {
        -1
    } else {
        0
    }
}

/// Toggle the requester's membership in the image's liker set.
///
/// Runs in one transaction: the conflict-free insert decides the direction,
/// and the denormalized count moves only with a set mutation that actually
/// landed (`rows_affected == 1` on either side). The count is floored at
/// zero on the way down.
pub async fn toggle_like(pool: &PgPool, image_id: Uuid, user_id: Uuid) -> Result<LikeToggle, ImageError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT 1 FROM images WHERE id = $1")
        .bind(image_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ImageError::NotFound(image_id))?;

    let inserted = sqlx::query("INSERT INTO image_likes (image_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(image_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed = if inserted == 0 {
        sqlx::query("DELETE FROM image_likes WHERE image_id = $1 AND user_id = $2")
            .bind(image_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
    } else {
        0
    };

    let likes_count: i32 = match count_delta(inserted, removed) {
        1 => {
            sqlx::query_scalar("UPDATE images SET likes_count = likes_count + 1 WHERE id = $1 RETURNING likes_count")
                .bind(image_id)
                .fetch_one(&mut *tx)
                .await?
        }
        -1 => {
            sqlx::query_scalar(
                "UPDATE images SET likes_count = GREATEST(likes_count - 1, 0) WHERE id = $1 RETURNING likes_count",
            )
            .bind(image_id)
            .fetch_one(&mut *tx)
            .await?
        }
        _ => {
            sqlx::query_scalar("SELECT likes_count FROM images WHERE id = $1")
                .bind(image_id)
                .fetch_one(&mut *tx)
                .await?
        }
    };

    tx.commit().await?;

    Ok(LikeToggle { liked: inserted == 1, likes_count })
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;

//! API error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every handler failure is converted to a JSON body before it leaves the
//! router: `{"error": "..."}` for single faults, `{"errors": [...]}` for
//! field-level validation failures. Database errors are logged here and
//! collapsed into a generic 500 so internals never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::services::image::ImageError;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("Authentication required")]
    AuthRequired,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AuthRequired => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(errors) => (status, Json(serde_json::json!({ "errors": errors }))).into_response(),
            other => (status, Json(serde_json::json!({ "error": other.to_string() }))).into_response(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "database error");
        Self::Internal("Internal server error")
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::NotFound(_) => Self::NotFound("Image not found"),
            ImageError::NotOwner { .. } => Self::Forbidden("Not authorized to delete this image"),
            ImageError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation(vec![FieldError { field: "title", message: "Title must be 1-100 characters" }]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_required_maps_to_401() {
        assert_eq!(ApiError::AuthRequired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::AuthRequired.to_string(), "Authentication required");
    }

    #[test]
    fn forbidden_and_not_found_statuses() {
        assert_eq!(ApiError::Forbidden("nope").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("gone").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Internal("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn image_not_found_maps_to_404_with_message() {
        let err: ApiError = ImageError::NotFound(Uuid::nil()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Image not found");
    }

    #[test]
    fn image_not_owner_maps_to_403_with_message() {
        let err: ApiError = ImageError::NotOwner { image_id: Uuid::nil(), user_id: Uuid::nil() }.into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Not authorized to delete this image");
    }

    #[test]
    fn field_error_serializes_field_and_message() {
        let err = FieldError { field: "url", message: "Valid URL is required" };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "url");
        assert_eq!(json["message"], "Valid URL is required");
    }
}

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under a single Axum router. The SPA is a
//! separate deployment that talks to these endpoints with cookie credentials;
//! nothing here renders HTML.

pub mod auth;
pub mod images;
pub mod users;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/github", get(auth::github_redirect))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/auth/user", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/status", get(auth::status))
        .route("/images", get(images::list_images).post(images::create_image))
        .route("/images/user/{user_id}", get(images::list_user_images))
        .route("/images/{id}", delete(images::delete_image))
        .route("/images/{id}/like", post(images::toggle_like))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::user_by_id))
        .route("/users/username/{username}", get(users::user_by_username))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

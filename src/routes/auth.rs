//! Auth routes — GitHub OAuth flow and session management.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::error::ApiError;
use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";
const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

/// Where the SPA lands after a failed handshake. The client reads the query
/// flag and shows inline error text; no JSON error ever leaves the callback.
const LOGIN_ERROR_LOCATION: &str = "/login?error=auth_failed";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("GITHUB_REDIRECT_URI")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::AuthRequired);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await?
            .ok_or(ApiError::AuthRequired)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /auth/github` — redirect to the GitHub authorization page.
pub async fn github_redirect(State(state): State<AppState>) -> Response {
    let Some(config) = &state.github else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "GitHub OAuth not configured" })),
        )
            .into_response();
    };

    let oauth_state = session::generate_token();
    let secure = cookie_secure();
    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&config.authorize_url(&oauth_state))).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
}

/// `GET /auth/github/callback` — complete the handshake.
///
/// On success: find-or-create the user, open a session, set the cookie and
/// redirect to `/`. Every failure path redirects to the login page with an
/// error flag instead of surfacing JSON.
pub async fn github_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(config) = &state.github else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "GitHub OAuth not configured" })),
        )
            .into_response();
    };
    let secure = cookie_secure();

    // Provider denied, or the user cancelled: no code in the query.
    let Some(code) = params.code.as_deref() else {
        return Redirect::temporary(LOGIN_ERROR_LOCATION).into_response();
    };

    // Verify OAuth CSRF state from cookie.
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || params.state.as_deref() != Some(expected_state) {
        tracing::warn!("oauth state mismatch on callback");
        return Redirect::temporary(LOGIN_ERROR_LOCATION).into_response();
    }

    let access_token = match auth_svc::exchange_code(config, code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "oauth code exchange failed");
            return Redirect::temporary(LOGIN_ERROR_LOCATION).into_response();
        }
    };

    let profile = match auth_svc::fetch_github_profile(&access_token).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "github profile fetch failed");
            return Redirect::temporary(LOGIN_ERROR_LOCATION).into_response();
        }
    };

    let user_id = match auth_svc::find_or_create_user(&state.pool, &profile).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "user lookup/creation failed");
            return Redirect::temporary(LOGIN_ERROR_LOCATION).into_response();
        }
    };

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return Redirect::temporary(LOGIN_ERROR_LOCATION).into_response();
        }
    };

    let jar = jar
        .add(session_cookie(token, secure))
        .add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    (jar, Redirect::temporary("/")).into_response()
}

/// `GET /auth/user` — current user summary for the SPA header.
/// Anonymous callers are rejected by the extractor with a 401.
pub async fn me(auth: AuthUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "user": auth.user }))
}

/// `POST /auth/logout` — delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse, ApiError> {
    session::delete_session(&state.pool, &auth.token)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "session teardown failed");
            ApiError::Internal("Logout failed")
        })?;

    let jar = CookieJar::new().add(expired_cookie(COOKIE_NAME, cookie_secure()));
    Ok((jar, Json(serde_json::json!({ "message": "Logged out successfully" }))))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub user: Option<session::SessionUser>,
}

/// `GET /auth/status` — report the caller's identity. Always 200; anonymous
/// callers get `{isAuthenticated: false, user: null}`.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Json<AuthStatus> {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();

    let user = if token.is_empty() {
        None
    } else {
        match session::validate_session(&state.pool, token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "session validation failed on status check");
                None
            }
        }
    };

    Json(AuthStatus { is_authenticated: user.is_some(), user })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

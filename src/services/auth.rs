//! GitHub OAuth service — code exchange, profile fetch, first-login user creation.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// GitHub OAuth configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl GitHubConfig {
    /// Load from `GITHUB_CLIENT_ID`, `GITHUB_CLIENT_SECRET`, `GITHUB_REDIRECT_URI`.
    /// Returns `None` if any are missing (auth will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("GITHUB_CLIENT_ID").ok()?;
        let client_secret = std::env::var("GITHUB_CLIENT_SECRET").ok()?;
        let redirect_uri = std::env::var("GITHUB_REDIRECT_URI").ok()?;
        Some(Self { client_id, client_secret, redirect_uri })
    }

    /// Build the GitHub authorization URL with a CSRF state parameter.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "https://github.com/login/oauth/authorize?client_id={}&redirect_uri={}&scope=user:email&state={}",
            self.client_id, self.redirect_uri, state
        )
    }
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Profile payload from `GET https://api.github.com/user`.
#[derive(Debug, serde::Deserialize)]
pub struct GitHubProfile {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl GitHubProfile {
    /// Display name falls back to the login when GitHub has no real name set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("github token exchange failed: {0}")]
    TokenExchange(String),
    #[error("github api error: {0}")]
    GitHubApi(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Exchange an OAuth code for an access token.
pub async fn exchange_code(config: &GitHubConfig, code: &str) -> Result<String, AuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .post("https://github.com/login/oauth/access_token")
        .header("Accept", "application/json")
        .json(&serde_json::json!({
            "client_id": config.client_id,
            "client_secret": config.client_secret,
            "code": code,
            "redirect_uri": config.redirect_uri,
        }))
        .send()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    let body = resp
        .text()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
    let token_resp: TokenResponse =
        serde_json::from_str(&body).map_err(|_| AuthError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token_resp.access_token)
}

/// Fetch the authenticated GitHub user's profile.
pub async fn fetch_github_profile(access_token: &str) -> Result<GitHubProfile, AuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .get("https://api.github.com/user")
        .header("Authorization", format!("Bearer {access_token}"))
        .header("User-Agent", "pinboard")
        .send()
        .await
        .map_err(|e| AuthError::GitHubApi(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::GitHubApi(format!("{status}: {body}")));
    }

    resp.json::<GitHubProfile>()
        .await
        .map_err(|e| AuthError::GitHubApi(e.to_string()))
}

/// Find a user by GitHub ID, creating one from the profile on first login.
/// Returns the user's UUID.
///
/// Profile fields are written once and never refreshed on re-login; the
/// first successful handshake wins. The no-op `ON CONFLICT` update lets a
/// concurrent first login still return the existing row.
pub async fn find_or_create_user(pool: &PgPool, profile: &GitHubProfile) -> Result<Uuid, AuthError> {
    let github_id = profile.id.to_string();

    let existing = sqlx::query("SELECT id FROM users WHERE github_id = $1")
        .bind(&github_id)
        .fetch_optional(pool)
        .await?;
    if let Some(row) = existing {
        return Ok(row.get("id"));
    }

    let row = sqlx::query(
        r"INSERT INTO users (id, github_id, username, display_name, profile_url, avatar_url, email)
          VALUES ($1, $2, $3, $4, $5, $6, $7)
          ON CONFLICT (github_id) DO UPDATE SET github_id = EXCLUDED.github_id
          RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(&github_id)
    .bind(&profile.login)
    .bind(profile.display_name())
    .bind(&profile.html_url)
    .bind(&profile.avatar_url)
    .bind(&profile.email)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

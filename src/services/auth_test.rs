use super::*;

fn test_config() -> GitHubConfig {
    GitHubConfig {
        client_id: "client123".into(),
        client_secret: "secret456".into(),
        redirect_uri: "http://localhost:3000/auth/github/callback".into(),
    }
}

// =============================================================================
// authorize_url
// =============================================================================

#[test]
fn authorize_url_contains_client_id_and_redirect() {
    let url = test_config().authorize_url("abc123");
    assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
    assert!(url.contains("client_id=client123"));
    assert!(url.contains("redirect_uri=http://localhost:3000/auth/github/callback"));
}

#[test]
fn authorize_url_requests_email_scope() {
    let url = test_config().authorize_url("abc123");
    assert!(url.contains("scope=user:email"));
}

#[test]
fn authorize_url_carries_state() {
    let url = test_config().authorize_url("deadbeef");
    assert!(url.ends_with("&state=deadbeef"));
}

// =============================================================================
// GitHubProfile
// =============================================================================

#[test]
fn profile_deserializes_github_payload() {
    let payload = r#"{
        "id": 583231,
        "login": "octocat",
        "name": "The Octocat",
        "html_url": "https://github.com/octocat",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231",
        "email": null,
        "public_repos": 8
    }"#;
    let profile: GitHubProfile = serde_json::from_str(payload).unwrap();
    assert_eq!(profile.id, 583_231);
    assert_eq!(profile.login, "octocat");
    assert_eq!(profile.display_name(), "The Octocat");
    assert!(profile.email.is_none());
}

#[test]
fn profile_tolerates_missing_optional_fields() {
    let profile: GitHubProfile = serde_json::from_str(r#"{"id": 1, "login": "ghost"}"#).unwrap();
    assert!(profile.name.is_none());
    assert!(profile.avatar_url.is_none());
    assert!(profile.html_url.is_none());
}

#[test]
fn display_name_falls_back_to_login_when_name_missing() {
    let profile: GitHubProfile = serde_json::from_str(r#"{"id": 1, "login": "ghost", "name": null}"#).unwrap();
    assert_eq!(profile.display_name(), "ghost");
}

#[test]
fn display_name_falls_back_to_login_when_name_blank() {
    let profile: GitHubProfile = serde_json::from_str(r#"{"id": 1, "login": "ghost", "name": "   "}"#).unwrap();
    assert_eq!(profile.display_name(), "ghost");
}

// =============================================================================
// AuthError
// =============================================================================

#[test]
fn auth_error_display_includes_detail() {
    let err = AuthError::TokenExchange("connection refused".into());
    assert!(err.to_string().contains("connection refused"));
}

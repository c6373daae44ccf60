use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser
// =============================================================================

#[test]
fn session_user_serializes_camel_case() {
    let user = SessionUser {
        id: Uuid::nil(),
        username: "octocat".into(),
        display_name: "The Octocat".into(),
        avatar_url: Some("https://example.com/avatar.png".into()),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["username"], "octocat");
    assert_eq!(json["displayName"], "The Octocat");
    assert_eq!(json["avatarUrl"], "https://example.com/avatar.png");
    assert!(json.get("display_name").is_none());
}

#[test]
fn session_user_serializes_none_avatar_as_null() {
    let user = SessionUser {
        id: Uuid::nil(),
        username: "ghost".into(),
        display_name: "ghost".into(),
        avatar_url: None,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json["avatarUrl"].is_null());
}

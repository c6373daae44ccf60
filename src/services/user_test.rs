use super::*;

#[test]
fn summary_columns_exclude_private_fields() {
    assert!(!SUMMARY_COLUMNS.contains("email"));
    assert!(!SUMMARY_COLUMNS.contains("github_id"));
}

#[test]
fn summary_columns_format_timestamp_as_utc() {
    assert!(SUMMARY_COLUMNS.contains("AT TIME ZONE 'UTC'"));
    assert!(SUMMARY_COLUMNS.contains("AS created_at"));
}

#[test]
fn user_row_clone_preserves_fields() {
    let row = UserRow {
        id: Uuid::nil(),
        username: "octocat".into(),
        display_name: "The Octocat".into(),
        avatar_url: None,
        created_at: "2026-01-01T00:00:00Z".into(),
    };
    let cloned = row.clone();
    assert_eq!(cloned.username, row.username);
    assert_eq!(cloned.created_at, row.created_at);
}

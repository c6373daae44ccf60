use super::*;

fn body(url: &str, title: &str, description: Option<&str>) -> CreateImageBody {
    CreateImageBody {
        url: Some(url.to_owned()),
        title: Some(title.to_owned()),
        description: description.map(ToOwned::to_owned),
    }
}

// =============================================================================
// validate_create_image
// =============================================================================

#[test]
fn valid_body_passes_and_is_trimmed() {
    let body = body("  https://example.com/cat.png  ", "  Cat  ", Some("  a cat  "));
    let image = validate_create_image(&body).unwrap();
    assert_eq!(image.url, "https://example.com/cat.png");
    assert_eq!(image.title, "Cat");
    assert_eq!(image.description, "a cat");
}

#[test]
fn missing_description_defaults_to_empty() {
    let image = validate_create_image(&body("http://example.com/a.png", "a", None)).unwrap();
    assert_eq!(image.description, "");
}

#[test]
fn invalid_url_is_rejected() {
    for bad in ["", "not a url", "example.com/no-scheme", "ftp://example.com/x", "https://"] {
        let err = validate_create_image(&body(bad, "ok", None)).unwrap_err();
        assert!(
            err.iter().any(|e| e.field == "url"),
            "expected url error for {bad:?}"
        );
    }
}

#[test]
fn missing_title_is_rejected() {
    let body = CreateImageBody { url: Some("https://example.com/a.png".into()), title: None, description: None };
    let err = validate_create_image(&body).unwrap_err();
    assert!(err.iter().any(|e| e.field == "title"));
}

#[test]
fn whitespace_only_title_is_rejected() {
    let err = validate_create_image(&body("https://example.com/a.png", "   ", None)).unwrap_err();
    assert!(err.iter().any(|e| e.field == "title"));
}

#[test]
fn title_at_100_chars_passes() {
    let title = "x".repeat(100);
    assert!(validate_create_image(&body("https://example.com/a.png", &title, None)).is_ok());
}

#[test]
fn title_at_101_chars_fails_with_title_error() {
    let title = "x".repeat(101);
    let err = validate_create_image(&body("https://example.com/a.png", &title, None)).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err[0].field, "title");
    assert_eq!(err[0].message, "Title must be 1-100 characters");
}

#[test]
fn title_length_counts_chars_not_bytes() {
    // 100 two-byte characters; 200 bytes but still within the limit.
    let title = "é".repeat(100);
    assert!(validate_create_image(&body("https://example.com/a.png", &title, None)).is_ok());
}

#[test]
fn description_at_500_chars_passes() {
    let description = "d".repeat(500);
    assert!(validate_create_image(&body("https://example.com/a.png", "t", Some(&description))).is_ok());
}

#[test]
fn description_over_500_chars_fails() {
    let description = "d".repeat(501);
    let err = validate_create_image(&body("https://example.com/a.png", "t", Some(&description))).unwrap_err();
    assert_eq!(err[0].field, "description");
}

#[test]
fn all_invalid_fields_are_reported_together() {
    let body = CreateImageBody {
        url: Some("nope".into()),
        title: Some(String::new()),
        description: Some("d".repeat(501)),
    };
    let err = validate_create_image(&body).unwrap_err();
    let fields: Vec<_> = err.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["url", "title", "description"]);
}

// =============================================================================
// pagination
// =============================================================================

#[test]
fn paging_defaults_to_page_1_limit_20() {
    assert_eq!(normalize_paging(&PageQuery::default()), (1, 20));
}

#[test]
fn paging_floors_non_positive_values() {
    let query = PageQuery { page: Some(0), limit: Some(-5) };
    assert_eq!(normalize_paging(&query), (1, 1));
}

#[test]
fn paging_passes_explicit_values_through() {
    let query = PageQuery { page: Some(3), limit: Some(50) };
    assert_eq!(normalize_paging(&query), (3, 50));
}

#[test]
fn page_count_is_ceiling_of_total_over_limit() {
    assert_eq!(page_count(0, 20), 0);
    assert_eq!(page_count(1, 20), 1);
    assert_eq!(page_count(20, 20), 1);
    assert_eq!(page_count(21, 20), 2);
    assert_eq!(page_count(41, 20), 3);
}

#[test]
fn page_count_survives_extreme_limits() {
    assert_eq!(page_count(0, i64::MAX), 0);
    assert_eq!(page_count(5, i64::MAX), 1);
    assert_eq!(page_count(i64::MAX, 1), i64::MAX);
}

#[test]
fn huge_page_numbers_pass_through_as_valid_paging() {
    // A page far past the end must select an empty window, not fault.
    let query = PageQuery { page: Some(i64::MAX), limit: None };
    assert_eq!(normalize_paging(&query), (i64::MAX, 20));
}

// =============================================================================
// response shapes
// =============================================================================

fn sample_record() -> ImageRecord {
    ImageRecord {
        id: Uuid::nil(),
        url: "https://example.com/a.png".into(),
        title: "A".into(),
        description: String::new(),
        likes: vec![Uuid::nil()],
        likes_count: 1,
        created_at: "2026-01-01T00:00:00Z".into(),
        owner_id: Uuid::nil(),
        owner_username: "octocat".into(),
        owner_display_name: "The Octocat".into(),
        owner_avatar_url: None,
    }
}

#[test]
fn image_response_serializes_camel_case_with_embedded_owner() {
    let json = serde_json::to_value(to_response(sample_record())).unwrap();
    assert_eq!(json["likesCount"], 1);
    assert_eq!(json["createdAt"], "2026-01-01T00:00:00Z");
    assert_eq!(json["owner"]["username"], "octocat");
    assert_eq!(json["owner"]["displayName"], "The Octocat");
    assert!(json["owner"]["avatarUrl"].is_null());
    assert_eq!(json["likes"].as_array().unwrap().len(), 1);
}

#[test]
fn image_page_envelope_has_images_and_pagination() {
    let page = ImagePage {
        images: vec![],
        pagination: Pagination { page: 7, limit: 20, total: 0, pages: 0 },
    };
    let json = serde_json::to_value(&page).unwrap();
    assert!(json["images"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["page"], 7);
    assert_eq!(json["pagination"]["pages"], 0);
}

//! Tests for domain models.

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::db::models::*;

fn jane() -> Account {
    Account {
        id: 1,
        name: "Jane".to_string(),
        email: "jane@example.com".to_string(),
        active: true,
        fav_color: "red".to_string(),
        fav_numbers: vec![1, 2, 3],
        properties: json!({"tier": "gold"}),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn account_display_lists_every_field() {
    let text = jane().to_string();

    assert!(text.starts_with("Account #1\n"));
    assert!(text.contains("Name:        Jane"));
    assert!(text.contains("Email:       jane@example.com"));
    assert!(text.contains("Active:      true"));
    assert!(text.contains("Fav numbers: [1, 2, 3]"));
    assert!(text.contains(r#"Properties:  {"tier":"gold"}"#));
    assert!(text.contains("Created at:  2025-01-01T12:00:00+00:00"));
}

#[test]
fn account_serializes_with_snake_case_fields() {
    let value = serde_json::to_value(jane()).unwrap();

    assert_eq!(value["fav_color"], "red");
    assert_eq!(value["fav_numbers"], json!([1, 2, 3]));
    assert_eq!(value["created_at"], "2025-01-01T12:00:00Z");
}

#[test]
fn default_filter_is_empty() {
    assert!(AccountFilter::default().is_empty());
    assert!(!AccountFilter::new().with_active(false).is_empty());
    assert!(!AccountFilter::new().with_names(["Jane"]).is_empty());
}

#[test]
fn filter_deserializes_with_missing_fields() {
    let filter: AccountFilter = serde_json::from_str(r#"{"active": true}"#).unwrap();

    assert_eq!(filter, AccountFilter::new().with_active(true));
    assert!(filter.names.is_empty());
    assert!(filter.fav_colors.is_empty());
}

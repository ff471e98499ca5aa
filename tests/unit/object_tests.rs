//! SqlObject identity, formatting, and comparison tests

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pretty_assertions::assert_eq;
use sqlmeta::{SchemaDefaults, SqlMetaError, SqlObject, SqlObjectType};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_object_type_parse_case_insensitive() {
    assert_eq!(SqlObjectType::parse("table"), SqlObjectType::Table);
    assert_eq!(SqlObjectType::parse("Table"), SqlObjectType::Table);
    assert_eq!(SqlObjectType::parse("VIEW"), SqlObjectType::View);
    assert_eq!(
        SqlObjectType::parse("materialized_view"),
        SqlObjectType::MaterializedView
    );
    assert_eq!(
        SqlObjectType::parse("foreign_data_wrapper"),
        SqlObjectType::ForeignDataWrapper
    );
}

#[test]
fn test_object_type_unknown_fallback() {
    assert_eq!(SqlObjectType::parse("FROBNICATE"), SqlObjectType::Unknown);
    assert_eq!(SqlObjectType::parse(""), SqlObjectType::Unknown);
    // Spaces are not normalized for object kinds (unlike constraint kinds)
    assert_eq!(
        SqlObjectType::parse("MATERIALIZED VIEW"),
        SqlObjectType::Unknown
    );
}

#[test]
fn test_constructor_accepts_string_type() {
    let obj = SqlObject::new("users", "table", None, None);
    assert_eq!(obj.object_type, SqlObjectType::Table);

    let obj = SqlObject::new("users", "nonsense", None, None);
    assert_eq!(obj.object_type, SqlObjectType::Unknown);

    let obj = SqlObject::new("users", SqlObjectType::View, None, None);
    assert_eq!(obj.object_type, SqlObjectType::View);
}

#[test]
fn test_equality_case_insensitive_name_and_schema() {
    let a = SqlObject::new("Users", SqlObjectType::Table, Some("Public".to_string()), None);
    let b = SqlObject::new("USERS", SqlObjectType::Table, Some("public".to_string()), None);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_equality_none_schema_matches_empty() {
    let a = SqlObject::new("users", SqlObjectType::Table, None, None);
    let b = SqlObject::new("users", SqlObjectType::Table, Some(String::new()), None);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_inequality_on_type_and_schema() {
    let table = SqlObject::new("users", SqlObjectType::Table, None, None);
    let view = SqlObject::new("users", SqlObjectType::View, None, None);
    assert_ne!(table, view);

    let public = SqlObject::new("users", SqlObjectType::Table, Some("public".to_string()), None);
    let other = SqlObject::new("users", SqlObjectType::Table, Some("audit".to_string()), None);
    assert_ne!(public, other);
}

#[test]
fn test_display_with_and_without_schema() {
    let with_schema =
        SqlObject::new("users", SqlObjectType::Table, Some("public".to_string()), None);
    assert_eq!(with_schema.to_string(), "TABLE public.users");

    let without_schema = SqlObject::new("users", SqlObjectType::Table, None, None);
    assert_eq!(without_schema.to_string(), "TABLE users");
}

#[test]
fn test_format_identifier_uses_own_dialect() {
    let pg = SqlObject::new(
        "users",
        SqlObjectType::Table,
        None,
        Some("postgresql".to_string()),
    );
    assert_eq!(pg.format_identifier("users"), "\"users\"");

    let mysql = SqlObject::new("users", SqlObjectType::Table, None, Some("mysql".to_string()));
    assert_eq!(mysql.format_identifier("users"), "`users`");

    let plain = SqlObject::new("users", SqlObjectType::Table, None, None);
    assert_eq!(plain.format_identifier("users"), "users");
}

#[test]
fn test_explicit_properties_tracking() {
    let mut obj = SqlObject::new("users", SqlObjectType::Table, None, None);
    assert!(!obj.is_property_explicit("tablespace"));

    obj.mark_property_explicit("tablespace");
    assert!(obj.is_property_explicit("tablespace"));
    assert!(!obj.is_property_explicit("owner"));
}

#[test]
fn test_compare_with_defaults_same_object() {
    let a = SqlObject::new("users", SqlObjectType::Table, Some("public".to_string()), None);
    let b = SqlObject::new("USERS", SqlObjectType::Table, Some("PUBLIC".to_string()), None);

    let diffs = a
        .compare_with_defaults(&b, &SchemaDefaults::new())
        .expect("same kind must compare");
    assert!(diffs.is_empty());
}

#[test]
fn test_compare_with_defaults_reports_differences() {
    let a = SqlObject::new("users", SqlObjectType::Table, Some("public".to_string()), None);
    let b = SqlObject::new("accounts", SqlObjectType::Table, None, None);

    let diffs = a
        .compare_with_defaults(&b, &SchemaDefaults::new())
        .expect("same kind must compare");
    assert_eq!(diffs.len(), 2);
    assert_eq!(diffs["name"].this, serde_json::json!("users"));
    assert_eq!(diffs["name"].other, serde_json::json!("accounts"));
    assert_eq!(diffs["schema"].this, serde_json::json!("public"));
    assert_eq!(diffs["schema"].other, serde_json::json!(""));
}

#[test]
fn test_compare_with_defaults_type_mismatch_is_error() {
    let table = SqlObject::new("users", SqlObjectType::Table, None, None);
    let view = SqlObject::new("users", SqlObjectType::View, None, None);

    let err = table
        .compare_with_defaults(&view, &SchemaDefaults::new())
        .expect_err("different kinds must not compare");
    assert_eq!(
        err,
        SqlMetaError::ComparisonTypeMismatch {
            left: SqlObjectType::Table,
            right: SqlObjectType::View,
        }
    );
}

//! SqlColumn value object tests

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pretty_assertions::assert_eq;
use sqlmeta::SqlColumn;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_new_defaults() {
    let col = SqlColumn::new("id", "INT");
    assert!(col.nullable);
    assert!(!col.is_primary_key);
    assert!(!col.is_unique);
    assert!(!col.is_identity);
    assert!(!col.is_computed);
    assert!(col.constraints.is_empty());
    assert_eq!(col.ordinal_position, None);
}

#[test]
fn test_equality_name_and_type_only() {
    let mut a = SqlColumn::new("Email", "VARCHAR(255)");
    let b = SqlColumn::new("email", "varchar(255)");

    // Non-identity attributes must not affect equality
    a.nullable = false;
    a.is_primary_key = true;
    a.comment = Some("primary email".to_string());
    a.ordinal_position = Some(2);

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_inequality_on_data_type() {
    let a = SqlColumn::new("email", "VARCHAR(255)");
    let b = SqlColumn::new("email", "TEXT");
    assert_ne!(a, b);
}

#[test]
fn test_display_nullability() {
    let nullable = SqlColumn::new("name", "VARCHAR(100)");
    assert_eq!(nullable.to_string(), "name VARCHAR(100)");

    let mut not_null = SqlColumn::new("id", "INT");
    not_null.nullable = false;
    assert_eq!(not_null.to_string(), "id INT NOT NULL");
}

#[test]
fn test_identity_metadata() {
    let mut col = SqlColumn::new("id", "BIGINT");
    col.is_identity = true;
    col.identity_generation = Some("ALWAYS".to_string());
    col.identity_seed = Some(1);
    col.identity_increment = Some(1);

    assert!(col.is_identity);
    assert_eq!(col.identity_generation.as_deref(), Some("ALWAYS"));
}

#[test]
fn test_computed_metadata() {
    let mut col = SqlColumn::new("total", "DECIMAL(10,2)");
    col.is_computed = true;
    col.computed_expression = Some("price * quantity".to_string());
    col.computed_stored = true;

    assert!(col.is_computed);
    assert!(col.computed_stored);
}

#[test]
fn test_explicit_properties_tracking() {
    let mut col = SqlColumn::new("id", "INT");
    assert!(!col.is_property_explicit("nullable"));

    col.mark_property_explicit("nullable");
    assert!(col.is_property_explicit("nullable"));
    assert!(!col.is_property_explicit("default_value"));
}

#[test]
fn test_explicit_properties_are_per_instance() {
    let mut a = SqlColumn::new("id", "INT");
    let b = SqlColumn::new("id", "INT");

    a.mark_property_explicit("nullable");
    assert!(a.is_property_explicit("nullable"));
    assert!(!b.is_property_explicit("nullable"));
}

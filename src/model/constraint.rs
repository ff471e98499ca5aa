//! Table constraint value object.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SqlMetaError;

/// Kinds of SQL constraints.
///
/// Unrecognized kind strings map to [`ConstraintType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    NotNull,
    Default,
    Exclude,
    #[serde(other)]
    Unknown,
}

impl ConstraintType {
    /// Parses a constraint kind case-insensitively, falling back to
    /// `Unknown`. Spaces normalize to underscores first, so both
    /// `"PRIMARY KEY"` and `"primary_key"` match.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().replace(' ', "_").as_str() {
            "PRIMARY_KEY" => ConstraintType::PrimaryKey,
            "FOREIGN_KEY" => ConstraintType::ForeignKey,
            "UNIQUE" => ConstraintType::Unique,
            "CHECK" => ConstraintType::Check,
            "NOT_NULL" => ConstraintType::NotNull,
            "DEFAULT" => ConstraintType::Default,
            "EXCLUDE" => ConstraintType::Exclude,
            _ => ConstraintType::Unknown,
        }
    }

    /// The SQL spelling of the kind (`PRIMARY KEY`, `NOT NULL`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::PrimaryKey => "PRIMARY KEY",
            ConstraintType::ForeignKey => "FOREIGN KEY",
            ConstraintType::Unique => "UNIQUE",
            ConstraintType::Check => "CHECK",
            ConstraintType::NotNull => "NOT NULL",
            ConstraintType::Default => "DEFAULT",
            ConstraintType::Exclude => "EXCLUDE",
            ConstraintType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConstraintType {
    fn from(s: &str) -> Self {
        ConstraintType::parse(s)
    }
}

impl From<String> for ConstraintType {
    fn from(s: String) -> Self {
        ConstraintType::parse(&s)
    }
}

/// A constraint in a database table.
///
/// Identity is the (constraint_type, case-insensitive name, set of
/// case-insensitive column names) triple; column order never matters, and
/// duplicate column entries collapse so equality stays consistent with
/// hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlConstraint {
    pub constraint_type: ConstraintType,
    #[serde(default)]
    pub name: Option<String>,
    /// Columns the constraint covers, in declaration order.
    #[serde(default)]
    pub column_names: Vec<String>,
    /// For foreign keys: the referenced table.
    #[serde(default)]
    pub reference_table: Option<String>,
    /// For foreign keys: the schema of the referenced table.
    #[serde(default)]
    pub reference_schema: Option<String>,
    /// For foreign keys: the referenced columns.
    #[serde(default)]
    pub reference_columns: Vec<String>,
    /// For check constraints: the check expression.
    #[serde(default)]
    pub check_expression: Option<String>,
    #[serde(default)]
    pub dialect: Option<String>,
    #[serde(default)]
    pub explicit_properties: IndexMap<String, bool>,
}

impl SqlConstraint {
    /// Creates an unnamed constraint of the given kind. The kind may be
    /// given as an enum value or any string; unrecognized strings classify
    /// as `Unknown`.
    pub fn new(constraint_type: impl Into<ConstraintType>) -> Self {
        SqlConstraint {
            constraint_type: constraint_type.into(),
            name: None,
            column_names: Vec::new(),
            reference_table: None,
            reference_schema: None,
            reference_columns: Vec::new(),
            check_expression: None,
            dialect: None,
            explicit_properties: IndexMap::new(),
        }
    }

    /// The columns the constraint covers. Alias for `column_names`.
    pub fn columns(&self) -> &[String] {
        &self.column_names
    }

    /// Records that a property was explicitly supplied rather than inherited
    /// from a schema default.
    pub fn mark_property_explicit(&mut self, property_name: &str) {
        self.explicit_properties
            .insert(property_name.to_string(), true);
    }

    /// Whether a property was explicitly supplied.
    pub fn is_property_explicit(&self, property_name: &str) -> bool {
        self.explicit_properties
            .get(property_name)
            .copied()
            .unwrap_or(false)
    }

    /// Converts the constraint to a JSON value snapshot.
    pub fn to_value(&self) -> Result<Value, SqlMetaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstructs a constraint from a snapshot produced by
    /// [`Self::to_value`].
    pub fn from_value(value: Value) -> Result<Self, SqlMetaError> {
        Ok(serde_json::from_value(value)?)
    }

    fn identity_key(&self) -> (ConstraintType, String, BTreeSet<String>) {
        (
            self.constraint_type,
            self.name.as_deref().unwrap_or("").to_lowercase(),
            self.column_names
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
        )
    }
}

impl fmt::Display for SqlConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.column_names.join(", ");
        match &self.name {
            Some(name) => write!(f, "{} {} ({})", self.constraint_type, name, columns),
            None => write!(f, "{} ({})", self.constraint_type, columns),
        }
    }
}

impl PartialEq for SqlConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for SqlConstraint {}

impl Hash for SqlConstraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

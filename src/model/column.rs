//! Table column value object.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SqlMetaError;
use crate::model::SqlConstraint;

/// A column in a database table.
///
/// Identity is the case-insensitive (name, data_type) pair; no other
/// attribute participates in equality or hashing. The data type is kept as
/// the raw string the producer saw — this model does not interpret types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlColumn {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_unique: bool,
    /// Constraints scoped to this column.
    #[serde(default)]
    pub constraints: Vec<SqlConstraint>,
    #[serde(default)]
    pub dialect: Option<String>,

    // Identity/auto-increment metadata
    #[serde(default)]
    pub is_identity: bool,
    /// Generation strategy: `ALWAYS` or `BY DEFAULT`.
    #[serde(default)]
    pub identity_generation: Option<String>,
    #[serde(default)]
    pub identity_seed: Option<i64>,
    #[serde(default)]
    pub identity_increment: Option<i64>,

    // Computed/generated column metadata
    #[serde(default)]
    pub is_computed: bool,
    #[serde(default)]
    pub computed_expression: Option<String>,
    /// Whether the computed value is physically stored (vs virtual).
    #[serde(default)]
    pub computed_stored: bool,

    #[serde(default)]
    pub comment: Option<String>,
    /// 1-based position of the column in its table.
    #[serde(default)]
    pub ordinal_position: Option<u32>,

    #[serde(default)]
    pub explicit_properties: IndexMap<String, bool>,
}

impl SqlColumn {
    /// Creates a nullable column with no further metadata. The remaining
    /// fields are public and filled in directly by the producer.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        SqlColumn {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            default_value: None,
            is_primary_key: false,
            is_unique: false,
            constraints: Vec::new(),
            dialect: None,
            is_identity: false,
            identity_generation: None,
            identity_seed: None,
            identity_increment: None,
            is_computed: false,
            computed_expression: None,
            computed_stored: false,
            comment: None,
            ordinal_position: None,
            explicit_properties: IndexMap::new(),
        }
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

    /// Converts the column to a JSON value snapshot.
    pub fn to_value(&self) -> Result<Value, SqlMetaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstructs a column from a snapshot produced by [`Self::to_value`].
    pub fn from_value(value: Value) -> Result<Self, SqlMetaError> {
        Ok(serde_json::from_value(value)?)
    }

    fn identity_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.data_type.to_lowercase())
    }
}

impl fmt::Display for SqlColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if !self.nullable {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

impl PartialEq for SqlColumn {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for SqlColumn {}

impl Hash for SqlColumn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

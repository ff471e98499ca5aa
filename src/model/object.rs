//! Base SQL object: the named, typed, schema-scoped entity every richer
//! object kind builds on.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dialect::quote_identifier;
use crate::error::SqlMetaError;

/// SQL object kinds that can be created, modified, or dropped.
///
/// Unrecognized kind strings map to [`SqlObjectType::Unknown`] rather than
/// failing; the model never rejects input on classification grounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlObjectType {
    Table,
    View,
    Index,
    Sequence,
    Procedure,
    Function,
    Trigger,
    Constraint,
    Schema,
    Database,
    Type,
    Role,
    User,
    MaterializedView,
    Package,
    PackageBody,
    Synonym,
    /// MySQL scheduled events
    Event,
    /// Table partitions
    Partition,
    /// Oracle database links
    DatabaseLink,
    /// PostgreSQL extensions
    Extension,
    /// PostgreSQL foreign data wrappers
    ForeignDataWrapper,
    /// PostgreSQL foreign servers
    ForeignServer,
    #[serde(other)]
    Unknown,
}

impl SqlObjectType {
    /// Parses a kind name case-insensitively, falling back to `Unknown`.
    ///
    /// Matching is on the variant name (`"materialized_view"` works,
    /// `"materialized view"` does not).
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TABLE" => SqlObjectType::Table,
            "VIEW" => SqlObjectType::View,
            "INDEX" => SqlObjectType::Index,
            "SEQUENCE" => SqlObjectType::Sequence,
            "PROCEDURE" => SqlObjectType::Procedure,
            "FUNCTION" => SqlObjectType::Function,
            "TRIGGER" => SqlObjectType::Trigger,
            "CONSTRAINT" => SqlObjectType::Constraint,
            "SCHEMA" => SqlObjectType::Schema,
            "DATABASE" => SqlObjectType::Database,
            "TYPE" => SqlObjectType::Type,
            "ROLE" => SqlObjectType::Role,
            "USER" => SqlObjectType::User,
            "MATERIALIZED_VIEW" => SqlObjectType::MaterializedView,
            "PACKAGE" => SqlObjectType::Package,
            "PACKAGE_BODY" => SqlObjectType::PackageBody,
            "SYNONYM" => SqlObjectType::Synonym,
            "EVENT" => SqlObjectType::Event,
            "PARTITION" => SqlObjectType::Partition,
            "DATABASE_LINK" => SqlObjectType::DatabaseLink,
            "EXTENSION" => SqlObjectType::Extension,
            "FOREIGN_DATA_WRAPPER" => SqlObjectType::ForeignDataWrapper,
            "FOREIGN_SERVER" => SqlObjectType::ForeignServer,
            _ => SqlObjectType::Unknown,
        }
    }

    /// The canonical name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlObjectType::Table => "TABLE",
            SqlObjectType::View => "VIEW",
            SqlObjectType::Index => "INDEX",
            SqlObjectType::Sequence => "SEQUENCE",
            SqlObjectType::Procedure => "PROCEDURE",
            SqlObjectType::Function => "FUNCTION",
            SqlObjectType::Trigger => "TRIGGER",
            SqlObjectType::Constraint => "CONSTRAINT",
            SqlObjectType::Schema => "SCHEMA",
            SqlObjectType::Database => "DATABASE",
            SqlObjectType::Type => "TYPE",
            SqlObjectType::Role => "ROLE",
            SqlObjectType::User => "USER",
            SqlObjectType::MaterializedView => "MATERIALIZED_VIEW",
            SqlObjectType::Package => "PACKAGE",
            SqlObjectType::PackageBody => "PACKAGE_BODY",
            SqlObjectType::Synonym => "SYNONYM",
            SqlObjectType::Event => "EVENT",
            SqlObjectType::Partition => "PARTITION",
            SqlObjectType::DatabaseLink => "DATABASE_LINK",
            SqlObjectType::Extension => "EXTENSION",
            SqlObjectType::ForeignDataWrapper => "FOREIGN_DATA_WRAPPER",
            SqlObjectType::ForeignServer => "FOREIGN_SERVER",
            SqlObjectType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SqlObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SqlObjectType {
    fn from(s: &str) -> Self {
        SqlObjectType::parse(s)
    }
}

impl From<String> for SqlObjectType {
    fn from(s: String) -> Self {
        SqlObjectType::parse(&s)
    }
}

/// Schema-level default values keyed by property name, used by default-aware
/// comparison.
pub type SchemaDefaults = IndexMap<String, Value>;

/// A single differing field from a comparison: the value on each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub this: Value,
    pub other: Value,
}

impl FieldDiff {
    pub fn new(this: impl Into<Value>, other: impl Into<Value>) -> Self {
        FieldDiff {
            this: this.into(),
            other: other.into(),
        }
    }
}

/// A named, typed, schema-scoped database entity.
///
/// Identity is the case-insensitive (name, object_type, schema) triple; an
/// unset schema compares equal to an empty one. Hashing uses the same
/// normalized key, so objects behave correctly in hash-based containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlObject {
    pub name: String,
    pub object_type: SqlObjectType,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub dialect: Option<String>,
    /// Tracks which properties were explicitly supplied by the producer,
    /// as opposed to filled from a schema-level default.
    #[serde(default)]
    pub explicit_properties: IndexMap<String, bool>,
}

impl SqlObject {
    /// Creates a new SQL object. The type may be given as an enum value or
    /// any string; unrecognized strings classify as `Unknown`.
    pub fn new(
        name: impl Into<String>,
        object_type: impl Into<SqlObjectType>,
        schema: Option<String>,
        dialect: Option<String>,
    ) -> Self {
        SqlObject {
            name: name.into(),
            object_type: object_type.into(),
            schema,
            dialect,
            explicit_properties: IndexMap::new(),
        }
    }

    /// Quotes an identifier according to this object's dialect.
    pub fn format_identifier<'a>(&self, identifier: &'a str) -> std::borrow::Cow<'a, str> {
        quote_identifier(identifier, self.dialect.as_deref())
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

    /// Compares two objects of the same kind, returning the differing fields
    /// mapped to the value on each side.
    ///
    /// Comparing objects of different kinds is a caller error and returns
    /// [`SqlMetaError::ComparisonTypeMismatch`] instead of a diff. The base
    /// comparison covers `name` and `schema`; richer object kinds layer
    /// their own fields onto the same map shape. `schema_defaults` is
    /// unused at this level but part of the contract: kind-specific
    /// comparisons consult it so an explicit value equal to the other
    /// side's inherited default is not reported as a difference.
    pub fn compare_with_defaults(
        &self,
        other: &SqlObject,
        _schema_defaults: &SchemaDefaults,
    ) -> Result<IndexMap<String, FieldDiff>, SqlMetaError> {
        if self.object_type != other.object_type {
            return Err(SqlMetaError::ComparisonTypeMismatch {
                left: self.object_type,
                right: other.object_type,
            });
        }

        let mut differences = IndexMap::new();

        if self.name.to_lowercase() != other.name.to_lowercase() {
            differences.insert(
                "name".to_string(),
                FieldDiff::new(self.name.clone(), other.name.clone()),
            );
        }

        let self_schema = self.schema.as_deref().unwrap_or("");
        let other_schema = other.schema.as_deref().unwrap_or("");
        if self_schema.to_lowercase() != other_schema.to_lowercase() {
            differences.insert(
                "schema".to_string(),
                FieldDiff::new(self_schema, other_schema),
            );
        }

        Ok(differences)
    }

    /// Converts the object to a JSON value snapshot.
    pub fn to_value(&self) -> Result<Value, SqlMetaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstructs an object from a snapshot produced by [`Self::to_value`].
    pub fn from_value(value: Value) -> Result<Self, SqlMetaError> {
        Ok(serde_json::from_value(value)?)
    }

    fn identity_key(&self) -> (String, SqlObjectType, String) {
        (
            self.name.to_lowercase(),
            self.object_type,
            self.schema.as_deref().unwrap_or("").to_lowercase(),
        )
    }
}

impl fmt::Display for SqlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) if !schema.is_empty() => {
                write!(f, "{} {}.{}", self.object_type, schema, self.name)
            }
            _ => write!(f, "{} {}", self.object_type, self.name),
        }
    }
}

impl PartialEq for SqlObject {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for SqlObject {}

impl Hash for SqlObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

/// A trigger and the table it fires on.
///
/// The table name is part of the trigger's bookkeeping identity: a
/// [`crate::ParseResult`] keeps at most one trigger per (name, table) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlTrigger {
    pub object: SqlObject,
    #[serde(default)]
    pub table_name: Option<String>,
}

impl SqlTrigger {
    pub fn new(object: SqlObject, table_name: Option<String>) -> Self {
        SqlTrigger { object, table_name }
    }
}

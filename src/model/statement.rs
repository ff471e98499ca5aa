//! Parsed SQL statement container.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SqlMetaError;
use crate::model::SqlObject;

/// SQL statement kinds.
///
/// Unrecognized kind strings map to [`SqlStatementType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlStatementType {
    Create,
    Alter,
    Drop,
    Insert,
    Update,
    Delete,
    Select,
    Merge,
    Truncate,
    Grant,
    Revoke,
    Comment,
    Declare,
    Begin,
    Call,
    Execute,
    Ddl,
    Dml,
    Query,
    #[serde(other)]
    Unknown,
}

impl SqlStatementType {
    /// Parses a statement kind case-insensitively, falling back to
    /// `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "CREATE" => SqlStatementType::Create,
            "ALTER" => SqlStatementType::Alter,
            "DROP" => SqlStatementType::Drop,
            "INSERT" => SqlStatementType::Insert,
            "UPDATE" => SqlStatementType::Update,
            "DELETE" => SqlStatementType::Delete,
            "SELECT" => SqlStatementType::Select,
            "MERGE" => SqlStatementType::Merge,
            "TRUNCATE" => SqlStatementType::Truncate,
            "GRANT" => SqlStatementType::Grant,
            "REVOKE" => SqlStatementType::Revoke,
            "COMMENT" => SqlStatementType::Comment,
            "DECLARE" => SqlStatementType::Declare,
            "BEGIN" => SqlStatementType::Begin,
            "CALL" => SqlStatementType::Call,
            "EXECUTE" => SqlStatementType::Execute,
            "DDL" => SqlStatementType::Ddl,
            "DML" => SqlStatementType::Dml,
            "QUERY" => SqlStatementType::Query,
            _ => SqlStatementType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SqlStatementType::Create => "CREATE",
            SqlStatementType::Alter => "ALTER",
            SqlStatementType::Drop => "DROP",
            SqlStatementType::Insert => "INSERT",
            SqlStatementType::Update => "UPDATE",
            SqlStatementType::Delete => "DELETE",
            SqlStatementType::Select => "SELECT",
            SqlStatementType::Merge => "MERGE",
            SqlStatementType::Truncate => "TRUNCATE",
            SqlStatementType::Grant => "GRANT",
            SqlStatementType::Revoke => "REVOKE",
            SqlStatementType::Comment => "COMMENT",
            SqlStatementType::Declare => "DECLARE",
            SqlStatementType::Begin => "BEGIN",
            SqlStatementType::Call => "CALL",
            SqlStatementType::Execute => "EXECUTE",
            SqlStatementType::Ddl => "DDL",
            SqlStatementType::Dml => "DML",
            SqlStatementType::Query => "QUERY",
            SqlStatementType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SqlStatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SqlStatementType {
    fn from(s: &str) -> Self {
        SqlStatementType::parse(s)
    }
}

impl From<String> for SqlStatementType {
    fn from(s: String) -> Self {
        SqlStatementType::parse(&s)
    }
}

/// A parsed SQL statement: the raw text, its classified kind, and the
/// objects it declares and affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlStatement {
    pub sql_text: String,
    pub statement_type: SqlStatementType,
    /// Objects declared by the statement, in declaration order.
    #[serde(default)]
    pub objects: Vec<SqlObject>,
    /// Objects affected by the statement.
    #[serde(default)]
    pub affected_objects: Vec<SqlObject>,
    #[serde(default)]
    pub dialect: Option<String>,
    /// Default schema in effect for the statement.
    #[serde(default)]
    pub schema: Option<String>,
}

impl SqlStatement {
    /// Creates a statement with no objects. The kind may be given as an
    /// enum value or any string; unrecognized strings classify as
    /// `Unknown`.
    pub fn new(sql_text: impl Into<String>, statement_type: impl Into<SqlStatementType>) -> Self {
        SqlStatement {
            sql_text: sql_text.into(),
            statement_type: statement_type.into(),
            objects: Vec::new(),
            affected_objects: Vec::new(),
            dialect: None,
            schema: None,
        }
    }

    /// The first declared object, or `None`. "Primary" is positional, not
    /// a semantic ranking.
    pub fn get_primary_object(&self) -> Option<&SqlObject> {
        self.objects.first()
    }

    /// Converts the statement to a JSON value snapshot.
    pub fn to_value(&self) -> Result<Value, SqlMetaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstructs a statement from a snapshot produced by
    /// [`Self::to_value`].
    pub fn from_value(value: Value) -> Result<Self, SqlMetaError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} statement affecting {} objects",
            self.statement_type,
            self.affected_objects.len()
        )
    }
}

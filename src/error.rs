//! Error types for sqlmeta
//!
//! This model deliberately raises very little: unrecognized type strings
//! degrade to `Unknown` variants and missing data degrades to empty
//! collections. The variants here cover the few places where a caller must
//! be told about misuse explicitly.

use thiserror::Error;

use crate::model::SqlObjectType;

/// Errors that can occur when working with the schema object model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlMetaError {
    #[error("cannot compare objects of different types: {left} vs {right}")]
    ComparisonTypeMismatch {
        left: SqlObjectType,
        right: SqlObjectType,
    },

    #[error("snapshot conversion failed: {message}")]
    SnapshotError { message: String },
}

impl From<serde_json::Error> for SqlMetaError {
    fn from(err: serde_json::Error) -> Self {
        SqlMetaError::SnapshotError {
            message: err.to_string(),
        }
    }
}

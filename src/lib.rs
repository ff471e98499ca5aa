//! sqlmeta: an in-memory, dialect-agnostic model of relational schema objects
//!
//! This library represents the outcome of parsing SQL into structured objects:
//! columns, constraints, statements, and the aggregate [`ParseResult`] that
//! collects parsed objects per kind, tracks dependencies between object names,
//! and detects dependency cycles. It is a representation and bookkeeping
//! layer, not a SQL engine — turning SQL text into these objects is the job
//! of an external producer.
//!
//! The intended usage is "freeze after build": a single owner populates a
//! [`ParseResult`] to completion through the `add_*` methods, then hands out
//! shared references for querying. The types are plain data with no interior
//! mutability, so reads are safe once mutation stops; mutating while another
//! thread reads requires external synchronization.

pub mod dialect;
pub mod error;
pub mod model;
pub mod result;

pub use error::SqlMetaError;
pub use model::{
    ConstraintType, FieldDiff, SchemaDefaults, SqlColumn, SqlConstraint, SqlObject,
    SqlObjectType, SqlStatement, SqlStatementType, SqlTrigger,
};
pub use result::ParseResult;

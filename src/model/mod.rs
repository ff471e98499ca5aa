//! Schema object model types

mod column;
mod constraint;
mod object;
mod statement;

pub use column::SqlColumn;
pub use constraint::{ConstraintType, SqlConstraint};
pub use object::{FieldDiff, SchemaDefaults, SqlObject, SqlObjectType, SqlTrigger};
pub use statement::{SqlStatement, SqlStatementType};

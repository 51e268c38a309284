//! MySQL DDL generation from a loaded schema document.

mod column;
mod constraint;
mod options;
mod reference;
mod table;
pub mod types;

pub use column::compile_column;
pub use constraint::{KeyKind, foreign_key_clause, key_clauses};
pub use options::table_options;
pub use reference::reference_clause;
pub use table::compile_table;

use thiserror::Error;

use crate::ast::SchemaDocument;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Unknown column `{column}` in {clause} of table `{table}`")]
    UnknownColumnKey {
        table: String,
        clause: &'static str,
        column: String,
    },
}

/// Wrap a literal in single quotes, doubling any quote inside it.
pub(crate) fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Turns a whole document into `CREATE TABLE` statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct DdlEmitter;

impl DdlEmitter {
    /// One statement per table, in document order. The first failing table
    /// aborts the whole document.
    pub fn emit(&self, document: &SchemaDocument) -> Result<Vec<String>, CompileError> {
        document.tables.iter().map(compile_table).collect()
    }
}

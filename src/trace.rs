//! Tracing hooks for DDL generation.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! Without it these macros expand to nothing.

/// Debug event for each compiled table.
///
/// ```ignore
/// trace_table!(&table.name, table.columns.len());
/// ```
macro_rules! trace_table {
    ($table:expr, $columns:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(table = %$table, columns = $columns, "json2ddl.table");
    };
}

/// Warning attached to a table.
///
/// ```ignore
/// trace_warn!(&table.name, "multiple AUTO_INCREMENT options");
/// ```
macro_rules! trace_warn {
    ($table:expr, $message:literal) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(table = %$table, $message);
    };
}

use super::CompileError;
use super::column::compile_column;
use super::constraint::{foreign_key_clause, key_clauses};
use super::options::table_options;
use crate::ast::TableSpec;

/// Render a full `CREATE TABLE` statement, terminated by `;`.
pub fn compile_table(table: &TableSpec) -> Result<String, CompileError> {
    let mut definitions: Vec<String> = table.columns.iter().map(compile_column).collect();
    definitions.extend(key_clauses(table)?);
    if let Some(fk) = foreign_key_clause(table)? {
        definitions.push(fk);
    }

    if table.options.auto_increment.len() > 1 {
        trace_warn!(&table.name, "multiple AUTO_INCREMENT options rendered");
    }
    let options = table_options(&table.options);

    let mut sql = String::from("CREATE TABLE ");
    if table.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&table.name);
    sql.push_str(" (");
    sql.push_str(&definitions.join(", "));
    sql.push(')');
    if !options.is_empty() {
        sql.push(' ');
        sql.push_str(&options.join(", "));
    }
    sql.push(';');

    trace_table!(&table.name, table.columns.len());
    Ok(sql)
}

//! Table-level key and foreign key clauses.

use super::CompileError;
use super::reference::reference_clause;
use crate::ast::{ForeignKeyColumns, KeySpec, TableSpec};

/// Table-level key clauses, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    PrimaryKey,
    Index,
    Key,
    Unique,
}

impl KeyKind {
    pub const ALL: [KeyKind; 4] = [Self::PrimaryKey, Self::Index, Self::Key, Self::Unique];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Index => "INDEX",
            Self::Key => "KEY",
            Self::Unique => "UNIQUE",
        }
    }

    fn spec(self, table: &TableSpec) -> Option<&KeySpec> {
        match self {
            Self::PrimaryKey => table.primary_key.as_ref(),
            Self::Index => table.index.as_ref(),
            Self::Key => table.key.as_ref(),
            Self::Unique => table.unique_key.as_ref(),
        }
    }
}

/// `KEYWORD [USING method](cols)` for each key the table declares.
pub fn key_clauses(table: &TableSpec) -> Result<Vec<String>, CompileError> {
    let mut clauses = Vec::new();

    for kind in KeyKind::ALL {
        let Some(key) = kind.spec(table) else {
            continue;
        };
        check_columns(table, kind.keyword(), key.columns.iter().map(String::as_str))?;

        let mut clause = kind.keyword().to_string();
        if let Some(method) = &key.using {
            clause.push_str(" USING ");
            clause.push_str(method);
        }
        clause.push_str(&format!("({})", key.columns.join(", ")));
        clauses.push(clause);
    }

    Ok(clauses)
}

/// `FOREIGN KEY (cols) REFERENCES ...`, if the table declares one.
pub fn foreign_key_clause(table: &TableSpec) -> Result<Option<String>, CompileError> {
    let Some(fk) = &table.foreign_key else {
        return Ok(None);
    };

    let local = fk.local.names();
    check_columns(table, "FOREIGN KEY", local.iter().copied())?;

    let local = match &fk.local {
        ForeignKeyColumns::Columns(columns) => columns.join(", "),
        ForeignKeyColumns::Key(key) => key.clone(),
    };

    let mut segments = vec![format!("FOREIGN KEY ({})", local)];
    segments.extend(reference_clause(&fk.reference));
    Ok(Some(segments.join(" ")))
}

fn check_columns<'a>(
    table: &TableSpec,
    clause: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), CompileError> {
    for name in names {
        if !table.columns.iter().any(|c| c.name == name) {
            return Err(CompileError::UnknownColumnKey {
                table: table.name.clone(),
                clause,
                column: name.to_string(),
            });
        }
    }
    Ok(())
}

use super::reference::reference_clause;
use super::{quote, types};
use crate::ast::{ColumnSpec, Nullability};

/// Render one column definition.
///
/// Segment order is fixed: name, type, nullability, default,
/// `AUTO_INCREMENT`, key, comment, column format, storage, reference.
pub fn compile_column(column: &ColumnSpec) -> String {
    let mut segments = vec![
        column.name.clone(),
        types::resolve(&column.data_type).into_string(),
    ];

    match column.nullability {
        Nullability::Null => segments.push("NULL".to_string()),
        Nullability::NotNull => segments.push("NOT NULL".to_string()),
        Nullability::Unspecified => {}
    }

    if let Some(default) = &column.default {
        segments.push(format!("DEFAULT {}", default));
    }

    if column.auto_increment {
        segments.push("AUTO_INCREMENT".to_string());
    }

    // PRIMARY KEY implies uniqueness; never emit both
    if column.primary_key {
        segments.push("PRIMARY KEY".to_string());
    } else if column.unique {
        segments.push("UNIQUE KEY".to_string());
    }

    if let Some(comment) = &column.comment {
        segments.push(format!("COMMENT {}", quote(comment)));
    }
    if let Some(format) = &column.column_format {
        segments.push(format!("COLUMN_FORMAT {}", format));
    }
    if let Some(storage) = &column.storage {
        segments.push(format!("STORAGE {}", storage));
    }

    if let Some(reference) = &column.reference {
        segments.extend(reference_clause(reference));
    }

    segments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TableSpec;
    use crate::loader::load;

    fn table(columns: &str) -> TableSpec {
        let input = format!(
            r#"{{ "tables": [{{ "name": "t", "columns": [{}] }}] }}"#,
            columns
        );
        load(&input).unwrap().tables.remove(0)
    }

    fn compile_first(column: &str) -> String {
        compile_column(&table(column).columns[0])
    }

    #[test]
    fn test_auto_increment_primary_key() {
        assert_eq!(
            compile_first(
                r#"{ "name": "id", "type": "int", "auto_increment": true, "primary key": true }"#
            ),
            "id INT AUTO_INCREMENT PRIMARY KEY"
        );
    }

    #[test]
    fn test_not_null_varchar() {
        assert_eq!(
            compile_first(r#"{ "name": "host", "type": "varchar", "length": 64, "not null": true }"#),
            "host VARCHAR(64) NOT NULL"
        );
    }

    #[test]
    fn test_primary_key_wins_over_unique() {
        let sql = compile_first(
            r#"{ "name": "id", "type": "int", "unique": true, "primary key": true }"#,
        );
        assert_eq!(sql, "id INT PRIMARY KEY");
        assert!(!sql.contains("UNIQUE"));

        assert_eq!(
            compile_first(r#"{ "name": "email", "type": "varchar", "unique": true }"#),
            "email VARCHAR(128) UNIQUE KEY"
        );
    }

    #[test]
    fn test_full_segment_order() {
        let sql = compile_first(
            r#"{ "name": "owner", "type": "int", "length": 11, "unsigned": true,
                 "storage": "DISK", "column_format": "FIXED", "comment": "owner's id",
                 "unique": true, "auto_increment": true, "default": 0, "null": true,
                 "reference": { "table": "users", "columns": ["id"],
                                "on update": "CASCADE", "on delete": "RESTRICT" } }"#,
        );
        assert_eq!(
            sql,
            "owner INT(11) UNSIGNED NULL DEFAULT 0 AUTO_INCREMENT UNIQUE KEY \
             COMMENT 'owner''s id' COLUMN_FORMAT FIXED STORAGE DISK \
             REFERENCES users(id) ON DELETE RESTRICT ON UPDATE CASCADE"
        );
    }

    #[test]
    fn test_default_rendered_verbatim() {
        assert_eq!(
            compile_first(
                r#"{ "name": "created", "type": "timestamp", "default": "CURRENT_TIMESTAMP" }"#
            ),
            "created TIMESTAMP DEFAULT CURRENT_TIMESTAMP"
        );
        assert_eq!(
            compile_first(r#"{ "name": "s", "type": "char", "length": 1, "default": "'a'" }"#),
            "s CHAR(1) DEFAULT 'a'"
        );
    }

    #[test]
    fn test_enum_column() {
        assert_eq!(
            compile_first(
                r#"{ "name": "kind", "type": "enum", "list": ["A", "AAAA", "CNAME"], "not null": true }"#
            ),
            "kind ENUM('A', 'AAAA', 'CNAME') NOT NULL"
        );
    }
}

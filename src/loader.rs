//! Schema loading: JSON text to a validated [`SchemaDocument`].
//!
//! The raw document is loosely typed (space-separated keys, aliases, flags
//! that may be missing or `null`). It is first read into `Raw*` mirrors with
//! serde, then converted table by table so that every error names the table
//! and column it came from.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::ast::{
    ColumnSpec, ForeignKeyColumns, ForeignKeySpec, InsertMethod, KeySpec, MatchMode, Nullability,
    ReferenceSpec, SchemaDocument, TableOptions, TableSpec, TypeDescriptor,
};
use crate::ddl::types::{BaseType, Modifier, TypeCategory};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema format error in {context}: {message}")]
    Format { context: String, message: String },
    #[error("Unsupported type `{name}` in {context}")]
    UnsupportedType { context: String, name: String },
}

fn format_error(context: &str, message: impl ToString) -> LoadError {
    LoadError::Format {
        context: context.to_string(),
        message: message.to_string(),
    }
}

fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

/// Blank strings count as absent, the same as a missing key.
fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse and validate a schema document.
pub fn load(source: &str) -> Result<SchemaDocument, LoadError> {
    let root: Value = serde_json::from_str(source)?;

    if !root.is_object() {
        return Err(format_error("document", "expected a JSON object"));
    }

    let tables = match root.get("tables") {
        Some(Value::Array(tables)) if !tables.is_empty() => tables,
        Some(Value::Array(_)) => return Err(format_error("document", "`tables` is empty")),
        Some(_) => return Err(format_error("document", "`tables` must be an array")),
        None => return Err(format_error("document", "missing `tables`")),
    };

    let tables = tables
        .iter()
        .enumerate()
        .map(|(i, table)| load_table(i, table))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SchemaDocument { tables })
}

fn load_table(index: usize, value: &Value) -> Result<TableSpec, LoadError> {
    let context = match value.get("name").and_then(Value::as_str) {
        Some(name) => format!("table `{}`", name),
        None => format!("table #{}", index),
    };

    let raw = RawTable::deserialize(value).map_err(|e| format_error(&context, e))?;

    if raw.columns.is_empty() {
        return Err(format_error(&context, "`columns` is empty"));
    }

    let columns = raw
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| load_column(&context, i, column))
        .collect::<Result<Vec<_>, _>>()?;

    // `"exists": false` has always meant "create only when missing"
    let if_not_exists = flag(raw.if_not_exists) || raw.exists == Some(false);

    let foreign_key = raw
        .foreign_key
        .map(|fk| load_foreign_key(&context, fk))
        .transpose()?;

    // Zero row limits are MySQL's defaults, so they are left out like blanks
    let options = TableOptions {
        engine: text(raw.engine),
        auto_increment: raw
            .auto_increment
            .map(RawAutoIncrement::into_values)
            .unwrap_or_default()
            .into_iter()
            .filter(|start| !start.trim().is_empty())
            .collect(),
        charset: text(raw.charset),
        comment: text(raw.comment),
        insert_method: raw.insert_method.as_deref().and_then(InsertMethod::from_str),
        max_rows: raw.max_rows.filter(|&n| n > 0),
        min_rows: raw.min_rows.filter(|&n| n > 0),
    };

    Ok(TableSpec {
        name: raw.name,
        if_not_exists,
        columns,
        primary_key: load_key(&context, "primary key", raw.primary_key)?,
        index: load_key(&context, "index", raw.index)?,
        key: load_key(&context, "key", raw.key)?,
        unique_key: load_key(&context, "unique", raw.unique)?,
        foreign_key,
        options,
    })
}

fn load_key(context: &str, clause: &str, raw: Option<RawKey>) -> Result<Option<KeySpec>, LoadError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.columns.is_empty() {
        return Err(format_error(context, format!("`{}` has no columns", clause)));
    }
    Ok(Some(KeySpec {
        columns: raw.columns,
        using: text(raw.using),
    }))
}

fn load_column(table: &str, index: usize, value: &Value) -> Result<ColumnSpec, LoadError> {
    let context = match value.get("name").and_then(Value::as_str) {
        Some(name) => format!("{}, column `{}`", table, name),
        None => format!("{}, column #{}", table, index),
    };

    let raw = RawColumn::deserialize(value)
        .map_err(|e| format_error(&context, e))?
        .normalize();

    let base = BaseType::from_str(&raw.type_name).ok_or_else(|| LoadError::UnsupportedType {
        context: context.clone(),
        name: raw.type_name.clone(),
    })?;
    let data_type = load_type(&context, base, &raw)?;

    let nullability = match (flag(raw.null), flag(raw.not_null)) {
        (true, true) => {
            return Err(format_error(&context, "`null` and `not null` are both set"));
        }
        (true, false) => Nullability::Null,
        (false, true) => Nullability::NotNull,
        (false, false) => Nullability::Unspecified,
    };

    let default = match &raw.default {
        Some(value) => default_literal(value).map_err(|m| format_error(&context, m))?,
        None => None,
    };

    let reference = raw
        .reference
        .map(|r| load_reference(&context, r))
        .transpose()?;

    Ok(ColumnSpec {
        name: raw.name,
        data_type,
        nullability,
        default,
        auto_increment: flag(raw.auto_increment) || flag(raw.auto_increment_spaced),
        unique: flag(raw.unique),
        primary_key: flag(raw.primary_key) || flag(raw.primary),
        comment: raw.comment,
        column_format: raw.column_format,
        storage: raw.storage,
        reference,
    })
}

fn load_type(context: &str, base: BaseType, raw: &RawColumn) -> Result<TypeDescriptor, LoadError> {
    let category = base.category();
    // A zero display width is no width; CHAR(0)/BINARY(0) are real types
    let length = raw
        .length
        .filter(|&n| n > 0 || matches!(category, TypeCategory::Character | TypeCategory::Binary));
    let present = [
        (Modifier::Length, length.is_some()),
        (Modifier::Unsigned, flag(raw.unsigned)),
        (Modifier::Zerofill, flag(raw.zerofill)),
        (Modifier::Charset, raw.charset.is_some()),
        (Modifier::Collate, raw.collate.is_some()),
        (Modifier::Values, raw.list.is_some()),
    ];

    if let Some((modifier, _)) = present
        .iter()
        .find(|(modifier, set)| *set && !category.allows(*modifier))
    {
        return Err(format_error(
            context,
            format!("`{}` is not allowed on {}", modifier.key(), base.name()),
        ));
    }

    let enum_values = raw.list.clone().unwrap_or_default();
    if category == TypeCategory::EnumSet && enum_values.is_empty() {
        return Err(format_error(
            context,
            format!("{} needs a non-empty `list`", base.name()),
        ));
    }

    Ok(TypeDescriptor {
        base,
        length,
        unsigned: flag(raw.unsigned),
        zerofill: flag(raw.zerofill),
        charset: raw.charset.clone(),
        collate: raw.collate.clone(),
        enum_values,
    })
}

/// `null` or a blank string means no default at all.
fn default_literal(value: &Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(true) => Ok(Some("TRUE".to_string())),
        Value::Bool(false) => Ok(Some("FALSE".to_string())),
        Value::Array(_) | Value::Object(_) => Err("`default` must be a scalar"),
    }
}

fn load_reference(context: &str, raw: RawReference) -> Result<ReferenceSpec, LoadError> {
    if raw.columns.is_empty() {
        return Err(format_error(context, "reference has no columns"));
    }
    Ok(ReferenceSpec {
        match_mode: raw.actions.match_mode().map_err(|m| format_error(context, m))?,
        table: raw.table,
        columns: raw.columns,
        on_delete: text(raw.actions.on_delete),
        on_update: text(raw.actions.on_update),
    })
}

fn load_foreign_key(table: &str, raw: RawForeignKey) -> Result<ForeignKeySpec, LoadError> {
    let context = format!("{}, foreign key", table);

    match raw.reference {
        Some(reference) => {
            let local = match (raw.columns, raw.key) {
                (Some(columns), None) if !columns.is_empty() => ForeignKeyColumns::Columns(columns),
                (Some(_), None) => return Err(format_error(&context, "`columns` is empty")),
                (None, Some(key)) => ForeignKeyColumns::Key(key),
                (Some(_), Some(_)) => {
                    return Err(format_error(&context, "give `columns` or `key`, not both"));
                }
                (None, None) => return Err(format_error(&context, "missing `columns` or `key`")),
            };
            Ok(ForeignKeySpec {
                local,
                reference: load_reference(&context, reference)?,
            })
        }
        // Flat form: `key` is the local column, `table`/`columns` the target.
        None => {
            let table = raw
                .table
                .ok_or_else(|| format_error(&context, "missing `reference`"))?;
            let key = raw
                .key
                .ok_or_else(|| format_error(&context, "missing `key`"))?;
            let reference = RawReference {
                table,
                columns: raw.columns.unwrap_or_default(),
                actions: raw.actions,
            };
            Ok(ForeignKeySpec {
                local: ForeignKeyColumns::Key(key),
                reference: load_reference(&context, reference)?,
            })
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename = "table")]
struct RawTable {
    name: String,
    exists: Option<bool>,
    #[serde(rename = "if not exists")]
    if_not_exists: Option<bool>,
    columns: Vec<Value>,
    #[serde(rename = "primary key")]
    primary_key: Option<RawKey>,
    index: Option<RawKey>,
    key: Option<RawKey>,
    unique: Option<RawKey>,
    #[serde(rename = "foreign key")]
    foreign_key: Option<RawForeignKey>,
    engine: Option<String>,
    auto_increment: Option<RawAutoIncrement>,
    charset: Option<String>,
    comment: Option<String>,
    insert_method: Option<String>,
    max_rows: Option<u64>,
    min_rows: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "column")]
struct RawColumn {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    length: Option<u32>,
    unsigned: Option<bool>,
    zerofill: Option<bool>,
    charset: Option<String>,
    collate: Option<String>,
    #[serde(alias = "values")]
    list: Option<Vec<String>>,
    null: Option<bool>,
    #[serde(rename = "not null")]
    not_null: Option<bool>,
    default: Option<Value>,
    auto_increment: Option<bool>,
    #[serde(rename = "auto increment")]
    auto_increment_spaced: Option<bool>,
    unique: Option<bool>,
    #[serde(rename = "primary key")]
    primary_key: Option<bool>,
    primary: Option<bool>,
    comment: Option<String>,
    column_format: Option<String>,
    storage: Option<String>,
    reference: Option<RawReference>,
}

impl RawColumn {
    fn normalize(self) -> Self {
        Self {
            charset: text(self.charset),
            collate: text(self.collate),
            comment: text(self.comment),
            column_format: text(self.column_format),
            storage: text(self.storage),
            ..self
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename = "key")]
struct RawKey {
    columns: Vec<String>,
    using: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "reference")]
struct RawReference {
    table: String,
    columns: Vec<String>,
    #[serde(flatten)]
    actions: RawActions,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "foreign key")]
struct RawForeignKey {
    columns: Option<Vec<String>>,
    key: Option<String>,
    reference: Option<RawReference>,
    table: Option<String>,
    #[serde(flatten)]
    actions: RawActions,
}

#[derive(Debug, Deserialize)]
struct RawActions {
    #[serde(rename = "match")]
    match_mode: Option<Value>,
    #[serde(rename = "match full")]
    match_full: Option<bool>,
    #[serde(rename = "match partial")]
    match_partial: Option<bool>,
    #[serde(rename = "match simple")]
    match_simple: Option<bool>,
    #[serde(rename = "on delete")]
    on_delete: Option<String>,
    #[serde(rename = "on update")]
    on_update: Option<String>,
}

impl RawActions {
    /// First present wins: `match`, then the full/partial/simple flags.
    ///
    /// `match` takes a string or a number, kept as a literal; `null`,
    /// `false` and blank strings fall through to the flags.
    fn match_mode(&self) -> Result<Option<MatchMode>, &'static str> {
        let literal = match &self.match_mode {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(MatchMode::parse(s)),
            Some(Value::Number(n)) => Some(MatchMode::Custom(n.to_string())),
            None | Some(Value::Null | Value::Bool(false) | Value::String(_)) => None,
            Some(Value::Bool(true) | Value::Array(_) | Value::Object(_)) => {
                return Err("`match` must be a string or a number");
            }
        };

        Ok(literal.or_else(|| {
            if flag(self.match_full) {
                Some(MatchMode::Full)
            } else if flag(self.match_partial) {
                Some(MatchMode::Partial)
            } else if flag(self.match_simple) {
                Some(MatchMode::Simple)
            } else {
                None
            }
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAutoIncrement {
    One(RawScalar),
    Many(Vec<RawScalar>),
}

impl RawAutoIncrement {
    fn into_values(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.into_string()],
            Self::Many(values) => values.into_iter().map(RawScalar::into_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

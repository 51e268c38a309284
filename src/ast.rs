use crate::ddl::types::BaseType;

/// A loaded schema: tables in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub tables: Vec<TableSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub name: String,
    pub if_not_exists: bool,
    /// Never empty once loaded.
    pub columns: Vec<ColumnSpec>,
    pub primary_key: Option<KeySpec>,
    pub index: Option<KeySpec>,
    pub key: Option<KeySpec>,
    pub unique_key: Option<KeySpec>,
    pub foreign_key: Option<ForeignKeySpec>,
    pub options: TableOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOptions {
    pub engine: Option<String>,
    /// One `AUTO_INCREMENT` option is rendered per entry.
    pub auto_increment: Vec<String>,
    pub charset: Option<String>,
    pub comment: Option<String>,
    pub insert_method: Option<InsertMethod>,
    pub max_rows: Option<u64>,
    pub min_rows: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMethod {
    No,
    First,
    Last,
}

impl InsertMethod {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NO" => Some(Self::No),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::No => "NO",
            Self::First => "FIRST",
            Self::Last => "LAST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: TypeDescriptor,
    pub nullability: Nullability,
    /// Literal text, emitted as-is after `DEFAULT`.
    pub default: Option<String>,
    pub auto_increment: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
    pub column_format: Option<String>,
    pub storage: Option<String>,
    pub reference: Option<ReferenceSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Nullability {
    #[default]
    Unspecified,
    Null,
    NotNull,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub base: BaseType,
    pub length: Option<u32>,
    pub unsigned: bool,
    pub zerofill: bool,
    pub charset: Option<String>,
    pub collate: Option<String>,
    pub enum_values: Vec<String>,
}

impl TypeDescriptor {
    /// A descriptor with no modifiers set.
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            length: None,
            unsigned: false,
            zerofill: false,
            charset: None,
            collate: None,
            enum_values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeySpec {
    pub columns: Vec<String>,
    pub using: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeySpec {
    pub local: ForeignKeyColumns,
    pub reference: ReferenceSpec,
}

/// Local side of a table-level foreign key.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignKeyColumns {
    Columns(Vec<String>),
    Key(String),
}

impl ForeignKeyColumns {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Columns(columns) => columns.iter().map(String::as_str).collect(),
            Self::Key(key) => vec![key.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSpec {
    pub table: String,
    pub columns: Vec<String>,
    pub match_mode: Option<MatchMode>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchMode {
    Full,
    Partial,
    Simple,
    Custom(String),
}

impl MatchMode {
    /// Known modes are recognised regardless of case; anything else is kept verbatim.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "full" => Self::Full,
            "partial" => Self::Partial,
            "simple" => Self::Simple,
            _ => Self::Custom(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
            Self::Custom(s) => s,
        }
    }
}

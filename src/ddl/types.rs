//! Column type resolution.

use std::fmt;

use super::quote;
use crate::ast::TypeDescriptor;

/// Length rendered for CHAR/BINARY families when the schema omits one.
pub const DEFAULT_LENGTH: u32 = 128;

/// Families of base types sharing the same legal modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    DateTime,
    Character,
    Binary,
    Blob,
    Text,
    EnumSet,
}

/// Optional parts of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Length,
    Unsigned,
    Zerofill,
    Charset,
    Collate,
    Values,
}

impl Modifier {
    pub fn key(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Unsigned => "unsigned",
            Self::Zerofill => "zerofill",
            Self::Charset => "charset",
            Self::Collate => "collate",
            Self::Values => "list",
        }
    }
}

impl TypeCategory {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }

    /// Whether `modifier` may appear on a type of this category.
    pub fn allows(self, modifier: Modifier) -> bool {
        use TypeCategory::*;

        match modifier {
            Modifier::Length => matches!(self, Integer | Float | Decimal | Character | Binary),
            Modifier::Unsigned | Modifier::Zerofill => self.is_numeric(),
            Modifier::Charset => matches!(self, Character | Binary | Text | EnumSet),
            Modifier::Collate => matches!(self, Character | Binary | EnumSet),
            Modifier::Values => self == EnumSet,
        }
    }
}

/// Every base type the compiler knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    // Integer
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    Integer,
    BigInt,
    // Floating point
    Real,
    Double,
    Float,
    // Fixed point
    Decimal,
    Numeric,
    // Date/time
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    // Character
    Char,
    VarChar,
    // Binary
    Binary,
    VarBinary,
    // Blob
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    // Text
    TinyText,
    Text,
    MediumText,
    LongText,
    // Enum/Set
    Enum,
    Set,
}

impl BaseType {
    pub const ALL: [BaseType; 30] = [
        Self::TinyInt,
        Self::SmallInt,
        Self::MediumInt,
        Self::Int,
        Self::Integer,
        Self::BigInt,
        Self::Real,
        Self::Double,
        Self::Float,
        Self::Decimal,
        Self::Numeric,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
        Self::Time,
        Self::Year,
        Self::Char,
        Self::VarChar,
        Self::Binary,
        Self::VarBinary,
        Self::TinyBlob,
        Self::Blob,
        Self::MediumBlob,
        Self::LongBlob,
        Self::TinyText,
        Self::Text,
        Self::MediumText,
        Self::LongText,
        Self::Enum,
        Self::Set,
    ];

    /// Parse a base type name, ignoring case.
    pub fn from_str(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|t| t.name() == upper)
    }

    /// Upper-case SQL spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Time => "TIME",
            Self::Year => "YEAR",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::TinyBlob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::LongBlob => "LONGBLOB",
            Self::TinyText => "TINYTEXT",
            Self::Text => "TEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::LongText => "LONGTEXT",
            Self::Enum => "ENUM",
            Self::Set => "SET",
        }
    }

    pub fn category(self) -> TypeCategory {
        match self {
            Self::TinyInt
            | Self::SmallInt
            | Self::MediumInt
            | Self::Int
            | Self::Integer
            | Self::BigInt => TypeCategory::Integer,
            Self::Real | Self::Double | Self::Float => TypeCategory::Float,
            Self::Decimal | Self::Numeric => TypeCategory::Decimal,
            Self::Date | Self::DateTime | Self::Timestamp | Self::Time | Self::Year => {
                TypeCategory::DateTime
            }
            Self::Char | Self::VarChar => TypeCategory::Character,
            Self::Binary | Self::VarBinary => TypeCategory::Binary,
            Self::TinyBlob | Self::Blob | Self::MediumBlob | Self::LongBlob => TypeCategory::Blob,
            Self::TinyText | Self::Text | Self::MediumText | Self::LongText => TypeCategory::Text,
            Self::Enum | Self::Set => TypeCategory::EnumSet,
        }
    }
}

/// Rendered column type, e.g. `INT(11) UNSIGNED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken(String);

impl TypeToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a type descriptor. Only the modifiers relevant to the base type's
/// category are looked at.
pub fn resolve(desc: &TypeDescriptor) -> TypeToken {
    let mut token = desc.base.name().to_string();

    match desc.base.category() {
        TypeCategory::Integer | TypeCategory::Float | TypeCategory::Decimal => {
            if let Some(length) = desc.length {
                token.push_str(&format!("({})", length));
            }
            if desc.unsigned {
                token.push_str(" UNSIGNED");
            }
            if desc.zerofill {
                token.push_str(" ZEROFILL");
            }
        }
        TypeCategory::Character | TypeCategory::Binary => {
            token.push_str(&format!("({})", desc.length.unwrap_or(DEFAULT_LENGTH)));
            push_charset(&mut token, desc);
            push_collate(&mut token, desc);
        }
        TypeCategory::DateTime | TypeCategory::Blob => {}
        TypeCategory::Text => push_charset(&mut token, desc),
        TypeCategory::EnumSet => {
            let values: Vec<String> = desc.enum_values.iter().map(|v| quote(v)).collect();
            token.push_str(&format!("({})", values.join(", ")));
            push_charset(&mut token, desc);
            push_collate(&mut token, desc);
        }
    }

    TypeToken(token)
}

fn push_charset(token: &mut String, desc: &TypeDescriptor) {
    if let Some(charset) = &desc.charset {
        token.push_str(" CHARACTER SET ");
        token.push_str(charset);
    }
}

fn push_collate(token: &mut String, desc: &TypeDescriptor) {
    if let Some(collate) = &desc.collate {
        token.push_str(" COLLATE ");
        token.push_str(collate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(base: BaseType) -> TypeDescriptor {
        TypeDescriptor::new(base)
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!(BaseType::from_str("int"), Some(BaseType::Int));
        assert_eq!(BaseType::from_str("VarChar"), Some(BaseType::VarChar));
        assert_eq!(BaseType::from_str("longblob"), Some(BaseType::LongBlob));
        assert_eq!(BaseType::from_str("jsonb"), None);
        assert_eq!(BaseType::from_str(""), None);
    }

    #[test]
    fn test_every_name_round_trips() {
        for base in BaseType::ALL {
            assert_eq!(BaseType::from_str(base.name()), Some(base));
        }
    }

    #[test]
    fn test_numeric_segments() {
        assert_eq!(resolve(&desc(BaseType::Int)).as_str(), "INT");

        let mut d = desc(BaseType::BigInt);
        d.length = Some(20);
        assert_eq!(resolve(&d).as_str(), "BIGINT(20)");

        d.unsigned = true;
        assert_eq!(resolve(&d).as_str(), "BIGINT(20) UNSIGNED");

        d.zerofill = true;
        assert_eq!(resolve(&d).as_str(), "BIGINT(20) UNSIGNED ZEROFILL");

        d.length = None;
        d.unsigned = false;
        assert_eq!(resolve(&d).as_str(), "BIGINT ZEROFILL");
    }

    #[test]
    fn test_float_and_decimal_are_numeric() {
        let mut d = desc(BaseType::Double);
        d.unsigned = true;
        assert_eq!(resolve(&d).as_str(), "DOUBLE UNSIGNED");

        let mut d = desc(BaseType::Decimal);
        d.length = Some(10);
        assert_eq!(resolve(&d).as_str(), "DECIMAL(10)");
    }

    #[test]
    fn test_character_default_length() {
        assert_eq!(resolve(&desc(BaseType::VarChar)).as_str(), "VARCHAR(128)");
        assert_eq!(resolve(&desc(BaseType::VarBinary)).as_str(), "VARBINARY(128)");
    }

    #[test]
    fn test_character_charset_then_collate() {
        let mut d = desc(BaseType::Char);
        d.length = Some(2);
        d.collate = Some("utf8mb4_bin".into());
        d.charset = Some("utf8mb4".into());
        assert_eq!(
            resolve(&d).as_str(),
            "CHAR(2) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin"
        );
    }

    #[test]
    fn test_datetime_and_blob_are_bare() {
        assert_eq!(resolve(&desc(BaseType::Timestamp)).as_str(), "TIMESTAMP");
        assert_eq!(resolve(&desc(BaseType::MediumBlob)).as_str(), "MEDIUMBLOB");
    }

    #[test]
    fn test_text_charset_only() {
        let mut d = desc(BaseType::LongText);
        d.charset = Some("utf8".into());
        assert_eq!(resolve(&d).as_str(), "LONGTEXT CHARACTER SET utf8");
    }

    #[test]
    fn test_enum_values_keep_order() {
        let mut d = desc(BaseType::Enum);
        d.enum_values = vec!["a".into(), "b".into()];
        assert_eq!(resolve(&d).as_str(), "ENUM('a', 'b')");

        let mut d = desc(BaseType::Set);
        d.enum_values = vec!["z".into(), "it's".into()];
        d.charset = Some("latin1".into());
        assert_eq!(
            resolve(&d).as_str(),
            "SET('z', 'it''s') CHARACTER SET latin1"
        );
    }

    #[test]
    fn test_modifier_rules() {
        assert!(TypeCategory::Integer.allows(Modifier::Zerofill));
        assert!(!TypeCategory::Character.allows(Modifier::Zerofill));
        assert!(TypeCategory::Text.allows(Modifier::Charset));
        assert!(!TypeCategory::Text.allows(Modifier::Collate));
        assert!(!TypeCategory::DateTime.allows(Modifier::Length));
        assert!(TypeCategory::EnumSet.allows(Modifier::Values));
        assert!(!TypeCategory::Blob.allows(Modifier::Values));
    }
}

//! Column data types as they appear in reflected table definitions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Element type of a `VECTOR` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VectorElementType {
    /// 16-bit float.
    F16,
    /// 32-bit float (server default).
    #[default]
    F32,
    /// 64-bit float.
    F64,
    /// 8-bit integer.
    I8,
    /// 16-bit integer.
    I16,
    /// 32-bit integer.
    I32,
    /// 64-bit integer.
    I64,
}

impl VectorElementType {
    /// Parses an element type name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "F16" | "FLOAT16" => Some(Self::F16),
            "F32" | "FLOAT32" => Some(Self::F32),
            "F64" | "FLOAT64" => Some(Self::F64),
            "I8" | "INT8" => Some(Self::I8),
            "I16" | "INT16" => Some(Self::I16),
            "I32" | "INT32" => Some(Self::I32),
            "I64" | "INT64" => Some(Self::I64),
            _ => None,
        }
    }

    /// Width of one element in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::I8 => 8,
            Self::F16 | Self::I16 => 16,
            Self::F32 | Self::I32 => 32,
            Self::F64 | Self::I64 => 64,
        }
    }

    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::F16 => "F16",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::I8 => "I8",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
        }
    }
}

impl fmt::Display for VectorElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL data types understood by the reflection layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    // Integer types
    /// 1-byte integer.
    Tinyint,
    /// 2-byte integer.
    Smallint,
    /// 3-byte integer.
    Mediumint,
    /// 4-byte integer.
    Integer,
    /// 8-byte integer.
    Bigint,
    /// Bit field.
    Bit(Option<u32>),
    /// Boolean (stored as `TINYINT(1)`).
    Boolean,

    // Floating point and fixed point
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Fixed point decimal.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after the decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Up to 255 bytes of text.
    Tinytext,
    /// Text.
    Text,
    /// Up to 16 MiB of text.
    Mediumtext,
    /// Up to 4 GiB of text.
    Longtext,
    /// Enumeration of allowed values.
    Enum(Vec<String>),
    /// Set of allowed values.
    Set(Vec<String>),

    // Binary types
    /// Fixed-length binary.
    Binary(Option<u32>),
    /// Variable-length binary.
    Varbinary(Option<u32>),
    /// Up to 255 bytes of binary data.
    Tinyblob,
    /// Binary large object.
    Blob,
    /// Up to 16 MiB of binary data.
    Mediumblob,
    /// Up to 4 GiB of binary data.
    Longblob,

    // Date/time types
    /// Date.
    Date,
    /// Time with optional fractional seconds precision.
    Time(Option<u8>),
    /// Date and time with optional fractional seconds precision.
    Datetime(Option<u8>),
    /// Timestamp with optional fractional seconds precision.
    Timestamp(Option<u8>),
    /// Year.
    Year,

    // SingleStore extensions
    /// JSON document.
    Json,
    /// Geospatial shape.
    Geography,
    /// Geospatial point.
    GeographyPoint,
    /// Fixed-width numeric vector.
    Vector {
        /// Number of elements.
        dimensions: u32,
        /// Element type.
        element: VectorElementType,
    },

    /// A type name the reflection layer does not recognize.
    Unknown(String),
}

impl DataType {
    /// Resolves a reflected type name and its positional arguments.
    ///
    /// Integer display widths (`int(11)`) are discarded. Unrecognized
    /// names resolve to [`DataType::Unknown`].
    #[must_use]
    pub fn from_reflected(type_name: &str, args: &[String]) -> Self {
        let first = || args.first().and_then(|a| a.trim().parse::<u32>().ok());
        let fsp = || args.first().and_then(|a| a.trim().parse::<u8>().ok());
        match type_name.to_ascii_lowercase().as_str() {
            "tinyint" => Self::Tinyint,
            "smallint" => Self::Smallint,
            "mediumint" => Self::Mediumint,
            "int" | "integer" => Self::Integer,
            "bigint" => Self::Bigint,
            "bit" => Self::Bit(first()),
            "bool" | "boolean" => Self::Boolean,
            "float" => Self::Float,
            "double" | "real" => Self::Double,
            "decimal" | "numeric" | "dec" | "fixed" => Self::Decimal {
                precision: args.first().and_then(|a| a.trim().parse().ok()),
                scale: args.get(1).and_then(|a| a.trim().parse().ok()),
            },
            "char" => Self::Char(first()),
            "varchar" => Self::Varchar(first()),
            "tinytext" => Self::Tinytext,
            "text" => Self::Text,
            "mediumtext" => Self::Mediumtext,
            "longtext" => Self::Longtext,
            "enum" => Self::Enum(args.to_vec()),
            "set" => Self::Set(args.to_vec()),
            "binary" => Self::Binary(first()),
            "varbinary" => Self::Varbinary(first()),
            "tinyblob" => Self::Tinyblob,
            "blob" => Self::Blob,
            "mediumblob" => Self::Mediumblob,
            "longblob" => Self::Longblob,
            "date" => Self::Date,
            "time" => Self::Time(fsp()),
            "datetime" => Self::Datetime(fsp()),
            "timestamp" => Self::Timestamp(fsp()),
            "year" => Self::Year,
            "json" => Self::Json,
            "geography" => Self::Geography,
            "geographypoint" => Self::GeographyPoint,
            "vector" => Self::Vector {
                dimensions: first().unwrap_or(1),
                element: args
                    .get(1)
                    .and_then(|e| VectorElementType::parse(e))
                    .unwrap_or_default(),
            },
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns `false` for [`DataType::Unknown`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let sized = |name: &str, len: &Option<u32>| match len {
            Some(n) => format!("{name}({n})"),
            None => name.to_string(),
        };
        let fractional = |name: &str, fsp: &Option<u8>| match fsp {
            Some(p) => format!("{name}({p})"),
            None => name.to_string(),
        };
        let values = |name: &str, items: &[String]| {
            let quoted: Vec<String> = items
                .iter()
                .map(|v| format!("'{}'", v.replace('\'', "''")))
                .collect();
            format!("{name}({})", quoted.join(","))
        };
        match self {
            Self::Tinyint => String::from("TINYINT"),
            Self::Smallint => String::from("SMALLINT"),
            Self::Mediumint => String::from("MEDIUMINT"),
            Self::Integer => String::from("INT"),
            Self::Bigint => String::from("BIGINT"),
            Self::Bit(len) => sized("BIT", len),
            Self::Boolean => String::from("BOOL"),
            Self::Float => String::from("FLOAT"),
            Self::Double => String::from("DOUBLE"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => String::from("DECIMAL"),
            },
            Self::Char(len) => sized("CHAR", len),
            Self::Varchar(len) => sized("VARCHAR", len),
            Self::Tinytext => String::from("TINYTEXT"),
            Self::Text => String::from("TEXT"),
            Self::Mediumtext => String::from("MEDIUMTEXT"),
            Self::Longtext => String::from("LONGTEXT"),
            Self::Enum(items) => values("ENUM", items),
            Self::Set(items) => values("SET", items),
            Self::Binary(len) => sized("BINARY", len),
            Self::Varbinary(len) => sized("VARBINARY", len),
            Self::Tinyblob => String::from("TINYBLOB"),
            Self::Blob => String::from("BLOB"),
            Self::Mediumblob => String::from("MEDIUMBLOB"),
            Self::Longblob => String::from("LONGBLOB"),
            Self::Date => String::from("DATE"),
            Self::Time(fsp) => fractional("TIME", fsp),
            Self::Datetime(fsp) => fractional("DATETIME", fsp),
            Self::Timestamp(fsp) => fractional("TIMESTAMP", fsp),
            Self::Year => String::from("YEAR"),
            Self::Json => String::from("JSON"),
            Self::Geography => String::from("GEOGRAPHY"),
            Self::GeographyPoint => String::from("GEOGRAPHYPOINT"),
            Self::Vector {
                dimensions,
                element,
            } => format!("VECTOR({dimensions}, {element})"),
            Self::Unknown(name) => name.to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

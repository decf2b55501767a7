//! SQL to document-store type mapping.

use crate::schema::FieldType;

/// Map a SQL type token to a document field type.
///
/// Any parenthesized length or precision suffix is ignored. Unknown types
/// fall back to `String`.
pub fn map_type(sql_type: &str) -> FieldType {
    let upper = sql_type.to_uppercase();
    let base = upper.split('(').next().unwrap_or(&upper).trim();

    match base {
        // Integer types
        "INT" | "INTEGER" | "BIGINT" | "SMALLINT" => FieldType::Number,

        // Exact numerics
        "DECIMAL" | "NUMERIC" => FieldType::Decimal,

        // Floating point
        "FLOAT" | "DOUBLE" => FieldType::Number,

        // String types
        "VARCHAR" | "CHAR" | "TEXT" => FieldType::String,

        // Date/time
        "DATE" | "DATETIME" | "TIMESTAMP" => FieldType::Date,

        // Boolean
        "BOOLEAN" | "BOOL" => FieldType::Boolean,

        _ => FieldType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types() {
        assert_eq!(map_type("INT"), FieldType::Number);
        assert_eq!(map_type("bigint"), FieldType::Number);
        assert_eq!(map_type("DOUBLE"), FieldType::Number);
        assert_eq!(map_type("NUMERIC"), FieldType::Decimal);
    }

    #[test]
    fn test_precision_suffix_ignored() {
        assert_eq!(map_type("VARCHAR(100)"), map_type("VARCHAR"));
        assert_eq!(map_type("DECIMAL(10,2)"), FieldType::Decimal);
        assert_eq!(map_type("char(3)"), FieldType::String);
        assert_eq!(map_type("TIMESTAMP(6)"), FieldType::Date);
    }

    #[test]
    fn test_unknown_defaults_to_string() {
        assert_eq!(map_type("UUID"), FieldType::String);
        assert_eq!(map_type("JSONB"), FieldType::String);
        assert_eq!(map_type(""), FieldType::String);
    }

    #[test]
    fn test_boolean_and_dates() {
        assert_eq!(map_type("bool"), FieldType::Boolean);
        assert_eq!(map_type("DATETIME"), FieldType::Date);
        assert_eq!(map_type("date"), FieldType::Date);
    }
}

//! Relational model rebuilt from a SQL script.

use indexmap::IndexMap;
use serde::Serialize;

/// Target-store type tag for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Number,
    Decimal,
    String,
    Date,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Date => "Date",
            Self::Boolean => "Boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub typ: FieldType,
    pub required: bool,
    pub primary_key: bool,
    pub foreign_key: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyRef {
    pub field: String,
    /// Lowercased; may name a table that was never declared.
    pub referenced_table: String,
    pub referenced_field: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: String,
    pub fields: IndexMap<String, Field>,
    pub primary_keys: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyRef>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A table that mostly links other tables: at least two foreign keys,
    /// and at least as many foreign keys as half its fields.
    pub fn is_junction(&self) -> bool {
        let fk_count = self.foreign_keys.len();
        fk_count >= 2 && fk_count * 2 >= self.fields.len()
    }
}

/// Table registry in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub tables: IndexMap<String, Table>,
}

impl Schema {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Register a table. Redefinitions replace the earlier table but keep
    /// its position.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }
}

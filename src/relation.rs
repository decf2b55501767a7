//! Relationship analysis over foreign keys.

use crate::schema::{Schema, Table};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Multiplicity of a relationship, seen from the table holding the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:N")]
    OneToMany,
    #[serde(rename = "N:1")]
    ManyToOne,
    #[serde(rename = "N:M")]
    ManyToMany,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:N",
            Self::ManyToOne => "N:1",
            Self::ManyToMany => "N:M",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown cardinality: {0}")]
pub struct UnknownCardinality(pub String);

impl FromStr for Cardinality {
    type Err = UnknownCardinality;

    /// Accepts both the colon form (`N:1`) and the word form
    /// (`many-to-one`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1:1" | "one-to-one" => Ok(Self::OneToOne),
            "1:n" | "one-to-many" => Ok(Self::OneToMany),
            "n:1" | "many-to-one" => Ok(Self::ManyToOne),
            "n:m" | "n:n" | "many-to-many" => Ok(Self::ManyToMany),
            _ => Err(UnknownCardinality(s.to_string())),
        }
    }
}

/// A directed link from the table holding a foreign key to the table it
/// references. The target is held by name and may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub from_field: String,
    pub to_field: String,
    pub cardinality: Cardinality,
    /// Allows embedding of `N:1`/`1:N` links. Never set by the analyzer.
    pub embed_when_small: bool,
}

/// Derive one relationship per foreign key, in table then key order.
pub fn analyze(schema: &Schema) -> Vec<Relationship> {
    schema
        .tables
        .values()
        .flat_map(|table| {
            table.foreign_keys.iter().map(move |fk| Relationship {
                from: table.name.clone(),
                to: fk.referenced_table.clone(),
                from_field: fk.field.clone(),
                to_field: fk.referenced_field.clone(),
                cardinality: classify(table, &fk.referenced_table),
                embed_when_small: false,
            })
        })
        .collect()
}

/// Junction tables link N:M. Otherwise a foreign key that is also a primary
/// key makes the link to that target 1:1.
fn classify(table: &Table, target: &str) -> Cardinality {
    if table.is_junction() {
        return Cardinality::ManyToMany;
    }

    let keyed_one_to_one = table
        .foreign_keys
        .iter()
        .filter(|fk| fk.referenced_table == target)
        .any(|fk| table.fields.get(&fk.field).is_some_and(|f| f.primary_key));

    if keyed_one_to_one {
        Cardinality::OneToOne
    } else {
        Cardinality::ManyToOne
    }
}

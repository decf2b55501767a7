//! Embedding vs referencing decision per relationship.

use crate::relation::{Cardinality, Relationship};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Inline the related document's fields.
    Embedding,
    /// Keep the related documents in their own collection.
    Referencing,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::Referencing => "referencing",
        }
    }

    /// French label used in the analysis narrative.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Embedding => "imbrication",
            Self::Referencing => "référencement",
        }
    }
}

/// Choose how a relationship is represented in the document store.
///
/// Many-to-many links are never embedded, whatever the override says.
pub fn choose(rel: &Relationship) -> Strategy {
    match rel.cardinality {
        Cardinality::OneToOne => Strategy::Embedding,
        Cardinality::ManyToOne | Cardinality::OneToMany if rel.embed_when_small => {
            Strategy::Embedding
        }
        Cardinality::ManyToOne | Cardinality::OneToMany => Strategy::Referencing,
        Cardinality::ManyToMany => Strategy::Referencing,
    }
}

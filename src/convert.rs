//! Document-store schema assembly.

use crate::relation::{self, Cardinality, Relationship};
use crate::schema::{FieldType, Schema};
use crate::sql::parse_sql;
use crate::strategy::{self, Strategy};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Full conversion output: one collection per table plus a narrative line
/// per relationship.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConversionResult {
    pub collections: IndexMap<String, Collection>,
    pub relationships_analysis: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Collection {
    pub fields: IndexMap<String, CollectionField>,
    pub relationships: Vec<RelationshipEntry>,
}

/// A field of a collection. Fields copied in by embedding carry
/// `embedded_from` and no flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionField {
    #[serde(rename = "type")]
    pub typ: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "is_false")]
    pub primary_key: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub foreign_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_from: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEntry {
    pub relation_type: Cardinality,
    pub with: String,
    pub foreign_field: String,
    pub strategy: Strategy,
    pub description: String,
}

impl ConversionResult {
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Only the `collections` map, as shown on screen. Fields keep their
    /// type and flags; embedding provenance is left out.
    pub fn collections_json_pretty(&self) -> serde_json::Result<String> {
        let view: IndexMap<&str, CollectionView<'_>> = self
            .collections
            .iter()
            .map(|(name, collection)| (name.as_str(), CollectionView::from(collection)))
            .collect();
        serde_json::to_string_pretty(&view)
    }
}

#[derive(Serialize)]
struct CollectionView<'a> {
    fields: IndexMap<&'a str, FieldView>,
    relationships: &'a [RelationshipEntry],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldView {
    #[serde(rename = "type")]
    typ: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
    #[serde(skip_serializing_if = "is_false")]
    primary_key: bool,
    #[serde(skip_serializing_if = "is_false")]
    foreign_key: bool,
}

impl<'a> From<&'a Collection> for CollectionView<'a> {
    fn from(collection: &'a Collection) -> Self {
        let fields = collection
            .fields
            .iter()
            .map(|(name, field)| {
                let view = FieldView {
                    typ: field.typ,
                    required: field.required,
                    primary_key: field.primary_key,
                    foreign_key: field.foreign_key,
                };
                (name.as_str(), view)
            })
            .collect();
        Self {
            fields,
            relationships: &collection.relationships,
        }
    }
}

/// Convert a SQL script into a document-store schema.
///
/// Never fails: unrecognized constructs are left out of the result.
pub fn convert(sql: &str) -> ConversionResult {
    let schema = parse_sql(sql);
    let relationships = relation::analyze(&schema);
    assemble(&schema, &relationships)
}

/// Build collections from a parsed schema and its relationships.
pub fn assemble(schema: &Schema, relationships: &[Relationship]) -> ConversionResult {
    let mut result = ConversionResult::default();

    for table in schema.tables.values() {
        let mut collection = Collection::default();

        for (name, field) in &table.fields {
            collection.fields.insert(
                name.clone(),
                CollectionField {
                    typ: field.typ,
                    required: Some(field.required || field.primary_key),
                    primary_key: field.primary_key,
                    foreign_key: field.foreign_key,
                    embedded_from: None,
                },
            );
        }

        for rel in relationships.iter().filter(|r| r.from == table.name) {
            let strategy = strategy::choose(rel);

            let description = match strategy {
                Strategy::Embedding => {
                    embed_target(&mut collection, schema, &rel.to);
                    format!(
                        "Les données complètes de {} sont intégrées dans le document {} sous forme d'objet imbriqué.",
                        rel.to, table.name
                    )
                }
                Strategy::Referencing => format!(
                    "Référence vers la collection {} via le champ {} pour éviter la duplication et faciliter la mise à jour.",
                    rel.to, rel.from_field
                ),
            };

            collection.relationships.push(RelationshipEntry {
                relation_type: rel.cardinality,
                with: rel.to.clone(),
                foreign_field: rel.from_field.clone(),
                strategy,
                description,
            });

            result.relationships_analysis.push(format!(
                "La relation {} entre {} et {} utilise la stratégie de {}, avec le champ \"{}\".",
                rel.cardinality,
                rel.from,
                rel.to,
                strategy.label(),
                rel.from_field
            ));
        }

        result.collections.insert(table.name.clone(), collection);
    }

    debug!(
        collections = result.collections.len(),
        relationships = result.relationships_analysis.len(),
        "assembled document schema"
    );
    result
}

/// Copy every field of `target` into the collection as `<target>_<field>`.
/// An unknown target contributes nothing.
fn embed_target(collection: &mut Collection, schema: &Schema, target: &str) {
    let Some(table) = schema.table(target) else {
        debug!(table = target, "embedding target not declared, no fields copied");
        return;
    };

    for (name, field) in &table.fields {
        collection.fields.insert(
            format!("{}_{}", target, name),
            CollectionField {
                typ: field.typ,
                required: None,
                primary_key: false,
                foreign_key: false,
                embedded_from: Some(target.to_string()),
            },
        );
    }
}

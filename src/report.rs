//! Plain-text report for a conversion result.

use crate::convert::{Collection, ConversionResult};

/// Render the result as an indented plain-text report.
pub fn render_text(result: &ConversionResult) -> String {
    let mut output = String::new();

    output.push_str("SCHÉMA MONGODB GÉNÉRÉ\n");
    output.push_str(&"=".repeat(50));
    output.push_str("\n\n");

    // Relationship narrative
    output.push_str("ANALYSE DES RELATIONS:\n");
    output.push_str(&"-".repeat(25));
    output.push('\n');
    for (i, line) in result.relationships_analysis.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, line));
    }

    output.push_str("\n\nCOLLECTIONS:\n");
    output.push_str(&"-".repeat(15));
    output.push('\n');
    for (name, collection) in &result.collections {
        render_collection(&mut output, name, collection);
    }

    output
}

fn render_collection(output: &mut String, name: &str, collection: &Collection) {
    output.push_str(&format!("\n{}:\n", name.to_uppercase()));
    output.push_str("  Champs:\n");

    for (field_name, field) in &collection.fields {
        output.push_str(&format!("    - {}: {}", field_name, field.typ.as_str()));
        if field.primary_key {
            output.push_str(" (Clé primaire)");
        }
        if field.foreign_key {
            output.push_str(" (Clé étrangère)");
        }
        if field.required == Some(true) {
            output.push_str(" (Obligatoire)");
        }
        output.push('\n');
    }

    if !collection.relationships.is_empty() {
        output.push_str("  Relations:\n");
        for rel in &collection.relationships {
            output.push_str(&format!(
                "    - {} vers {} ({})\n",
                rel.relation_type,
                rel.with,
                rel.strategy.as_str()
            ));
        }
    }
}

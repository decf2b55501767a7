pub mod convert;
pub mod input;
pub mod relation;
pub mod report;
pub mod schema;
pub mod sql;
pub mod strategy;

use wasm_bindgen::prelude::*;

pub use convert::{convert, ConversionResult};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Convert SQL source to a pretty-printed JSON document schema
#[wasm_bindgen(js_name = "sqlToDocumentSchema")]
pub fn sql_to_document_schema(source: &str) -> Result<String, String> {
    let source = input::validate_sql(source).map_err(|e| e.to_string())?;
    convert(source).to_json_pretty().map_err(|e| e.to_string())
}

/// Convert SQL source to a plain JS object
#[wasm_bindgen(js_name = "sqlToDocumentObject")]
pub fn sql_to_document_object(source: &str) -> Result<JsValue, JsValue> {
    let json = sql_to_document_schema(source).map_err(|e| JsValue::from_str(&e))?;
    js_sys::JSON::parse(&json)
}

/// Convert SQL source to the plain-text report
#[wasm_bindgen(js_name = "sqlToTextReport")]
pub fn sql_to_text_report(source: &str) -> Result<String, String> {
    let source = input::validate_sql(source).map_err(|e| e.to_string())?;
    Ok(report::render_text(&convert(source)))
}

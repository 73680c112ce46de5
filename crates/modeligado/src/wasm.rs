//! WebAssembly bindings for Modeligado
//!
//! Browser-facing wrappers around parsing and source generation. Results
//! are returned as JSON strings; failures are thrown as JavaScript errors.

use wasm_bindgen::prelude::*;

use crate::core::Database;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Parse a diagram into its node and link lists
///
/// # Returns
/// * JSON string with fields: nodes (class names with qualifier, properties
///   and methods), links (relations) and missing (referenced but undefined
///   class names)
/// * Throws a JavaScript error carrying the line number if parsing fails
#[wasm_bindgen]
pub fn parse_diagram(input: &str) -> Result<String, JsValue> {
    let database = crate::parse(input).map_err(to_js_error)?;

    let nodes: Vec<_> = database.nodes().map(|class| &class.context).collect();
    let links: Vec<_> = database.edges().collect();
    let result = serde_json::json!({
        "nodes": nodes,
        "links": links,
        "missing": database.missing_classes(),
    });

    serde_json::to_string(&result).map_err(to_js_error)
}

/// Parse a diagram and generate its Java sources
///
/// # Arguments
/// * `input` - Class diagram text
/// * `package` - Package name; an empty string means no package statement
///
/// # Returns
/// * JSON object mapping class names to source text
#[wasm_bindgen]
pub fn generate_sources(input: &str, package: &str) -> Result<String, JsValue> {
    let package = Some(package.trim()).filter(|p| !p.is_empty());
    let sources = crate::convert(input, package).map_err(to_js_error)?;

    serde_json::to_string(&sources).map_err(to_js_error)
}

/// The bundled example diagram
#[wasm_bindgen]
pub fn example_diagram() -> String {
    crate::example_diagram().to_string()
}

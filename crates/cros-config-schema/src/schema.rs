//! The bundled model schema

use serde_json::Value;

use crate::flatten::parse_source;
use crate::Result;

/// JSON schema (draft-07, written as YAML) every flattened config must match.
pub const DEFAULT_SCHEMA: &str = include_str!("../schema/cros_config_schema.yaml");

/// Parse schema text, YAML or JSON, into a JSON value.
pub fn load_schema(text: &str) -> Result<Value> {
    Ok(parse_source(text)?.to_json())
}

/// The bundled schema, parsed.
pub fn default_schema() -> Result<Value> {
    load_schema(DEFAULT_SCHEMA)
}

//! Markdown documentation of the model schema

use serde_json::{Map, Value};

use crate::{Error, Result};

pub const BEGIN_MARKER: &str = "begin_definitions";
pub const END_MARKER: &str = "end_definitions";

const TABLE_HEADER: &str = "| Attribute | Type   | RegEx     | Required | Description |";
const TABLE_RULE: &str = "| --------- | ------ | --------- | -------- | ----------- |";

/// Render the type tables of the model schema as a Markdown block.
///
/// The block starts with `[](begin_definitions)` and ends with
/// `[](end_definitions)` followed by a newline.
pub fn generate_schema_doc(schema: &Value) -> Result<String> {
    let model = model_definition(schema)?;

    let mut out = vec![
        format!("[]({BEGIN_MARKER})"),
        String::new(),
        "## CrOS Config Type Definitions (v2)".to_string(),
    ];
    type_table("model", model, schema, &mut out);
    out.push(String::new());
    out.push(format!("[]({END_MARKER})"));
    out.push(String::new());

    Ok(out.join("\n"))
}

/// Replace the definitions block of `existing` with `block`.
///
/// Lines before the begin marker and after the end marker are kept as they
/// are. Without an existing document the block is returned on its own; a
/// document without markers gets the block appended.
pub fn splice_definitions(existing: Option<&str>, block: &str) -> String {
    let Some(existing) = existing else {
        return block.to_string();
    };

    let mut pre = String::new();
    let mut post = String::new();
    let mut in_pre = true;
    let mut in_post = false;
    for line in existing.split_inclusive('\n') {
        if line.contains(BEGIN_MARKER) {
            in_pre = false;
        }
        if in_pre {
            pre.push_str(line);
        }
        if in_post {
            post.push_str(line);
        }
        if line.contains(END_MARKER) {
            in_post = true;
        }
    }

    format!("{pre}{block}{post}")
}

fn model_definition(schema: &Value) -> Result<&Value> {
    let items = schema
        .pointer("/properties/chromeos/properties/models/items")
        .or_else(|| schema.pointer("/properties/models/items"))
        .ok_or_else(|| Error::InvalidSchema {
            message: "schema does not describe a models list".to_string(),
        })?;

    match resolve_ref(items, schema) {
        Some(model) if model.is_object() => Ok(model),
        _ => Err(Error::InvalidSchema {
            message: "model type definition is missing".to_string(),
        }),
    }
}

/// Follow a local `$ref` (`#/...`), or return the value itself.
fn resolve_ref<'a>(value: &'a Value, schema: &'a Value) -> Option<&'a Value> {
    match value.get("$ref").and_then(Value::as_str) {
        Some(reference) => schema.pointer(reference.strip_prefix('#')?),
        None => Some(value),
    }
}

fn type_table(name: &str, type_def: &Value, schema: &Value, out: &mut Vec<String>) {
    let empty = Map::new();
    let properties = type_def
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let patterns = type_def
        .get("patternProperties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let required: Vec<&str> = type_def
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    out.push(format!("### {name}"));
    out.push(TABLE_HEADER.to_string());
    out.push(TABLE_RULE.to_string());

    let mut attrs: Vec<(&String, &Value)> = properties.iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(b.0));

    let mut children: Vec<(String, &Value)> = Vec::new();
    for (attr, raw) in attrs {
        let Some(attr_def) = resolve_ref(raw, schema) else {
            continue;
        };
        let attr_type = match child_type(attr_def, schema) {
            Some(child) => {
                children.push((attr.clone(), child));
                format!("[{attr}](#{attr})")
            }
            None => type_name(attr_def),
        };
        out.push(row(
            attr,
            &attr_type,
            &regex(attr_def),
            required.contains(&attr.as_str()),
            description(attr_def),
        ));
    }

    let mut keyed: Vec<(&String, &Value)> = patterns.iter().collect();
    keyed.sort_by(|a, b| a.0.cmp(b.0));
    for (pattern, raw) in keyed {
        let Some(attr_def) = resolve_ref(raw, schema) else {
            continue;
        };
        let attr = ref_name(raw).unwrap_or("pattern").to_string();
        let attr_type = match child_type(attr_def, schema) {
            Some(child) => {
                children.push((attr.clone(), child));
                format!("[{attr}](#{attr})")
            }
            None => type_name(attr_def),
        };
        out.push(row(
            &attr,
            &attr_type,
            &format!("```{pattern}```"),
            false,
            description(attr_def),
        ));
    }

    out.push(String::new());
    for (child_name, child) in children {
        type_table(&child_name, child, schema, out);
    }
}

/// The object type an attribute documents in its own table, if any.
fn child_type<'a>(attr_def: &'a Value, schema: &'a Value) -> Option<&'a Value> {
    match attr_def.get("type").and_then(Value::as_str) {
        Some("object") => Some(attr_def),
        Some("array") => attr_def
            .get("items")
            .and_then(|items| resolve_ref(items, schema))
            .filter(|items| items.get("type").and_then(Value::as_str) == Some("object")),
        _ => None,
    }
}

fn ref_name(value: &Value) -> Option<&str> {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.rsplit('/').next())
}

fn type_name(attr_def: &Value) -> String {
    match attr_def.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        _ => String::new(),
    }
}

fn regex(attr_def: &Value) -> String {
    attr_def
        .get("pattern")
        .and_then(Value::as_str)
        .map(|p| format!("```{p}```"))
        .unwrap_or_default()
}

fn description(attr_def: &Value) -> &str {
    attr_def
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn row(attr: &str, attr_type: &str, regex: &str, required: bool, description: &str) -> String {
    format!("| {attr} | {attr_type} | {regex} | {required} | {description} |")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "definitions": {
                "model": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "pattern": "^[a-z]+$", "description": "Model name."},
                        "thermal": {
                            "type": "object",
                            "properties": {"dptf-dv": {"type": "string"}}
                        }
                    },
                    "required": ["name"]
                }
            },
            "properties": {"chromeos": {"properties": {"models": {
                "type": "array",
                "items": {"$ref": "#/definitions/model"}
            }}}}
        })
    }

    #[test]
    fn test_generates_nested_tables() {
        let doc = generate_schema_doc(&schema()).unwrap();
        let expected = [
            "[](begin_definitions)",
            "",
            "## CrOS Config Type Definitions (v2)",
            "### model",
            TABLE_HEADER,
            TABLE_RULE,
            "| name | string | ```^[a-z]+$``` | true | Model name. |",
            "| thermal | [thermal](#thermal) |  | false |  |",
            "",
            "### thermal",
            TABLE_HEADER,
            TABLE_RULE,
            "| dptf-dv | string |  | false |  |",
            "",
            "",
            "[](end_definitions)",
            "",
        ]
        .join("\n");
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_missing_models_is_invalid_schema() {
        assert!(matches!(
            generate_schema_doc(&json!({"type": "object"})),
            Err(Error::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_splice_keeps_surrounding_content() {
        let existing = "# Title\nintro\n[](begin_definitions)\nold\n[](end_definitions)\nfooter\n";
        let spliced = splice_definitions(Some(existing), "[](begin_definitions)\nnew\n[](end_definitions)\n");
        assert_eq!(
            spliced,
            "# Title\nintro\n[](begin_definitions)\nnew\n[](end_definitions)\nfooter\n"
        );
    }

    #[test]
    fn test_splice_without_markers_appends() {
        assert_eq!(splice_definitions(Some("text\n"), "block\n"), "text\nblock\n");
        assert_eq!(splice_definitions(None, "block\n"), "block\n");
    }

    #[test]
    fn test_bundled_schema_documents_touch_devices() {
        let doc = generate_schema_doc(&crate::default_schema().unwrap()).unwrap();
        assert!(doc.contains("### touch-device"));
        assert!(doc.contains("| firmware-bin | string |"));
        assert!(doc.contains("### files"));
    }
}

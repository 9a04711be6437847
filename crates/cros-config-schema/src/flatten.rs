//! Flattening of `devices → products → skus` sources into model records

use serde_json::{Map, Value};

use crate::node::Node;
use crate::scope::VariableScope;
use crate::template::{check_resolved, expand_node, resolve_scope, strip_template_only};
use crate::{Error, Result};

pub const CHROMEOS: &str = "chromeos";
pub const MODELS: &str = "models";
pub const DEVICES: &str = "devices";
pub const PRODUCTS: &str = "products";
pub const SKUS: &str = "skus";
pub const CONFIG: &str = "config";

/// Parse YAML (or JSON, which YAML accepts) source text into a [`Node`].
pub fn parse_source(source: &str) -> Result<Node> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))?;
    Node::from_yaml(&yaml)
}

/// Flatten a source tree into one config record per product × SKU.
///
/// A tree that already holds a flat `models` list is returned as is, which
/// makes flattening idempotent on its own output.
pub fn flatten(tree: &Node) -> Result<Vec<Node>> {
    let chromeos = tree
        .get(CHROMEOS)
        .ok_or_else(|| Error::invalid_source(format!("missing top-level '{CHROMEOS}' key")))?;

    match (chromeos.get(DEVICES), chromeos.get(MODELS)) {
        (Some(_), Some(_)) => Err(Error::invalid_source(format!(
            "'{DEVICES}' and '{MODELS}' are mutually exclusive"
        ))),
        (Some(devices), None) => {
            let devices = sequence(devices, DEVICES)?;
            let mut configs = Vec::new();
            for (index, device) in devices.iter().enumerate() {
                flatten_device(index, device, &mut configs)?;
            }
            tracing::debug!(
                devices = devices.len(),
                models = configs.len(),
                "Flattened device tree"
            );
            Ok(configs)
        }
        (None, Some(models)) => {
            let models = sequence(models, MODELS)?;
            tracing::debug!(models = models.len(), "Source is already flat");
            Ok(models.to_vec())
        }
        (None, None) => Err(Error::invalid_source(format!(
            "'{CHROMEOS}' must contain either '{DEVICES}' or '{MODELS}'"
        ))),
    }
}

fn flatten_device(index: usize, device: &Node, configs: &mut Vec<Node>) -> Result<()> {
    if device.as_mapping().is_none() {
        return Err(Error::invalid_source(format!(
            "device {index} must be a mapping, found a {}",
            device.kind()
        )));
    }

    let device_scope = VariableScope::new().child(device);
    let products = device
        .get(PRODUCTS)
        .ok_or_else(|| Error::invalid_source(format!("device {index} has no '{PRODUCTS}' list")))
        .and_then(|p| sequence(p, PRODUCTS))?;
    let skus = device
        .get(SKUS)
        .ok_or_else(|| Error::invalid_source(format!("device {index} has no '{SKUS}' list")))
        .and_then(|s| sequence(s, SKUS))?;

    for product in products {
        let product_scope = device_scope.child(product);
        for (sku_index, sku) in skus.iter().enumerate() {
            let sku_scope = resolve_scope(&product_scope.child(sku))?;

            let mut config = sku.get(CONFIG).cloned().ok_or_else(|| {
                Error::invalid_source(format!(
                    "sku {sku_index} of device {index} has no '{CONFIG}' mapping"
                ))
            })?;
            expand_node(&mut config, &sku_scope)?;
            check_resolved(&config)?;
            strip_template_only(&mut config);

            tracing::debug!(device = index, sku = sku_index, "Flattened SKU");
            configs.push(config);
        }
    }
    Ok(())
}

fn sequence<'a>(node: &'a Node, name: &str) -> Result<&'a [Node]> {
    node.as_sequence().ok_or_else(|| {
        Error::invalid_source(format!("'{name}' must be a list, found a {}", node.kind()))
    })
}

/// Flatten a source tree into the canonical `{"chromeos": {"models": [...]}}`
/// document. Everything outside the model list is dropped.
pub fn transform_tree(tree: &Node) -> Result<Value> {
    let models: Vec<Value> = flatten(tree)?.iter().map(Node::to_json).collect();

    let mut chromeos = Map::new();
    chromeos.insert(MODELS.to_string(), Value::Array(models));
    let mut root = Map::new();
    root.insert(CHROMEOS.to_string(), Value::Object(chromeos));
    Ok(Value::Object(root))
}

/// Transform source YAML text into the canonical JSON artifact text.
pub fn transform_config(source: &str) -> Result<String> {
    let tree = parse_source(source)?;
    to_canonical_json(&transform_tree(&tree)?)
}

/// Serialize with sorted keys and two-space indentation.
///
/// Keys are re-sorted here so the output does not depend on how the map
/// type orders its entries.
pub fn to_canonical_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&sorted(value))?)
}

/// Copy of `value` with every object's keys inserted in sorted order.
pub(crate) fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key.as_str()]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

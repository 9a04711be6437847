//! Schema and business-rule validation of flattened configs

use std::collections::BTreeMap;

use serde_json::Value;

use crate::flatten::{CHROMEOS, MODELS, sorted};
use crate::{Error, Result, SchemaViolation};

/// Validate a canonical config document against a JSON schema.
///
/// Every violation is reported, not just the first.
pub fn validate_config_schema(schema: &Value, config: &Value) -> Result<()> {
    let validator = jsonschema::validator_for(schema).map_err(|e| Error::InvalidSchema {
        message: e.to_string(),
    })?;

    let violations: Vec<SchemaViolation> = validator
        .iter_errors(config)
        .map(|e| SchemaViolation {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = violations.len(), "Schema validation failed");
        Err(Error::SchemaValidation { violations })
    }
}

/// Validate rules the schema cannot express.
///
/// Currently: `identity` must be unique across all models.
pub fn validate_config(config: &Value) -> Result<()> {
    let identities: Vec<String> = config
        .get(CHROMEOS)
        .and_then(|c| c.get(MODELS))
        .and_then(Value::as_array)
        .map(|models| models.iter().map(identity_key).collect())
        .unwrap_or_default();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for identity in &identities {
        *counts.entry(identity.as_str()).or_default() += 1;
    }
    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(identity, _)| identity.to_string())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(Error::Uniqueness {
            identities,
            duplicates,
        })
    }
}

fn identity_key(model: &Value) -> String {
    match model.get("identity") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => sorted(other).to_string(),
        None => Value::Null.to_string(),
    }
}

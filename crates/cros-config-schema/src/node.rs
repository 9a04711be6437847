//! Tagged tree representation of a config source
//!
//! Source documents are converted once into [`Node`] so the scope walker and
//! the template expander can match on shape exhaustively instead of probing
//! dynamic values at runtime.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{Error, Result};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Text used when the scalar is substituted into a larger string.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::Number((*i).into()),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::Str(s) => JsonValue::String(s.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// A node in a config tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    /// Keys keep their source order
    Mapping(IndexMap<String, Node>),
}

impl Node {
    /// Convert a parsed YAML document.
    ///
    /// Aliases are already resolved by the parser. Tags are dropped. Mapping
    /// keys must be scalars; non-string scalar keys are stringified.
    pub fn from_yaml(value: &YamlValue) -> Result<Self> {
        Ok(match value {
            YamlValue::Null => Self::Scalar(Scalar::Null),
            YamlValue::Bool(b) => Self::Scalar(Scalar::Bool(*b)),
            YamlValue::Number(n) => Self::Scalar(if let Some(i) = n.as_i64() {
                Scalar::Int(i)
            } else {
                Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            YamlValue::String(s) => Self::Scalar(Scalar::Str(s.clone())),
            YamlValue::Sequence(items) => {
                Self::Sequence(items.iter().map(Self::from_yaml).collect::<Result<_>>()?)
            }
            YamlValue::Mapping(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, val) in map {
                    out.insert(yaml_key(key)?, Self::from_yaml(val)?);
                }
                Self::Mapping(out)
            }
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value)?,
        })
    }

    /// Convert a parsed JSON document.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Scalar(Scalar::Null),
            JsonValue::Bool(b) => Self::Scalar(Scalar::Bool(*b)),
            JsonValue::Number(n) => Self::Scalar(match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            JsonValue::String(s) => Self::Scalar(Scalar::Str(s.clone())),
            JsonValue::Array(items) => Self::Sequence(items.iter().map(Self::from_json).collect()),
            JsonValue::Object(map) => Self::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to JSON with mapping keys in sorted order.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Scalar(scalar) => scalar.to_json(),
            Self::Sequence(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Mapping(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let mut out = serde_json::Map::new();
                for key in keys {
                    out.insert(key.clone(), map[key].to_json());
                }
                JsonValue::Object(out)
            }
        }
    }

    /// Look up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Short shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

fn yaml_key(key: &YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        other => Err(Error::invalid_source(format!(
            "mapping keys must be scalars, found {other:?}"
        ))),
    }
}

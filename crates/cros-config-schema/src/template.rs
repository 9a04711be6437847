//! `{{var}}` placeholder expansion

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::node::{Node, Scalar};
use crate::scope::VariableScope;
use crate::{Error, Result};

/// Matches a `{{name}}` placeholder and captures the variable name.
pub static TEMPLATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]*)\}\}").unwrap());

/// Keys starting with this marker only feed templates and are never emitted.
pub const TEMPLATE_ONLY_PREFIX: char = '$';

/// Expand every placeholder in `value`.
///
/// When `value` is exactly one placeholder bound to a number, the number
/// itself is returned so identity fields such as `sku-id` stay integers.
/// Every other case is plain substring substitution.
pub fn expand_str(value: &str, scope: &VariableScope) -> Result<Scalar> {
    let mut single = None;
    for caps in TEMPLATE_PATTERN.captures_iter(value) {
        let name = &caps[1];
        let Some(bound) = scope.get(name) else {
            return Err(Error::TemplateVariable {
                variable: name.to_string(),
                value: value.to_string(),
            });
        };
        if caps[0].len() == value.len() {
            single = Some(bound);
        }
    }

    if let Some(bound) = single.filter(|b| b.is_numeric()) {
        return Ok(bound.clone());
    }

    let expanded = TEMPLATE_PATTERN.replace_all(value, |caps: &Captures| {
        scope.get(&caps[1]).map(Scalar::render).unwrap_or_default()
    });
    Ok(Scalar::Str(expanded.into_owned()))
}

/// Expand placeholders in every string leaf of `node`, in place.
pub fn expand_node(node: &mut Node, scope: &VariableScope) -> Result<()> {
    match node {
        Node::Scalar(Scalar::Str(s)) => {
            let expanded = expand_str(s, scope)?;
            *node = Node::Scalar(expanded);
        }
        Node::Scalar(_) => {}
        Node::Sequence(items) => {
            for item in items {
                expand_node(item, scope)?;
            }
        }
        Node::Mapping(map) => {
            for value in map.values_mut() {
                expand_node(value, scope)?;
            }
        }
    }
    Ok(())
}

/// Let variables reference other variables, one level deep.
///
/// Each value is expanded against the scope as it was before this pass, so
/// the result does not depend on the order variables were bound in.
pub fn resolve_scope(scope: &VariableScope) -> Result<VariableScope> {
    let mut resolved = VariableScope::new();
    for (name, value) in scope.iter() {
        let value = match value {
            Scalar::Str(s) => expand_str(s, scope)?,
            other => other.clone(),
        };
        resolved.bind(name.clone(), value);
    }
    Ok(resolved)
}

/// Fail on any placeholder left after expansion.
///
/// A leftover means a variable chain longer than the single extra pass
/// supports.
pub fn check_resolved(node: &Node) -> Result<()> {
    match node {
        Node::Scalar(Scalar::Str(s)) => match TEMPLATE_PATTERN.captures(s) {
            Some(caps) => Err(Error::TemplateVariable {
                variable: caps[1].to_string(),
                value: s.clone(),
            }),
            None => Ok(()),
        },
        Node::Scalar(_) => Ok(()),
        Node::Sequence(items) => items.iter().try_for_each(check_resolved),
        Node::Mapping(map) => map.values().try_for_each(check_resolved),
    }
}

/// Remove template-only (`$`-prefixed) keys at any depth.
pub fn strip_template_only(node: &mut Node) {
    match node {
        Node::Mapping(map) => {
            map.retain(|key, _| !key.starts_with(TEMPLATE_ONLY_PREFIX));
            for value in map.values_mut() {
                strip_template_only(value);
            }
        }
        Node::Sequence(items) => items.iter_mut().for_each(strip_template_only),
        Node::Scalar(_) => {}
    }
}

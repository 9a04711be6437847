//! Variable scopes built while walking devices, products and SKUs

use indexmap::IndexMap;

use crate::node::{Node, Scalar};

/// Ordered name → value map of template variables.
///
/// A scope is extended level by level (device, then product, then SKU).
/// Binding a name that already exists replaces its value in place, so a
/// SKU-level variable shadows a device-level one of the same name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableScope {
    vars: IndexMap<String, Scalar>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Scalar) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Scalar)> {
        self.vars.iter()
    }

    /// Bind every scalar leaf reachable from `node` through mappings.
    ///
    /// Scalars at one level are bound before nested mappings are walked, so
    /// the variables of an enclosing level are in place first. Sequences are
    /// not walked: their items never become variables.
    pub fn collect(&mut self, node: &Node) {
        let Node::Mapping(map) = node else {
            return;
        };

        let mut nested = Vec::new();
        for (key, value) in map {
            match value {
                Node::Scalar(scalar) => self.bind(key.clone(), scalar.clone()),
                Node::Mapping(_) => nested.push(value),
                Node::Sequence(_) => {}
            }
        }

        for value in nested {
            self.collect(value);
        }
    }

    /// A copy of this scope extended with the leaves of `node`.
    pub fn child(&self, node: &Node) -> Self {
        let mut scope = self.clone();
        scope.collect(node);
        scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(text: &str) -> Node {
        Node::from_yaml(&serde_yaml::from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn test_collect_binds_scalars_and_nested_leaves() {
        let mut scope = VariableScope::new();
        scope.collect(&yaml("$name: some\nconfig:\n  identity:\n    sku-id: 2\n"));

        assert_eq!(scope.get("$name"), Some(&Scalar::from("some")));
        assert_eq!(scope.get("sku-id"), Some(&Scalar::Int(2)));
        assert!(!scope.contains("config"));
        assert!(!scope.contains("identity"));
    }

    #[test]
    fn test_collect_skips_sequences() {
        let mut scope = VariableScope::new();
        scope.collect(&yaml("$name: some\nproducts:\n  - $key-id: SOME\n"));

        assert_eq!(scope.len(), 1);
        assert!(!scope.contains("$key-id"));
        assert!(!scope.contains("products"));
    }

    #[test]
    fn test_child_shadows_parent() {
        let device = VariableScope::new().child(&yaml("$wallpaper: default\n$name: some\n"));
        let sku = device.child(&yaml("$wallpaper: wallpaper-wl1\n"));

        assert_eq!(sku.get("$wallpaper"), Some(&Scalar::from("wallpaper-wl1")));
        assert_eq!(sku.get("$name"), Some(&Scalar::from("some")));
        assert_eq!(device.get("$wallpaper"), Some(&Scalar::from("default")));
    }

    #[test]
    fn test_nested_leaves_override_enclosing_scalars() {
        let scope = VariableScope::new().child(&yaml("key: outer\ninner:\n  key: inner\n"));
        assert_eq!(scope.get("key"), Some(&Scalar::from("inner")));
    }

    #[test]
    fn test_collect_on_non_mapping_is_noop() {
        let scope = VariableScope::new().child(&yaml("- a\n- b\n"));
        assert!(scope.is_empty());
    }
}

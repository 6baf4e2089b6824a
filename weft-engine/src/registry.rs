//! Process-wide node-type registry.
//!
//! Configuration-driven graphs name node types by string; the registry maps
//! each type string to a factory that builds the node from its full JSON
//! configuration. Registration happens during startup; registering a type
//! twice is rejected (the second registration reports failure and the first
//! factory stays in place).

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use weft_core::{log_debug, Node, Result, WeftError};

/// Factory callable: full node JSON in, constructed node out.
pub type NodeFactory = Arc<dyn Fn(&serde_json::Value) -> Result<Arc<dyn Node>> + Send + Sync>;

static GLOBAL_REGISTRY: Lazy<NodeRegistry> = Lazy::new(NodeRegistry::new);

/// Mapping from node type strings to factories.
#[derive(Default)]
pub struct NodeRegistry {
    factories: RwLock<HashMap<String, NodeFactory>>,
}

impl NodeRegistry {
    /// Create an empty, instance-scoped registry (useful in tests).
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by the default loader paths.
    pub fn global() -> &'static NodeRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register a factory for `node_type`.
    ///
    /// Returns `false` without replacing anything when the type is already
    /// registered.
    pub fn register<F>(&self, node_type: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&serde_json::Value) -> Result<Arc<dyn Node>> + Send + Sync + 'static,
    {
        let node_type = node_type.into();
        let mut factories = self.factories.write();
        if factories.contains_key(&node_type) {
            log_debug!("node type '{node_type}' already registered");
            return false;
        }
        factories.insert(node_type, Arc::new(factory));
        true
    }

    /// Instantiate a node from its JSON configuration.
    ///
    /// Reads the `type` field, looks up the factory, and hands it the full
    /// configuration object.
    pub fn create(&self, config: &serde_json::Value) -> Result<Arc<dyn Node>> {
        let node_type = config
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| WeftError::ConfigField {
                node: config
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<unnamed>")
                    .to_string(),
                field: "type".to_string(),
                cause: "is missing or not a string".to_string(),
            })?;

        let factory = {
            let factories = self.factories.read();
            factories.get(node_type).cloned()
        };
        let factory = factory.ok_or_else(|| WeftError::UnknownNodeType {
            node_type: node_type.to_string(),
        })?;
        factory(config)
    }

    /// Whether `node_type` has a registered factory.
    pub fn contains(&self, node_type: &str) -> bool {
        self.factories.read().contains_key(node_type)
    }

    /// All registered type strings, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.read().keys().cloned().collect();
        types.sort();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weft_core::{FnNode, NodeSpec};

    fn noop_factory(config: &serde_json::Value) -> Result<Arc<dyn Node>> {
        let spec = NodeSpec::from_config(config)?;
        Ok(Arc::new(FnNode::new(spec, |_| Ok(()))))
    }

    #[test]
    fn registers_and_creates() {
        let registry = NodeRegistry::new();
        assert!(registry.register("noop", noop_factory));
        assert!(registry.contains("noop"));

        let node = registry
            .create(&json!({ "type": "noop", "name": "n1", "outputs": ["x"] }))
            .unwrap();
        assert_eq!(node.spec().name, "n1");
        assert_eq!(node.spec().outputs, vec!["x"]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = NodeRegistry::new();
        assert!(registry.register("noop", noop_factory));
        assert!(!registry.register("noop", noop_factory));
        assert_eq!(registry.registered_types(), vec!["noop"]);
    }

    #[test]
    fn unknown_type_fails() {
        let registry = NodeRegistry::new();
        let err = registry
            .create(&json!({ "type": "mystery", "name": "n1" }))
            .unwrap_err();
        assert!(matches!(err, WeftError::UnknownNodeType { node_type } if node_type == "mystery"));
    }

    #[test]
    fn missing_type_field_fails() {
        let registry = NodeRegistry::new();
        let err = registry.create(&json!({ "name": "n1" })).unwrap_err();
        assert!(matches!(err, WeftError::ConfigField { field, .. } if field == "type"));
    }
}

//! Builds graphs from JSON documents.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "name": "pipeline",
//!   "nodes": [
//!     {
//!       "type": "offset",
//!       "name": "step_one",
//!       "inputs": ["input"],
//!       "control_inputs": [],
//!       "outputs": ["intermediate"],
//!       "params": { "offset": 1 }
//!     }
//!   ]
//! }
//! ```
//!
//! `name` is optional (default "untitled"); each node is instantiated by
//! looking its `type` up in a [`NodeRegistry`] and handing the factory the
//! full node object.
//!
//! When a document is loaded from a file, every node object is stamped with
//! a `config_dir` field holding the document's directory (existing values
//! are left alone). Node types that open further files, such as `subgraph`,
//! resolve relative paths against it instead of the process working
//! directory.

use crate::graph::Graph;
use crate::registry::NodeRegistry;
use std::path::Path;
use weft_core::{log_info, Result, WeftError};

/// Loads [`Graph`]s from JSON files or parsed documents.
pub struct GraphLoader;

impl GraphLoader {
    /// Load a graph from a JSON file, resolving node types against the
    /// global registry.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Graph> {
        Self::from_file_with(path, NodeRegistry::global())
    }

    /// Load a graph from a JSON file with an explicit registry.
    pub fn from_file_with(path: impl AsRef<Path>, registry: &NodeRegistry) -> Result<Graph> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| WeftError::ConfigOpen {
            path: path.display().to_string(),
            cause: err.to_string(),
        })?;
        let mut root: serde_json::Value =
            serde_json::from_str(&text).map_err(|err| WeftError::ConfigParse {
                path: path.display().to_string(),
                cause: err.to_string(),
            })?;
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            stamp_config_dir(&mut root, dir);
        }
        Self::from_value_with(&root, registry)
    }

    /// Build a graph from an already-parsed document using the global
    /// registry.
    pub fn from_value(root: &serde_json::Value) -> Result<Graph> {
        Self::from_value_with(root, NodeRegistry::global())
    }

    /// Build a graph from an already-parsed document with an explicit
    /// registry.
    pub fn from_value_with(root: &serde_json::Value, registry: &NodeRegistry) -> Result<Graph> {
        let name = root
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("untitled");

        let nodes = root
            .get("nodes")
            .and_then(serde_json::Value::as_array)
            .ok_or(WeftError::ConfigMissingNodes)?;

        let mut graph = Graph::new(name);
        for config in nodes {
            graph.add_shared(registry.create(config)?);
        }

        log_info!("built graph '{name}' with {} nodes", graph.len());
        Ok(graph)
    }
}

fn stamp_config_dir(root: &mut serde_json::Value, dir: &Path) {
    let Some(nodes) = root
        .get_mut("nodes")
        .and_then(serde_json::Value::as_array_mut)
    else {
        return;
    };
    for node in nodes {
        if let Some(object) = node.as_object_mut() {
            object
                .entry("config_dir")
                .or_insert_with(|| serde_json::Value::String(dir.display().to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;
    use std::sync::Arc;
    use weft_core::{FnNode, Node, NodeSpec};

    fn test_registry() -> NodeRegistry {
        let registry = NodeRegistry::new();
        registry.register("noop", |config| {
            let spec = NodeSpec::from_config(config)?;
            Ok(Arc::new(FnNode::new(spec, |_| Ok(()))) as Arc<dyn Node>)
        });
        registry
    }

    #[test]
    fn builds_from_a_parsed_document() {
        let registry = test_registry();
        let graph = GraphLoader::from_value_with(
            &json!({
                "name": "demo",
                "nodes": [
                    { "type": "noop", "name": "a", "outputs": ["x"] },
                    { "type": "noop", "name": "b", "inputs": ["x"] },
                ],
            }),
            &registry,
        )
        .unwrap();

        assert_eq!(graph.name(), "demo");
        assert_eq!(graph.len(), 2);
        assert!(graph.contains("a"));
        assert!(graph.contains("b"));
    }

    #[test]
    fn missing_name_defaults_to_untitled() {
        let registry = test_registry();
        let graph =
            GraphLoader::from_value_with(&json!({ "nodes": [] }), &registry).unwrap();
        assert_eq!(graph.name(), "untitled");
        assert!(graph.is_empty());
    }

    #[test]
    fn missing_nodes_array_fails() {
        let registry = test_registry();
        let err = GraphLoader::from_value_with(&json!({ "name": "x" }), &registry).unwrap_err();
        assert!(matches!(err, WeftError::ConfigMissingNodes));
    }

    #[test]
    fn unknown_node_type_fails() {
        let registry = test_registry();
        let err = GraphLoader::from_value_with(
            &json!({ "nodes": [{ "type": "mystery", "name": "a" }] }),
            &registry,
        )
        .unwrap_err();
        assert!(matches!(err, WeftError::UnknownNodeType { .. }));
    }

    #[test]
    fn loads_from_a_file() {
        let registry = test_registry();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "name": "from_disk", "nodes": [{{ "type": "noop", "name": "only" }}] }}"#
        )
        .unwrap();

        let graph = GraphLoader::from_file_with(file.path(), &registry).unwrap();
        assert_eq!(graph.name(), "from_disk");
        assert!(graph.contains("only"));
    }

    #[test]
    fn file_loads_stamp_the_document_directory() {
        let registry = NodeRegistry::new();
        let seen_dir = Arc::new(parking_lot::Mutex::new(None::<String>));
        let captured = Arc::clone(&seen_dir);
        registry.register("probe", move |config| {
            *captured.lock() = config
                .get("config_dir")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
            let spec = NodeSpec::from_config(config)?;
            Ok(Arc::new(FnNode::new(spec, |_| Ok(()))) as Arc<dyn Node>)
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(
            &path,
            r#"{ "nodes": [{ "type": "probe", "name": "only" }] }"#,
        )
        .unwrap();

        GraphLoader::from_file_with(&path, &registry).unwrap();
        assert_eq!(
            seen_dir.lock().as_deref(),
            Some(dir.path().display().to_string().as_str())
        );
    }

    #[test]
    fn value_loads_leave_config_dir_alone() {
        let registry = test_registry();
        let graph = GraphLoader::from_value_with(
            &json!({ "nodes": [{ "type": "noop", "name": "plain" }] }),
            &registry,
        )
        .unwrap();
        assert!(graph.contains("plain"));
    }

    #[test]
    fn missing_file_fails_with_the_path() {
        let err = GraphLoader::from_file_with("/no/such/graph.json", &test_registry())
            .unwrap_err();
        match err {
            WeftError::ConfigOpen { path, .. } => assert!(path.contains("graph.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_fails_as_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = GraphLoader::from_file_with(file.path(), &test_registry()).unwrap_err();
        assert!(matches!(err, WeftError::ConfigParse { .. }));
    }
}

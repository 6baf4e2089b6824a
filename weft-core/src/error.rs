//! Error types for weft.
//!
//! One strongly-typed error enum covers the whole workspace, with stable
//! `E###` codes in the display strings and enough context (key names, node
//! names, requested vs. stored types) to act on a failure without a
//! debugger.

use thiserror::Error;

/// The main error type for weft operations.
#[derive(Error, Debug)]
pub enum WeftError {
    // =========================================================================
    // Config Errors (E101-E199)
    // =========================================================================
    /// Failed to open a graph configuration file.
    #[error("E101: cannot open graph config at {path}: {cause}")]
    ConfigOpen {
        /// Path that could not be opened.
        path: String,
        /// Reason for the failure.
        cause: String,
    },

    /// Failed to parse a graph configuration document.
    #[error("E102: cannot parse graph config at {path}: {cause}")]
    ConfigParse {
        /// Path of the malformed document.
        path: String,
        /// Parser diagnostic.
        cause: String,
    },

    /// A node configuration field is missing or has the wrong shape.
    #[error("E103: node '{node}' config error: field '{field}' {cause}")]
    ConfigField {
        /// Node the field belongs to, or `<unnamed>` when the name itself
        /// is the problem.
        node: String,
        /// Offending field.
        field: String,
        /// What is wrong with it.
        cause: String,
    },

    /// The graph document has no `nodes` array.
    #[error("E104: graph config error: 'nodes' field is missing or not an array")]
    ConfigMissingNodes,

    /// A node `type` has no registered factory.
    #[error("E105: unknown node type '{node_type}'")]
    UnknownNodeType {
        /// The unregistered type string.
        node_type: String,
    },

    // =========================================================================
    // Graph Errors (E201-E299)
    // =========================================================================
    /// Two nodes declare the same data output key.
    #[error("E201: data key '{key}' is produced by both '{first}' and '{second}'")]
    DuplicateProducer {
        /// The doubly-produced key.
        key: String,
        /// Node seen first.
        first: String,
        /// Node seen second.
        second: String,
    },

    /// A non-empty graph has no entry point, which is also how a dependency
    /// cycle manifests.
    #[error("E202: cycle detected or no entry-point nodes in the graph")]
    CycleOrNoEntry,

    // =========================================================================
    // Workspace Errors (E301-E399)
    // =========================================================================
    /// A lookup found no value bound to the key.
    #[error("E301: no value named '{key}' in the workspace")]
    StoreKeyNotFound {
        /// The unbound key.
        key: String,
    },

    /// A typed lookup found a value of a different type.
    #[error("E302: type mismatch for '{key}': requested {requested}, stored {actual}")]
    StoreTypeMismatch {
        /// The key that was read.
        key: String,
        /// Type the caller asked for.
        requested: &'static str,
        /// Type actually stored.
        actual: &'static str,
    },

    // =========================================================================
    // Execution Errors (E401-E499)
    // =========================================================================
    /// A node's execute body failed; the first such failure aborts the run.
    #[error("E401: node '{node}' failed: {cause}")]
    NodeExecution {
        /// The failing node.
        node: String,
        /// The underlying failure.
        cause: String,
    },

    /// Free-form failure raised from inside a node body.
    #[error("E402: {cause}")]
    NodeFailure {
        /// Description of the failure.
        cause: String,
    },

    // =========================================================================
    // Pool Errors (E501-E599)
    // =========================================================================
    /// A task was submitted after the worker pool began shutting down.
    #[error("E501: task submitted to a stopped worker pool")]
    PoolStopped,
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, WeftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_code_and_context() {
        let err = WeftError::StoreTypeMismatch {
            key: "score".to_string(),
            requested: "i64",
            actual: "alloc::string::String",
        };
        let text = err.to_string();
        assert!(text.starts_with("E302"));
        assert!(text.contains("score"));
        assert!(text.contains("i64"));
    }

    #[test]
    fn node_execution_names_the_node() {
        let err = WeftError::NodeExecution {
            node: "fetch".to_string(),
            cause: "E301: no value named 'url' in the workspace".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("'fetch'"));
        assert!(text.contains("E301"));
    }
}

//! Node trait and related types.
//!
//! A node is described by an immutable [`NodeSpec`] (identity plus declared
//! data inputs, control inputs and data outputs) and a behavior, the
//! [`Node::execute`] body. The engine schedules purely from specs; execute
//! bodies only ever see the workspace.

use crate::error::{Result, WeftError};
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable description of one node.
///
/// A node may only write keys listed in `outputs` and only read keys listed
/// in `inputs` / `control_inputs`. That contract is by convention: the
/// engine does not police workspace access at run time, but it derives the
/// whole execution order from these declarations, so an undeclared access
/// races its producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Name, unique within its graph.
    pub name: String,
    /// Workspace keys read as data.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Workspace keys probed for control signals.
    #[serde(default)]
    pub control_inputs: Vec<String>,
    /// Workspace keys written.
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl NodeSpec {
    /// Create a spec with the given name and no declared keys.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            control_inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the data inputs.
    pub fn with_inputs<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the control inputs.
    pub fn with_control_inputs<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.control_inputs = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the data outputs.
    pub fn with_outputs<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a spec out of a node's JSON configuration.
    ///
    /// `name` must be a string; `inputs`, `control_inputs` and `outputs`
    /// are optional arrays of strings defaulting to empty.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let name = match config.get("name").and_then(serde_json::Value::as_str) {
            Some(name) => name.to_string(),
            None => {
                return Err(WeftError::ConfigField {
                    node: "<unnamed>".to_string(),
                    field: "name".to_string(),
                    cause: "is missing or not a string".to_string(),
                })
            }
        };

        let inputs = string_array(config, &name, "inputs")?;
        let control_inputs = string_array(config, &name, "control_inputs")?;
        let outputs = string_array(config, &name, "outputs")?;

        Ok(Self {
            name,
            inputs,
            control_inputs,
            outputs,
        })
    }

    /// Require an exact number of data inputs.
    pub fn ensure_inputs(&self, expected: usize) -> Result<()> {
        ensure_len(&self.name, "inputs", self.inputs.len(), expected)
    }

    /// Require an exact number of control inputs.
    pub fn ensure_control_inputs(&self, expected: usize) -> Result<()> {
        ensure_len(
            &self.name,
            "control_inputs",
            self.control_inputs.len(),
            expected,
        )
    }

    /// Require an exact number of data outputs.
    pub fn ensure_outputs(&self, expected: usize) -> Result<()> {
        ensure_len(&self.name, "outputs", self.outputs.len(), expected)
    }
}

fn ensure_len(node: &str, field: &str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(WeftError::ConfigField {
            node: node.to_string(),
            field: field.to_string(),
            cause: format!("must list exactly {expected} key(s), found {actual}"),
        })
    }
}

fn string_array(config: &serde_json::Value, node: &str, field: &str) -> Result<Vec<String>> {
    match config.get(field) {
        None => Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| WeftError::ConfigField {
                        node: node.to_string(),
                        field: field.to_string(),
                        cause: "entries must be strings".to_string(),
                    })
            })
            .collect(),
        Some(_) => Err(WeftError::ConfigField {
            node: node.to_string(),
            field: field.to_string(),
            cause: "must be an array".to_string(),
        }),
    }
}

/// The core trait for all weft nodes.
///
/// Implementations are shared across worker threads, so they must be
/// `Send + Sync`; any per-execution state belongs in the workspace.
pub trait Node: Send + Sync + fmt::Debug {
    /// The node's immutable description.
    fn spec(&self) -> &NodeSpec;

    /// Perform the node's work against the shared workspace.
    fn execute(&self, ws: &Workspace) -> Result<()>;
}

/// A node built from a spec and a closure.
///
/// The adapter of choice for code-defined graphs and tests:
///
/// ```
/// use weft_core::prelude::*;
///
/// let node = FnNode::new(
///     NodeSpec::new("double").with_inputs(["x"]).with_outputs(["y"]),
///     |ws| {
///         let x: i64 = ws.get("x")?;
///         ws.set("y", x * 2);
///         Ok(())
///     },
/// );
/// let ws = Workspace::new();
/// ws.set("x", 21_i64);
/// node.execute(&ws).unwrap();
/// assert_eq!(ws.get::<i64>("y").unwrap(), 42);
/// ```
pub struct FnNode {
    spec: NodeSpec,
    body: Box<dyn Fn(&Workspace) -> Result<()> + Send + Sync>,
}

impl FnNode {
    /// Create a node from a spec and an execute closure.
    pub fn new<F>(spec: NodeSpec, body: F) -> Self
    where
        F: Fn(&Workspace) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            spec,
            body: Box::new(body),
        }
    }
}

impl Node for FnNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        (self.body)(ws)
    }
}

impl fmt::Debug for FnNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnNode").field("spec", &self.spec).finish()
    }
}

//! Constant source node.

use crate::params;
use weft_core::{Node, NodeSpec, Result, Workspace};

/// Writes a configured JSON value to its single output.
///
/// Scalar values land under their natural Rust types (`i64`, `f64`,
/// `String`, `bool`); arrays and objects are stored as raw
/// [`serde_json::Value`].
///
/// Params: `value` (required, any JSON).
#[derive(Debug)]
pub struct ConstantNode {
    spec: NodeSpec,
    value: serde_json::Value,
}

impl ConstantNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let spec = NodeSpec::from_config(config)?;
        let value = params::required_value(config, &spec.name, "value")?;
        Self::new(spec, value)
    }

    /// Build from a spec and the value to emit.
    pub fn new(spec: NodeSpec, value: serde_json::Value) -> Result<Self> {
        spec.ensure_outputs(1)?;
        Ok(Self { spec, value })
    }
}

impl Node for ConstantNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        ws.set_json(self.spec.outputs[0].as_str(), &self.value);
        Ok(())
    }
}

//! Integer offset node.

use crate::params;
use weft_core::{Node, NodeSpec, Result, Workspace};

/// Adds a configured offset to its integer input.
///
/// Params: `offset` (optional integer, default 1).
#[derive(Debug)]
pub struct OffsetNode {
    spec: NodeSpec,
    offset: i64,
}

impl OffsetNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let spec = NodeSpec::from_config(config)?;
        let offset = params::i64_or(config, &spec.name, "offset", 1)?;
        Self::new(spec, offset)
    }

    /// Build from a spec and offset.
    pub fn new(spec: NodeSpec, offset: i64) -> Result<Self> {
        spec.ensure_inputs(1)?;
        spec.ensure_outputs(1)?;
        Ok(Self { spec, offset })
    }
}

impl Node for OffsetNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        let value: i64 = ws.get(&self.spec.inputs[0])?;
        ws.set(self.spec.outputs[0].as_str(), value + self.offset);
        Ok(())
    }
}

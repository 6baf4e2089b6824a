//! Integer scaling node.

use crate::params;
use weft_core::{Node, NodeSpec, Result, Workspace};

/// Multiplies its integer input by a configured factor.
///
/// Params: `factor` (optional integer, default 2).
#[derive(Debug)]
pub struct ScaleNode {
    spec: NodeSpec,
    factor: i64,
}

impl ScaleNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let spec = NodeSpec::from_config(config)?;
        let factor = params::i64_or(config, &spec.name, "factor", 2)?;
        Self::new(spec, factor)
    }

    /// Build from a spec and factor.
    pub fn new(spec: NodeSpec, factor: i64) -> Result<Self> {
        spec.ensure_inputs(1)?;
        spec.ensure_outputs(1)?;
        Ok(Self { spec, factor })
    }
}

impl Node for ScaleNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        let value: i64 = ws.get(&self.spec.inputs[0])?;
        ws.set(self.spec.outputs[0].as_str(), value * self.factor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multiplies_by_the_factor() {
        let node = ScaleNode::from_config(&json!({
            "name": "triple",
            "inputs": ["x"],
            "outputs": ["y"],
            "params": { "factor": 3 },
        }))
        .unwrap();

        let ws = Workspace::new();
        ws.set("x", 7_i64);
        node.execute(&ws).unwrap();
        assert_eq!(ws.get::<i64>("y").unwrap(), 21);
    }

    #[test]
    fn defaults_to_doubling() {
        let node = ScaleNode::from_config(&json!({
            "name": "double",
            "inputs": ["x"],
            "outputs": ["y"],
        }))
        .unwrap();

        let ws = Workspace::new();
        ws.set("x", 7_i64);
        node.execute(&ws).unwrap();
        assert_eq!(ws.get::<i64>("y").unwrap(), 14);
    }
}

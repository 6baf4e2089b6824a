//! Branch result collection.

use weft_core::{Node, NodeSpec, Result, WeftError, Workspace};

/// Copies the first bound input key to the single output.
///
/// The standard join after a routed branch: pruned branches never write
/// their outputs, so exactly one of this node's inputs is present and that
/// value, whatever its type, moves to the output key. All inputs absent
/// is a node failure.
#[derive(Debug)]
pub struct FirstPresentNode {
    spec: NodeSpec,
}

impl FirstPresentNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        Self::new(NodeSpec::from_config(config)?)
    }

    /// Build from a spec.
    pub fn new(spec: NodeSpec) -> Result<Self> {
        if spec.inputs.is_empty() {
            return Err(WeftError::ConfigField {
                node: spec.name,
                field: "inputs".to_string(),
                cause: "must list at least one key".to_string(),
            });
        }
        spec.ensure_outputs(1)?;
        Ok(Self { spec })
    }
}

impl Node for FirstPresentNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        for key in &self.spec.inputs {
            if ws.has(key) {
                ws.set_any(self.spec.outputs[0].as_str(), ws.get_any(key)?);
                return Ok(());
            }
        }
        Err(WeftError::NodeFailure {
            cause: format!("none of the inputs of '{}' are present", self.spec.name),
        })
    }
}

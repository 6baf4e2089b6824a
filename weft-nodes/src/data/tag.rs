//! String tagging node.

use crate::params;
use weft_core::{Node, NodeSpec, Result, Workspace};

/// Appends a configured tag to its string input.
///
/// Params: `tag` (required string).
#[derive(Debug)]
pub struct AppendTagNode {
    spec: NodeSpec,
    tag: String,
}

impl AppendTagNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let spec = NodeSpec::from_config(config)?;
        let tag = params::required_str(config, &spec.name, "tag")?;
        Self::new(spec, tag)
    }

    /// Build from a spec and tag.
    pub fn new(spec: NodeSpec, tag: impl Into<String>) -> Result<Self> {
        spec.ensure_inputs(1)?;
        spec.ensure_outputs(1)?;
        Ok(Self {
            spec,
            tag: tag.into(),
        })
    }
}

impl Node for AppendTagNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        let value: String = ws.get(&self.spec.inputs[0])?;
        ws.set(self.spec.outputs[0].as_str(), format!("{value}{}", self.tag));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weft_core::WeftError;

    #[test]
    fn appends_the_tag() {
        let node = AppendTagNode::from_config(&json!({
            "name": "label",
            "inputs": ["raw"],
            "outputs": ["labeled"],
            "params": { "tag": "_done" },
        }))
        .unwrap();

        let ws = Workspace::new();
        ws.set("raw", String::from("batch"));
        node.execute(&ws).unwrap();
        assert_eq!(ws.get::<String>("labeled").unwrap(), "batch_done");
    }

    #[test]
    fn tag_param_is_required() {
        let err = AppendTagNode::from_config(&json!({
            "name": "label",
            "inputs": ["raw"],
            "outputs": ["labeled"],
        }))
        .unwrap_err();
        assert!(matches!(err, WeftError::ConfigField { field, .. } if field == "params.tag"));
    }

    #[test]
    fn non_string_input_is_a_type_mismatch() {
        let node = AppendTagNode::from_config(&json!({
            "name": "label",
            "inputs": ["raw"],
            "outputs": ["labeled"],
            "params": { "tag": "_x" },
        }))
        .unwrap();

        let ws = Workspace::new();
        ws.set("raw", 1_i64);
        let err = node.execute(&ws).unwrap_err();
        assert!(matches!(err, WeftError::StoreTypeMismatch { .. }));
    }
}

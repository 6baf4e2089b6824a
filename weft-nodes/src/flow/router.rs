//! Threshold-based control routing.

use crate::params;
use weft_core::{log_debug, ControlSignal, Node, NodeSpec, Result, Workspace};

/// Routes a control signal by comparing an integer input to a threshold.
///
/// A [`ControlSignal`] is written to the first output when the input
/// exceeds the threshold, to the second output otherwise. Exactly one
/// branch becomes live per execution; the other is pruned downstream.
///
/// Params: `threshold` (optional integer, default 0).
#[derive(Debug)]
pub struct ThresholdRouterNode {
    spec: NodeSpec,
    threshold: i64,
}

impl ThresholdRouterNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let spec = NodeSpec::from_config(config)?;
        let threshold = params::i64_or(config, &spec.name, "threshold", 0)?;
        Self::new(spec, threshold)
    }

    /// Build from a spec and threshold.
    pub fn new(spec: NodeSpec, threshold: i64) -> Result<Self> {
        spec.ensure_inputs(1)?;
        spec.ensure_outputs(2)?;
        Ok(Self { spec, threshold })
    }
}

impl Node for ThresholdRouterNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        let value: i64 = ws.get(&self.spec.inputs[0])?;
        let route = if value > self.threshold {
            &self.spec.outputs[0]
        } else {
            &self.spec.outputs[1]
        };
        log_debug!(
            "router '{}': {} -> '{}'",
            self.spec.name,
            value,
            route
        );
        ws.set(route.as_str(), ControlSignal);
        Ok(())
    }
}

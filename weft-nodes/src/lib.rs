//! Built-in node types for weft.
//!
//! Every node here is constructible from JSON configuration through the
//! node-type registry, so configuration-driven graphs get a usable standard
//! library out of the box:
//!
//! | type | behavior |
//! |------|----------|
//! | `constant` | writes a configured JSON value |
//! | `offset` | integer input plus a configured offset |
//! | `scale` | integer input times a configured factor |
//! | `append_tag` | string input with a configured suffix |
//! | `threshold_router` | routes a control signal by comparing against a threshold |
//! | `first_present` | copies the first bound input key |
//! | `subgraph` | runs a nested graph against a private workspace |
//!
//! Call [`register_builtin_nodes`] once during startup before loading graph
//! files that use these types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod flow;
mod params;
pub mod subgraph;

pub use data::{AppendTagNode, ConstantNode, OffsetNode, ScaleNode};
pub use flow::{FirstPresentNode, ThresholdRouterNode};
pub use subgraph::SubgraphNode;

use std::sync::Arc;
use weft_core::Node;
use weft_engine::NodeRegistry;

/// Register every built-in node type against the global registry.
///
/// Safe to call more than once: already-registered types are left alone.
pub fn register_builtin_nodes() {
    register_into(NodeRegistry::global());
}

/// Register every built-in node type against an explicit registry.
pub fn register_into(registry: &NodeRegistry) {
    registry.register("constant", |config| {
        Ok(Arc::new(ConstantNode::from_config(config)?) as Arc<dyn Node>)
    });
    registry.register("offset", |config| {
        Ok(Arc::new(OffsetNode::from_config(config)?) as Arc<dyn Node>)
    });
    registry.register("scale", |config| {
        Ok(Arc::new(ScaleNode::from_config(config)?) as Arc<dyn Node>)
    });
    registry.register("append_tag", |config| {
        Ok(Arc::new(AppendTagNode::from_config(config)?) as Arc<dyn Node>)
    });
    registry.register("threshold_router", |config| {
        Ok(Arc::new(ThresholdRouterNode::from_config(config)?) as Arc<dyn Node>)
    });
    registry.register("first_present", |config| {
        Ok(Arc::new(FirstPresentNode::from_config(config)?) as Arc<dyn Node>)
    });
    registry.register("subgraph", |config| {
        Ok(Arc::new(SubgraphNode::from_config(config)?) as Arc<dyn Node>)
    });
}

//! Weft Execution Engine
//!
//! Runs dataflow graphs: every reachable node exactly once, in dependency
//! order, across a fixed pool of worker threads, with conditional pruning
//! via control signals and fail-fast error propagation.
//!
//! # Architecture
//!
//! - [`graph::Graph`] holds the node set and is the run entry point
//! - [`planner::ExecutionPlan`] derives successor lists and in-degrees
//! - [`scheduler`] dispatches ready nodes and drives completion
//! - [`pool::WorkerPool`] executes submitted tasks FIFO on OS threads
//! - [`profiler::Profiler`] collects per-node timings
//! - [`registry::NodeRegistry`] + [`loader::GraphLoader`] build graphs from
//!   JSON documents
//!
//! # Example
//!
//! ```
//! use weft_core::prelude::*;
//! use weft_engine::graph::Graph;
//!
//! let mut graph = Graph::new("pipeline");
//! graph.add_node(FnNode::new(
//!     NodeSpec::new("add_one").with_inputs(["input"]).with_outputs(["output"]),
//!     |ws| {
//!         let input: i64 = ws.get("input")?;
//!         ws.set("output", input + 1);
//!         Ok(())
//!     },
//! ));
//!
//! let ws = Workspace::new();
//! ws.set("input", 41_i64);
//! graph.run(&ws, 2, false).unwrap();
//! assert_eq!(ws.get::<i64>("output").unwrap(), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod loader;
pub mod planner;
pub mod pool;
pub mod profiler;
pub mod registry;
mod scheduler;

pub use graph::Graph;
pub use loader::GraphLoader;
pub use planner::ExecutionPlan;
pub use pool::{PoolHandle, WorkerPool};
pub use profiler::{ProfileRecord, Profiler};
pub use registry::NodeRegistry;

//! Hierarchical composition: a node that runs a nested graph.

use crate::params;
use std::path::{Path, PathBuf};
use weft_core::{log_debug, Node, NodeSpec, Result, Workspace};
use weft_engine::GraphLoader;

/// Runs a nested graph, loaded from its own JSON document, against a
/// private workspace.
///
/// The boundary contract: each declared input key is copied from the parent
/// workspace into the private one before the inner run, and each declared
/// output key is copied back afterwards. Nothing else crosses the boundary
/// and inner intermediate keys never leak into the parent. The node blocks
/// until the inner run completes, and an inner failure propagates as this
/// node's failure.
///
/// Params: `config_path` (required string), `num_threads` (optional
/// integer, default: hardware concurrency). The inner run never profiles,
/// so nested runs cannot interleave their reports.
///
/// A relative `config_path` resolves against the directory of the document
/// the node was loaded from (the loader stamps it as `config_dir`); for
/// graphs built directly from a JSON value it resolves against the process
/// working directory.
#[derive(Debug)]
pub struct SubgraphNode {
    spec: NodeSpec,
    config_path: PathBuf,
    num_threads: usize,
}

impl SubgraphNode {
    /// Build from JSON configuration.
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let spec = NodeSpec::from_config(config)?;
        let mut config_path =
            PathBuf::from(params::required_str(config, &spec.name, "config_path")?);
        if config_path.is_relative() {
            if let Some(dir) = config.get("config_dir").and_then(serde_json::Value::as_str) {
                config_path = Path::new(dir).join(config_path);
            }
        }
        let num_threads = match params::i64_or(config, &spec.name, "num_threads", 0)? {
            0 => default_threads(),
            n => n.max(1) as usize,
        };
        Ok(Self {
            spec,
            config_path,
            num_threads,
        })
    }

    /// Build from a spec, nested graph path and thread count.
    pub fn new(spec: NodeSpec, config_path: impl Into<PathBuf>, num_threads: usize) -> Self {
        Self {
            spec,
            config_path: config_path.into(),
            num_threads: num_threads.max(1),
        }
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

impl Node for SubgraphNode {
    fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    fn execute(&self, ws: &Workspace) -> Result<()> {
        log_debug!(
            "entering subgraph '{}' from {}",
            self.spec.name,
            self.config_path.display()
        );

        let inner_ws = Workspace::new();
        for input in &self.spec.inputs {
            inner_ws.set_any(input.as_str(), ws.get_any(input)?);
        }

        let graph = GraphLoader::from_file(&self.config_path)?;
        graph.run(&inner_ws, self.num_threads, false)?;

        for output in &self.spec.outputs {
            ws.set_any(output.as_str(), inner_ws.get_any(output)?);
        }

        log_debug!("exiting subgraph '{}'", self.spec.name);
        Ok(())
    }
}

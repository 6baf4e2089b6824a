//! Derives an execution plan from a node set.
//!
//! The plan is two maps: `successors[name]` (who becomes closer to ready
//! when `name` terminates) and `in_degree[name]` (how many internal edges
//! must resolve first). Control inputs are ordinary edges for planning
//! purposes; what distinguishes them is the presence probe at readiness
//! time, which the scheduler performs.
//!
//! Keys nobody in the graph produces are external inputs: they contribute
//! no edge and are expected to be in the workspace when the run starts.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weft_core::{Node, Result, WeftError};

/// Per-run scheduling state derived from a graph.
///
/// The successor lists are immutable; the in-degree cells are atomic
/// counters consumed (decremented) as the run progresses, so a fresh plan
/// is built for every run.
#[derive(Debug)]
pub struct ExecutionPlan {
    successors: HashMap<String, Vec<String>>,
    in_degree: HashMap<String, AtomicUsize>,
    roots: Vec<String>,
    total: usize,
}

impl ExecutionPlan {
    /// Build a plan for `nodes`.
    ///
    /// Fails with [`WeftError::DuplicateProducer`] when two nodes declare
    /// the same output key, and with [`WeftError::CycleOrNoEntry`] when a
    /// non-empty graph has no zero-in-degree node, which is both the
    /// detectable-cycle case and the degenerate no-entry case.
    pub fn build(nodes: &BTreeMap<String, Arc<dyn Node>>) -> Result<Self> {
        let mut producer: HashMap<&str, &str> = HashMap::new();
        for (name, node) in nodes {
            for output in &node.spec().outputs {
                if let Some(first) = producer.get(output.as_str()) {
                    return Err(WeftError::DuplicateProducer {
                        key: output.clone(),
                        first: (*first).to_string(),
                        second: name.clone(),
                    });
                }
                producer.insert(output, name);
            }
        }

        let mut successors: HashMap<String, Vec<String>> = HashMap::new();
        let mut counts: BTreeMap<&str, usize> = nodes.keys().map(|n| (n.as_str(), 0)).collect();
        for (name, node) in nodes {
            let spec = node.spec();
            for key in spec.inputs.iter().chain(spec.control_inputs.iter()) {
                if let Some(producer_name) = producer.get(key.as_str()) {
                    successors
                        .entry((*producer_name).to_string())
                        .or_default()
                        .push(name.clone());
                    *counts.get_mut(name.as_str()).expect("node indexed above") += 1;
                }
            }
        }

        let roots: Vec<String> = counts
            .iter()
            .filter(|&(_, count)| *count == 0)
            .map(|(name, _)| (*name).to_string())
            .collect();
        if !nodes.is_empty() && roots.is_empty() {
            return Err(WeftError::CycleOrNoEntry);
        }

        let in_degree = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), AtomicUsize::new(count)))
            .collect();

        Ok(Self {
            successors,
            in_degree,
            roots,
            total: nodes.len(),
        })
    }

    /// Nodes with no internal dependencies, in name order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Total node count the plan covers.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Successors of `name`, in edge insertion order. A node consuming two
    /// outputs of the same producer appears twice.
    pub fn successors(&self, name: &str) -> &[String] {
        self.successors
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Atomically consume one incoming edge of `name`, returning the number
    /// of edges still outstanding. Exactly one caller observes zero per
    /// node, and that caller alone dispatches it.
    pub fn decrement(&self, name: &str) -> usize {
        let cell = self
            .in_degree
            .get(name)
            .expect("plan covers every graph node");
        cell.fetch_sub(1, Ordering::AcqRel) - 1
    }

    /// Current in-degree of `name`.
    pub fn in_degree(&self, name: &str) -> usize {
        self.in_degree
            .get(name)
            .map(|cell| cell.load(Ordering::Acquire))
            .unwrap_or(0)
    }
}

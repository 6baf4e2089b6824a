//! The graph: a named set of nodes and the run entry point.

use crate::planner::ExecutionPlan;
use crate::scheduler;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::Arc;
use weft_core::{Node, Result, Workspace};

/// A dataflow graph: nodes keyed by name, fixed for the duration of a run.
///
/// Edges are implicit: a node consuming a key another node produces
/// depends on it. The graph itself is never mutated by a run; all run-time
/// bookkeeping lives in a per-run [`ExecutionPlan`].
#[derive(Debug)]
pub struct Graph {
    name: String,
    nodes: BTreeMap<String, Arc<dyn Node>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeMap::new(),
        }
    }

    /// Graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a node. Map semantics: a node with an already-present name
    /// replaces the earlier one.
    pub fn add_node<N: Node + 'static>(&mut self, node: N) {
        self.add_shared(Arc::new(node));
    }

    /// Add an already-shared node.
    pub fn add_shared(&mut self, node: Arc<dyn Node>) {
        self.nodes.insert(node.spec().name.clone(), node);
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(name)
    }

    /// Node names in sorted order.
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Check that a plan can be derived: no duplicate producers, at least
    /// one entry point. Performed implicitly by [`Graph::run`].
    pub fn validate(&self) -> Result<()> {
        ExecutionPlan::build(&self.nodes).map(|_| ())
    }

    /// Run every reachable node exactly once against `ws`.
    ///
    /// `num_threads` is coerced up to one. With `profiling` enabled a
    /// timing report is printed after the run, including a partial one
    /// before a failure is returned. An empty graph returns immediately.
    pub fn run(&self, ws: &Workspace, num_threads: usize, profiling: bool) -> Result<()> {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let plan = ExecutionPlan::build(&self.nodes)?;
        scheduler::execute(&self.name, &self.nodes, plan, ws, num_threads, profiling)
    }

    /// Render the dependency tree reachable from the plan's roots.
    ///
    /// Children are indented under their producer; a node reached along a
    /// second path is printed with a `(...)` marker and not descended into
    /// again.
    pub fn render_tree(&self) -> Result<String> {
        let plan = ExecutionPlan::build(&self.nodes)?;
        let mut out = String::new();
        let _ = writeln!(out, "graph '{}'", self.name);
        let mut visited = BTreeSet::new();
        for root in plan.roots() {
            render_subtree(&plan, root, 1, &mut visited, &mut out);
        }
        Ok(out)
    }

    /// Print the dependency tree to standard output.
    pub fn print(&self) -> Result<()> {
        print!("{}", self.render_tree()?);
        Ok(())
    }
}

fn render_subtree(
    plan: &ExecutionPlan,
    name: &str,
    depth: usize,
    visited: &mut BTreeSet<String>,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    if !visited.insert(name.to_string()) {
        let _ = writeln!(out, "{indent}{name} (...)");
        return;
    }
    let _ = writeln!(out, "{indent}{name}");
    for successor in plan.successors(name) {
        render_subtree(plan, successor, depth + 1, visited, out);
    }
}

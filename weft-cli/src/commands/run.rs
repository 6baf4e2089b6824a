//! `weft run` - execute a graph file.

use anyhow::{Context, Result};
use weft_core::{AnyValue, ControlSignal, Workspace};
use weft_engine::GraphLoader;

/// Load `file`, seed the workspace from `inputs`, run, and print every
/// declared output that exists afterwards.
pub fn run(file: &str, threads: Option<usize>, profile: bool, inputs: &[String]) -> Result<()> {
    let graph = GraphLoader::from_file(file)?;

    let ws = Workspace::new();
    for pair in inputs {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("input '{pair}' is not of the form KEY=JSON"))?;
        // Bare words that are not valid JSON are taken as strings, so
        // `--input name=alice` works without shell-quoted JSON.
        let value: serde_json::Value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        ws.set_json(key, &value);
    }

    let threads = threads.unwrap_or_else(default_threads);
    graph.run(&ws, threads, profile)?;

    for name in graph.node_names() {
        if let Some(node) = graph.node(name) {
            for output in &node.spec().outputs {
                if ws.has(output) {
                    println!("{output} = {}", render(&ws.get_any(output)?));
                }
            }
        }
    }
    Ok(())
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

fn render(value: &AnyValue) -> String {
    if let Some(v) = value.downcast_ref::<i64>() {
        v.to_string()
    } else if let Some(v) = value.downcast_ref::<f64>() {
        v.to_string()
    } else if let Some(v) = value.downcast_ref::<bool>() {
        v.to_string()
    } else if let Some(v) = value.downcast_ref::<String>() {
        v.clone()
    } else if let Some(v) = value.downcast_ref::<serde_json::Value>() {
        v.to_string()
    } else if value.is::<ControlSignal>() {
        "<control signal>".to_string()
    } else {
        format!("<{}>", value.type_name())
    }
}

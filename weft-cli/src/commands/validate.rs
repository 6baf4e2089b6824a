//! `weft validate` - load and plan a graph file without running it.

use anyhow::Result;
use weft_engine::GraphLoader;

/// Report whether `file` loads and plans cleanly.
pub fn run(file: &str) -> Result<()> {
    let graph = GraphLoader::from_file(file)?;
    graph.validate()?;
    println!("ok: graph '{}' with {} node(s)", graph.name(), graph.len());
    Ok(())
}

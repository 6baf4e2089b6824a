//! `weft print` - show a graph file's dependency tree.

use anyhow::Result;
use weft_engine::GraphLoader;

/// Print the dependency tree reachable from the graph's roots.
pub fn run(file: &str) -> Result<()> {
    let graph = GraphLoader::from_file(file)?;
    print!("{}", graph.render_tree()?);
    Ok(())
}

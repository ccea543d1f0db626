//! Print the compiled graph

use crate::parser;
use anyhow::Context;

/// Compile `source` and render its reachable nodes with their edges
pub fn run_graph(source: &str) -> anyhow::Result<String> {
    let script = parser::compile_str(source).context("Failed to compile script")?;
    Ok(script.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_lists_reachable_nodes() {
        let output = run_graph("<scene>Forest\n<A>Hello\n<END>").unwrap();
        assert_eq!(output.lines().count(), 4);
        assert!(output.lines().next().unwrap().starts_with("#0"));
    }
}

//! Placeholder removal
//!
//! Every edge pointing at a `Dead` or `Empty` node is
//! replaced by that node's own successors, in place.

use crate::types::script::{NodeId, Script};

/// Splice all placeholders out of the graph reachable from the root
pub fn fix_up(script: &mut Script) {
    let mut visited = vec![false; script.len()];
    let mut stack = vec![script.root()];
    let mut spliced = 0usize;

    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut visited[id.index()], true) {
            continue;
        }
        spliced += splice_successors(script, id);
        stack.extend(script.successors(id).iter().rev());
    }

    log::debug!(
        target: "katari::parser",
        "fix-up spliced {} placeholder edges",
        spliced
    );
}

/// Normalise the edge list of `id`; returns how many edges were replaced
fn splice_successors(script: &mut Script, id: NodeId) -> usize {
    let mut count = 0;
    let mut position = 0;
    while let Some(&child) = script.successors(id).get(position) {
        if script.node(child).is_placeholder() {
            let replacement = script.successors(child).to_vec();
            script
                .successors_mut(id)
                .splice(position..=position, replacement);
            count += 1;
        } else {
            position += 1;
        }
    }
    count
}

/// Whether any placeholder is still reachable
pub fn has_placeholders(script: &Script) -> bool {
    script
        .reachable()
        .into_iter()
        .any(|id| script.node(id).is_placeholder())
}

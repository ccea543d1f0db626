//! Flow analysis implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::script::{Node, Script};
use std::collections::{BTreeMap, HashSet};

/// Check flow issues (unreachable nodes, options nothing branches on)
pub fn check(script: &Script, result: &mut LintResult, config: &LintConfig) {
    if config.flow.check_unreachable {
        check_unreachable(script, result);
    }

    if config.flow.check_unused_options {
        check_unused_options(script, result);
    }
}

/// Report compiled nodes that no path from the root reaches
fn check_unreachable(script: &Script, result: &mut LintResult) {
    let reachable: HashSet<_> = script.reachable().into_iter().collect();

    for id in script.ids() {
        let node = script.node(id);
        if reachable.contains(&id) || node.is_placeholder() || matches!(node, Node::Start) {
            continue;
        }
        result.add_issue(LintIssue {
            level: LintLevel::Warning,
            message: format!("Unreachable {}: {}", node.kind_name(), node),
            line: script.line(id),
            category: "flow".to_string(),
        });
    }
}

/// Report presented options whose answer no choices block ever reads
fn check_unused_options(script: &Script, result: &mut LintResult) {
    let reachable = script.reachable();

    let used: HashSet<&str> = reachable
        .iter()
        .filter_map(|&id| match script.node(id) {
            Node::Choice { guards } => Some(guards),
            _ => None,
        })
        .flatten()
        .map(|guard| guard.option.as_str())
        .collect();

    // First definition per name, in name order
    let mut options: BTreeMap<&str, usize> = BTreeMap::new();
    for &id in &reachable {
        if let Node::Option { name, .. } = script.node(id) {
            options.entry(name.as_str()).or_insert(script.line(id));
        }
    }

    for (name, line) in options {
        if !used.contains(name) {
            result.add_issue(LintIssue {
                level: LintLevel::Info,
                message: format!("Option '{}' is never used by a choices block", name),
                line,
                category: "flow".to_string(),
            });
        }
    }
}

//! Reference integrity checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::script::{Node, Script};
use std::collections::HashMap;

/// Check guards against the options they refer to
pub fn check(script: &Script, result: &mut LintResult, config: &LintConfig) {
    // Option name -> (choice count, line) of its first definition
    let mut options: HashMap<&str, (usize, usize)> = HashMap::new();
    for id in script.reachable() {
        let Node::Option { name, choices } = script.node(id) else {
            continue;
        };
        let line = script.line(id);
        match options.get(name.as_str()) {
            Some(&(_, first)) if config.references.check_duplicates => {
                result.add_issue(LintIssue {
                    level: LintLevel::Info,
                    message: format!(
                        "Option '{}' is redefined; the first definition is at line {}",
                        name, first
                    ),
                    line,
                    category: "references".to_string(),
                });
            }
            Some(_) => {}
            None => {
                options.insert(name.as_str(), (choices.len(), line));
            }
        }
    }

    if config.references.check_thresholds {
        check_thresholds(script, &options, result);
    }
}

fn check_thresholds(
    script: &Script,
    options: &HashMap<&str, (usize, usize)>,
    result: &mut LintResult,
) {
    for id in script.reachable() {
        let Node::Choice { guards } = script.node(id) else {
            continue;
        };
        for guard in guards {
            // Options that are never presented are reported by the flow check
            let Some(&(count, _)) = options.get(guard.option.as_str()) else {
                continue;
            };
            if guard.threshold as usize > count {
                result.add_issue(LintIssue {
                    level: LintLevel::Error,
                    message: format!(
                        "Branch <{}> can never match: option '{}' has {} choices",
                        guard, guard.option, count
                    ),
                    line: script.line(id),
                    category: "references".to_string(),
                });
            }
        }
    }
}

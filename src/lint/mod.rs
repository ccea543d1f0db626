//! Lint module for dialogue script quality checking
//!
//! Runs static checks over a compiled [`Script`]:
//! - Reference checks (guards against option definitions)
//! - Flow analysis (unreachable nodes, options nobody branches on)

use crate::types::script::Script;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: must be fixed
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

/// A lint issue found in the script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Source line (1-indexed, 0 when synthesized)
    pub line: usize,
    /// Category of the issue
    pub category: String,
}

/// Result of linting a script
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found, ordered by line
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Lint a script with default configuration
pub fn lint(script: &Script) -> LintResult {
    let config = config::LintConfig::default();
    lint_with_config(script, &config)
}

/// Lint a script with custom configuration
pub fn lint_with_config(script: &Script, config: &config::LintConfig) -> LintResult {
    let mut result = LintResult::new();

    if config.references.enabled {
        checks::references::check(script, &mut result, config);
    }

    if config.flow.enabled {
        checks::flow::check(script, &mut result, config);
    }

    result.issues.sort_by_key(|issue| issue.line);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::compile_str;

    #[test]
    fn lint_linear_script_is_clean() {
        let script = compile_str("<scene>Forest\n<A>Hello\n<END>").unwrap();
        let result = lint(&script);

        assert!(result.is_clean());
        assert_eq!(result.error_count, 0);
        assert_eq!(result.warning_count, 0);
    }

    #[test]
    fn lint_branching_script_is_clean() {
        let script = compile_str(
            r#"
<option>pick
<a>Left
<b>Right
</>
<choices>
<pick,1>
<A>Left it is.
<//>
<pick,2>
<//>
</>
<A>Onwards.
"#,
        )
        .unwrap();

        assert!(lint(&script).is_clean());
    }

    #[test]
    fn lint_counts_by_level() {
        let mut result = LintResult::new();
        result.add_issue(LintIssue {
            level: LintLevel::Warning,
            message: "w".to_string(),
            line: 1,
            category: "flow".to_string(),
        });
        result.add_issue(LintIssue {
            level: LintLevel::Info,
            message: "i".to_string(),
            line: 2,
            category: "flow".to_string(),
        });
        assert_eq!(result.warning_count, 1);
        assert_eq!(result.info_count, 1);
        assert!(!result.has_errors());
        assert!(!result.is_clean());
    }

    #[test]
    fn disabled_sections_report_nothing() {
        let script = compile_str(
            "<option>pick\n<a>A\n</>\n<choices>\n<pick,1>\n<END>\n</>\n<A>lost",
        )
        .unwrap();
        let mut config = config::LintConfig::default();
        config.flow.enabled = false;
        config.references.enabled = false;
        assert!(lint_with_config(&script, &config).is_clean());
    }
}

//! Compile and lint a script

use crate::{
    lint::{self, LintLevel, LintResult, config::LintConfig},
    parser,
};
use anyhow::Context;

/// Rendered lint report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub output: String,
    pub result: LintResult,
}

impl CheckReport {
    pub fn failed(&self) -> bool {
        self.result.has_errors()
    }
}

/// Compile `source` and run the lint checks selected by `config`
pub fn run_check(source: &str, config: &LintConfig) -> anyhow::Result<CheckReport> {
    let script = parser::compile_str(source).context("Failed to compile script")?;
    let result = lint::lint_with_config(&script, config);

    let mut output = String::new();
    for issue in &result.issues {
        let level = match issue.level {
            LintLevel::Error => "error",
            LintLevel::Warning => "warning",
            LintLevel::Info => "info",
        };
        output.push_str(&format!(
            "{}[{}] line {}: {}\n",
            level, issue.category, issue.line, issue.message
        ));
    }
    output.push_str(&format!(
        "{} nodes, {} errors, {} warnings, {} info\n",
        script.reachable().len(),
        result.error_count,
        result.warning_count,
        result.info_count
    ));

    Ok(CheckReport { output, result })
}

/// Load a lint configuration from JSON text
pub fn load_config(json: &str) -> anyhow::Result<LintConfig> {
    LintConfig::from_json(json).context("Invalid lint configuration")
}

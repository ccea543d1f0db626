//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// Reference checks configuration
    pub references: ReferencesConfig,
    /// Flow analysis configuration
    pub flow: FlowConfig,
}

impl LintConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Reference checking configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencesConfig {
    /// Enable reference checks
    pub enabled: bool,
    /// Check guards whose threshold exceeds the option's choice count
    pub check_thresholds: bool,
    /// Report option names defined by more than one option block
    pub check_duplicates: bool,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_thresholds: true,
            check_duplicates: true,
        }
    }
}

/// Flow analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Enable flow analysis
    pub enabled: bool,
    /// Report compiled nodes that no path reaches
    pub check_unreachable: bool,
    /// Report options that no choices block branches on
    pub check_unused_options: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_unreachable: true,
            check_unused_options: true,
        }
    }
}

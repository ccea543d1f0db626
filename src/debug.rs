//! Debug logging backend
//!
//! The library itself only talks to the `log` facade. This module provides a
//! small stderr logger for hosts (and the CLI) that want to see what the
//! parser and engine are doing.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Environment variable enabling debug output; its value may name a level
pub const DEBUG_ENV: &str = "KATARI_DEBUG";

/// Debug log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every step and resolution
    Trace,
    /// Development debugging information
    Debug,
    /// Important state changes
    Info,
    /// Potential issues
    Warn,
    /// Error situations
    Error,
}

impl LogLevel {
    fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Debug log category, derived from the record target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugCategory {
    /// Script compilation
    Parser,
    /// Engine lifecycle
    Engine,
    /// Control flow (choices, prompts, selections)
    Flow,
}

impl DebugCategory {
    fn of(target: &str) -> Self {
        if target.ends_with("parser") {
            DebugCategory::Parser
        } else if target.ends_with("flow") {
            DebugCategory::Flow
        } else {
            DebugCategory::Engine
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable debug logging
    pub enabled: bool,
    /// Minimum log level
    pub level: LogLevel,
    /// Enabled categories
    pub categories: HashSet<DebugCategory>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let value = std::env::var(DEBUG_ENV).ok();
        Self {
            enabled: value.is_some(),
            level: value
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(LogLevel::Debug),
            categories: HashSet::from([
                DebugCategory::Parser,
                DebugCategory::Engine,
                DebugCategory::Flow,
            ]),
        }
    }
}

impl DebugConfig {
    /// Configuration with output switched on at `level`
    pub fn enabled(level: LogLevel) -> Self {
        Self {
            enabled: true,
            level,
            ..Self::default()
        }
    }
}

/// Stderr logger honouring a [`DebugConfig`]
#[derive(Debug)]
pub struct DebugLogger {
    config: DebugConfig,
}

impl DebugLogger {
    pub fn new(config: DebugConfig) -> Self {
        Self { config }
    }

    fn format(&self, record: &Record<'_>) -> String {
        let category = format!("{:?}", DebugCategory::of(record.target()));
        format!("[{}] {:10} {}", record.level(), category, record.args())
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.config.enabled
            && metadata.level() <= self.config.level.filter()
            && self
                .config
                .categories
                .contains(&DebugCategory::of(metadata.target()))
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

/// Install a [`DebugLogger`] as the global logger
///
/// Fails if another logger is already installed.
pub fn init(config: DebugConfig) -> Result<(), SetLoggerError> {
    let max_level = if config.enabled {
        config.level.filter()
    } else {
        LevelFilter::Off
    };
    log::set_boxed_logger(Box::new(DebugLogger::new(config)))?;
    log::set_max_level(max_level);
    Ok(())
}

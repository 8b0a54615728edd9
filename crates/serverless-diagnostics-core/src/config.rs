// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::DiagnosticsError;
use hyper::header::HeaderValue;
use std::env;

const DEFAULT_LIST_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/bin"];
const DEFAULT_COMMANDS: &[&str] = &["df", "top -b -n 1"];

/// An external diagnostic tool and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Splits a command line on whitespace. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The command as it is shown in the report header.
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Configuration for the diagnostics handler
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
    /// Well-known directories listed after the environment section
    pub list_dirs: Vec<String>,
    /// External tools whose stdout is embedded in the report
    pub commands: Vec<CommandSpec>,
    /// Whether to embed `/proc/cpuinfo`
    pub include_cpuinfo: bool,
    /// Value of the optional `x-diagnostics-marker` response header
    pub marker_header: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            list_dirs: DEFAULT_LIST_DIRS.iter().map(|d| d.to_string()).collect(),
            commands: DEFAULT_COMMANDS
                .iter()
                .filter_map(|line| CommandSpec::parse(line))
                .collect(),
            include_cpuinfo: true,
            marker_header: None,
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, DiagnosticsError> {
        let defaults = Self::default();

        let log_level = env::var("DIAG_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or(defaults.log_level);
        let list_dirs = env::var("DIAG_LIST_DIRS")
            .map(|val| split_list(&val).map(str::to_string).collect())
            .unwrap_or(defaults.list_dirs);
        let commands = env::var("DIAG_COMMANDS")
            .map(|val| split_list(&val).filter_map(CommandSpec::parse).collect())
            .unwrap_or(defaults.commands);
        let include_cpuinfo = env::var("DIAG_INCLUDE_CPUINFO")
            .map(|val| val.to_lowercase() != "false")
            .unwrap_or(defaults.include_cpuinfo);
        let marker_header = env::var("DIAG_MARKER_HEADER")
            .ok()
            .filter(|val| !val.is_empty());

        let config = Self {
            log_level,
            list_dirs,
            commands,
            include_cpuinfo,
            marker_header,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DiagnosticsError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(DiagnosticsError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        if let Some(marker) = &self.marker_header {
            if HeaderValue::from_str(marker).is_err() {
                return Err(DiagnosticsError::InvalidConfig(format!(
                    "DIAG_MARKER_HEADER is not a valid header value: {marker:?}"
                )));
            }
        }

        Ok(())
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

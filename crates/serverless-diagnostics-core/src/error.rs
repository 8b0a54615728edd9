// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use nix::errno::Errno;
use std::io;

/// Errors that escape the handler or stop the function from starting.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build response: {0}")]
    Response(#[from] hyper::http::Error),
}

/// A single collection step that could not produce its value.
///
/// The `Display` output is the exact text embedded in the report, so every
/// variant reads as a complete sentence on its own line.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Cannot get current user: {0}")]
    CurrentUser(String),

    #[error("Cannot read working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error("{0}")]
    Uname(#[source] Errno),

    #[error("Cannot open: {source}")]
    OpenDirectory { source: io::Error },

    #[error("Cannot read directory: {source}")]
    ReadDirectory { source: io::Error },

    #[error("Cannot run {tool}: {source}")]
    Spawn { tool: String, source: io::Error },

    #[error("Cannot read {path}: {source}")]
    ReadFile { path: String, source: io::Error },
}

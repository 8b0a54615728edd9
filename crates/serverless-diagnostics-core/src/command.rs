// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! External diagnostic tools (`df`, `top`, ...) whose stdout is embedded in
//! the report.

use crate::config::CommandSpec;
use crate::error::CollectError;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured result of one tool run.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub status: ExitStatus,
}

/// Runs the tool to completion and captures its stdout.
///
/// Stdin is closed and stderr is discarded. A tool that starts but exits
/// non-zero is still `Ok`; its status is reported alongside the output.
pub async fn run(spec: &CommandSpec) -> Result<CommandOutput, CollectError> {
    debug!("Running {}", spec.display_line());
    let output = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|source| {
            warn!("Failed to run {}: {source}", spec.program);
            CollectError::Spawn {
                tool: spec.program.clone(),
                source,
            }
        })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        status: output.status,
    })
}

/// Runs the tool and renders its section: a `$ command` header, then the
/// captured stdout or the inline error.
pub async fn render(spec: &CommandSpec) -> String {
    let mut out = format!("$ {}\n", spec.display_line());
    match run(spec).await {
        Ok(output) => {
            out.push_str(&output.stdout);
            if !output.stdout.is_empty() && !output.stdout.ends_with('\n') {
                out.push('\n');
            }
            if !output.status.success() {
                out.push_str(&format!("{} exited with {}\n", spec.program, output.status));
            }
        }
        Err(err) => {
            out.push_str(&err.to_string());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(line: &str) -> CommandSpec {
        CommandSpec::parse(line).unwrap()
    }

    #[tokio::test]
    async fn test_captures_stdout_verbatim() {
        let output = run(&spec("echo hello   world")).await.unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, "hello world\n");
    }

    #[tokio::test]
    async fn test_missing_tool_is_inline_error() {
        let err = run(&spec("definitely-not-a-real-tool-xyz")).await.unwrap_err();
        assert!(matches!(err, CollectError::Spawn { .. }));

        let out = render(&spec("definitely-not-a-real-tool-xyz --flag")).await;
        assert!(out.starts_with("$ definitely-not-a-real-tool-xyz --flag\n"));
        assert!(out.contains("Cannot run definitely-not-a-real-tool-xyz: "));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_noted() {
        let out = render(&spec("false")).await;
        assert!(out.starts_with("$ false\n"));
        assert!(out.contains("false exited with"));
    }

    #[tokio::test]
    async fn test_render_terminates_output() {
        let out = render(&spec("printf abc")).await;
        assert_eq!(out, "$ printf abc\nabc\n");
    }
}

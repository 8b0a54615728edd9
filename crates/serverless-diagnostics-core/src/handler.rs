// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The invocation entry point: collect every section in order and wrap the
//! report in a response.
//!
//! Each step yields either its value or a [`CollectError`], and both are
//! rendered; nothing a step does can stop the steps after it.

use crate::{
    command,
    config::Config,
    environment,
    error::{CollectError, DiagnosticsError},
    kernel::KernelInfo,
    listing,
    report::Report,
    response::{create_report_response, DiagnosticResponse},
    runtime::{self, RuntimeFacts},
    sysfile,
};
use chrono::{DateTime, Utc};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn, Instrument};

pub const BANNER: &str = "Hello from Amazon λ!";

/// Rendered when the invocation carries no deadline.
pub const NO_DEADLINE: &str = "<none>";

/// Runtime-provided directory listed at the end of the directory section.
pub const LAMBDA_RUNTIME_DIR_ENV: &str = "LAMBDA_RUNTIME_DIR";

/// The per-call data taken from the trigger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub deadline: Option<DateTime<Utc>>,
}

impl InvocationContext {
    /// Builds a context from a deadline in milliseconds since the epoch, the
    /// form the Lambda runtime API uses. Zero means no deadline.
    #[must_use]
    pub fn from_deadline_ms(request_id: impl Into<String>, deadline_ms: u64) -> Self {
        let deadline = match deadline_ms {
            0 => None,
            ms => i64::try_from(ms)
                .ok()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
        };
        Self {
            request_id: request_id.into(),
            deadline,
        }
    }
}

/// Handles one invocation. Always produces a 200 response unless the
/// response itself cannot be constructed.
pub async fn handle(
    ctx: &InvocationContext,
    config: &Config,
) -> Result<DiagnosticResponse, DiagnosticsError> {
    let span = info_span!("invocation", request_id = %ctx.request_id);
    let body = async {
        info!("Building diagnostics report");
        let body = build_report(ctx, config).await.into_body();
        info!(bytes = body.len(), "Report built");
        body
    }
    .instrument(span)
    .await;

    let response = create_report_response(body, config.marker_header.as_deref())?;
    Ok(DiagnosticResponse::from(response))
}

/// Runs every collection step in order.
pub async fn build_report(ctx: &InvocationContext, config: &Config) -> Report {
    let mut report = Report::new();
    report.line(BANNER);

    write_runtime_facts(&mut report);
    write_user(&mut report, runtime::current_user());
    write_working_directory(
        &mut report,
        env::current_dir().map_err(CollectError::WorkingDirectory),
    );
    write_clock(&mut report, ctx, Utc::now());
    write_kernel(&mut report, KernelInfo::query());
    write_environment(&mut report, environment::process_vars());

    for dir in &config.list_dirs {
        report.line(format!("{dir}:"));
        report.block(&listing::render_directory(Path::new(dir)));
    }
    write_runtime_directory(&mut report, env::var(LAMBDA_RUNTIME_DIR_ENV).ok());

    for spec in &config.commands {
        report.block(&command::render(spec).await);
    }

    if config.include_cpuinfo {
        write_system_file(&mut report, Path::new(sysfile::PROC_CPUINFO_PATH));
    }

    report
}

fn write_runtime_facts(report: &mut Report) {
    let facts = RuntimeFacts::collect();
    report.field("Version", &facts.version);
    report.field("Arch", facts.arch);
    report.field("OS", facts.os);
    report.field("CPUs", facts.cpus);
    match facts.page_size {
        Some(size) => report.field("Pagesize", size),
        None => report.field("Pagesize", "unknown"),
    }
    report.field("PID", facts.pid);
    report.field("PPID", facts.ppid);
}

fn write_user(report: &mut Report, user: Result<runtime::UserIdentity, CollectError>) {
    let (uid, name) = match user {
        Ok(identity) => (identity.uid, identity.name),
        Err(err) => {
            warn!("{err}");
            report.error(&err);
            (nix::unistd::getuid().as_raw(), String::new())
        }
    };
    report.field("UID", format!("{uid} ({name:?})"));
}

fn write_working_directory(report: &mut Report, cwd: Result<PathBuf, CollectError>) {
    match cwd {
        Ok(cwd) => {
            report.field("Directory", cwd.display());
            report.block(&listing::render_directory(&cwd));
        }
        Err(err) => {
            warn!("{err}");
            report.error(&err);
        }
    }
}

fn write_clock(report: &mut Report, ctx: &InvocationContext, now: DateTime<Utc>) {
    report.field("Time", now);
    match ctx.deadline {
        Some(deadline) => report.field("Deadline", deadline),
        None => report.field("Deadline", NO_DEADLINE),
    }
    if !ctx.request_id.is_empty() {
        report.field("Request", &ctx.request_id);
    }
}

fn write_kernel(report: &mut Report, kernel: Result<KernelInfo, CollectError>) {
    match kernel {
        Ok(info) => {
            for (label, value) in info.fields() {
                report.field(label, value);
            }
        }
        Err(err) => {
            warn!("uname failed: {err}");
            report.field("Uname", err);
        }
    }
}

fn write_environment<I>(report: &mut Report, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    report.line("Environment:");
    let entries = environment::visible_entries(vars);
    debug!("Rendering {} environment variables", entries.len());
    for entry in entries {
        report.line(format!("   {entry}"));
    }
}

fn write_runtime_directory(report: &mut Report, runtime_dir: Option<String>) {
    match runtime_dir.filter(|dir| !dir.is_empty()) {
        Some(dir) => {
            report.line(format!("{dir}:"));
            report.block(&listing::render_directory(Path::new(&dir)));
        }
        None => report.line("No runtime directory"),
    }
}

fn write_system_file(report: &mut Report, path: &Path) {
    match sysfile::read(path) {
        Ok(contents) => {
            report.line(format!("{}:", path.display()));
            report.block(&contents);
        }
        Err(err) => {
            warn!("{err}");
            report.error(&err);
        }
    }
}

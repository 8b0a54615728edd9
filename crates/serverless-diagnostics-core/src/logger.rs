// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Log line formatter for the diagnostics function.
//!
//! Every line is prefixed so the handler's own logs stand out from runtime
//! and platform logs in the same log stream:
//!
//! ```text
//! DIAGNOSTICS | INFO | invocation{request_id=8476a536}: Report built bytes=5120
//! DIAGNOSTICS | WARN | Failed to run top: No such file or directory (os error 2)
//! ```

use std::fmt;
use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::{
    format::{self, FormatEvent, FormatFields},
    FmtContext, FormattedFields,
};
use tracing_subscriber::registry::LookupSpan;

pub const LOG_PREFIX: &str = "DIAGNOSTICS";

/// Event formatter producing `DIAGNOSTICS | LEVEL | [spans: ]message fields`.
///
/// Lambda forwards function stdout to the log group as-is, so the prefix is
/// what lets a log query pick the handler's lines out of runtime output.
///
/// # Format Structure
///
/// 1. **Prefix**: always [`LOG_PREFIX`]
/// 2. **Level**: ERROR, WARN, INFO, DEBUG or TRACE
/// 3. **Span Context**: every active span from the root, with its fields in
///    braces when it has any
/// 4. **Message and Fields**: rendered by the subscriber's field formatter
///
/// Install it with `SubscriberBuilder::event_format`; set `with_ansi(false)`
/// before that call, since the builder only exposes ANSI control while the
/// default formatter is still in place.
#[derive(Debug, Clone, Copy)]
pub struct Formatter;

impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        // "DIAGNOSTICS | LEVEL | "
        write!(&mut writer, "{LOG_PREFIX} | {} | ", event.metadata().level())?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;

                // Stored in the span's extensions by the fmt layer at `new_span`
                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

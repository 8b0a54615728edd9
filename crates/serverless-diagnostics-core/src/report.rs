// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Append-only text buffer for one diagnostics report.

use crate::error::CollectError;
use std::fmt::{Display, Write};

/// Width of the label column, e.g. `"Version:   "`.
const LABEL_WIDTH: usize = 11;

/// The report under construction.
///
/// Lines are only ever appended; the buffer is handed off as the response
/// body by [`Report::into_body`].
#[derive(Debug, Default)]
pub struct Report {
    buf: String,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` followed by a newline.
    pub fn line(&mut self, text: impl Display) {
        // Writing into a String cannot fail
        let _ = writeln!(self.buf, "{text}");
    }

    /// Appends a `Label:      value` line with the value aligned to the label column.
    pub fn field(&mut self, label: &str, value: impl Display) {
        let label = format!("{label}:");
        let _ = writeln!(self.buf, "{label:<LABEL_WIDTH$} {value}");
    }

    /// Appends the inline rendering of a failed step.
    pub fn error(&mut self, err: &CollectError) {
        self.line(err);
    }

    /// Appends a block of text verbatim, terminating it with a newline if it
    /// does not already end with one.
    pub fn block(&mut self, text: &str) {
        self.buf.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_body(self) -> String {
        self.buf
    }
}

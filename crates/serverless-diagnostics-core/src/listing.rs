// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Directory listings laid out in fixed columns, column-major.
//!
//! ```text
//! bootstrap  handler    layer      runtime    var
//! ```
//!
//! Names are sorted, then read down each column before moving right. With
//! `n` names there are `ceil(n / COLUMNS)` rows, and cells past the end are
//! simply omitted, so short columns only ever lose trailing cells.

use crate::error::CollectError;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Number of columns per listing.
pub const COLUMNS: usize = 5;

/// Rendered in place of an empty listing.
pub const EMPTY_LISTING: &str = "(none)";

/// Reads every entry name in `path`, sorted ascending.
pub fn read_names(path: &Path) -> Result<Vec<String>, CollectError> {
    let entries = fs::read_dir(path).map_err(|source| CollectError::OpenDirectory { source })?;
    let names = collect_names(
        entries.map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned())),
    )?;

    debug!("Number of files in {} is {}", path.display(), names.len());
    Ok(names)
}

/// Drains directory entries into a sorted name list. The first failed entry
/// aborts the listing.
fn collect_names<I>(entries: I) -> Result<Vec<String>, CollectError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut names = entries
        .into_iter()
        .collect::<io::Result<Vec<String>>>()
        .map_err(|source| CollectError::ReadDirectory { source })?;
    names.sort();
    Ok(names)
}

/// Lays out sorted names in [`COLUMNS`] columns, column-major.
///
/// Every cell but the last one on its row is padded to the longest name and
/// followed by one space. Each row ends with a newline.
#[must_use]
pub fn format_columns(names: &[String]) -> String {
    if names.is_empty() {
        return format!("{EMPTY_LISTING}\n");
    }

    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let rows = names.len().div_ceil(COLUMNS);

    let mut out = String::new();
    for row in 0..rows {
        let cells: Vec<&str> = (0..COLUMNS)
            .filter_map(|col| names.get(col * rows + row))
            .map(String::as_str)
            .collect();
        let last = cells.len().saturating_sub(1);
        for (i, cell) in cells.iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{cell:<width$} "));
            }
        }
        out.push('\n');
    }
    out
}

/// Reads and formats one directory. Failures come back as the inline error
/// line, indented like the listing it replaces.
#[must_use]
pub fn render_directory(path: &Path) -> String {
    match read_names(path) {
        Ok(names) => format_columns(&names),
        Err(err) => {
            debug!("Could not list {}: {err}", path.display());
            format!("   {err}\n")
        }
    }
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Environment variable section with credential redaction.

use std::env;

/// Name fragments that mark a variable as a credential. Matching is
/// case-sensitive and applies to the name only.
const REDACTED_NAME_FRAGMENTS: &[&str] = &["_KEY", "_TOKEN"];

/// True if the variable must be left out of the report.
#[must_use]
pub fn is_redacted(name: &str) -> bool {
    REDACTED_NAME_FRAGMENTS
        .iter()
        .any(|fragment| name.contains(fragment))
}

/// Returns `name=value` lines for every variable that is not redacted,
/// sorted by name.
pub fn visible_entries<I>(vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut vars: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(name, _)| !is_redacted(name))
        .collect();
    vars.sort();
    vars.into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect()
}

/// Snapshot of the process environment. Names or values that are not valid
/// UTF-8 are converted lossily instead of panicking.
pub fn process_vars() -> impl Iterator<Item = (String, String)> {
    env::vars_os().map(|(name, value)| {
        (
            name.to_string_lossy().into_owned(),
            value.to_string_lossy().into_owned(),
        )
    })
}

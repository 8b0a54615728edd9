// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::CollectError;
use std::fs;
use std::path::Path;

/// CPU model, flags and per-core details.
pub const PROC_CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Reads a system file verbatim.
pub fn read(path: &Path) -> Result<String, CollectError> {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| CollectError::ReadFile {
            path: path.display().to_string(),
            source,
        })
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Build script for serverless-diagnostics-core.
//!
//! Embeds two build-time constants used by the runtime facts section of the
//! report:
//!
//! - `DIAGNOSTICS_RUSTC_VERSION`: output of `rustc --version` for the compiler
//!   that built this crate (the Rust counterpart of an interpreter version).
//! - `BUILD_TIMESTAMP`: RFC3339 timestamp of the build.

use std::env;
use std::process::Command;

fn main() {
    // Cargo always points RUSTC at the compiler driving this build
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=DIAGNOSTICS_RUSTC_VERSION={version}");

    let now = chrono::Utc::now();
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", now.to_rfc3339());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Host and process diagnostics for serverless functions.
//!
//! Each invocation produces one plain-text report describing the sandbox it
//! ran in: runtime and process facts, the invoking user, kernel
//! identification, the (redacted) environment, directory listings, and the
//! output of a few inspection tools. Collection is best-effort; a step that
//! fails is reported inline and the rest of the report is still produced.
//!
//! ```rust,ignore
//! use serverless_diagnostics_core::{handle, Config, InvocationContext};
//!
//! let config = Config::from_env()?;
//! let ctx = InvocationContext::from_deadline_ms("8476a536", deadline_ms);
//! let response = handle(&ctx, &config).await?;
//! assert_eq!(response.status_code, 200);
//! ```

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod handler;
pub mod kernel;
pub mod listing;
pub mod logger;
pub mod report;
pub mod response;
pub mod runtime;
pub mod sysfile;

pub use config::{CommandSpec, Config};
pub use error::{CollectError, DiagnosticsError};
pub use handler::{build_report, handle, InvocationContext};
pub use response::DiagnosticResponse;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

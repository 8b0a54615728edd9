// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Process and runtime facts: compiler version, target, page size, PIDs and
//! the identity of the invoking user.

use crate::error::CollectError;
use nix::unistd::{getppid, getuid, sysconf, SysconfVar, Uid, User};
use std::env;
use tracing::debug;

/// Compiler that built this binary, captured by the build script.
pub const RUSTC_VERSION: &str = env!("DIAGNOSTICS_RUSTC_VERSION");

/// Facts about the running process that cannot fail to resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeFacts {
    pub version: String,
    pub os: &'static str,
    pub arch: &'static str,
    pub cpus: usize,
    pub page_size: Option<i64>,
    pub pid: u32,
    pub ppid: i32,
}

impl RuntimeFacts {
    #[must_use]
    pub fn collect() -> Self {
        Self {
            version: format!("{RUSTC_VERSION} ({} {})", crate::NAME, crate::VERSION),
            os: env::consts::OS,
            arch: env::consts::ARCH,
            cpus: num_cpus::get(),
            page_size: page_size(),
            pid: std::process::id(),
            ppid: getppid().as_raw(),
        }
    }
}

fn page_size() -> Option<i64> {
    match sysconf(SysconfVar::PAGE_SIZE) {
        Ok(Some(size)) if size > 0 => Some(i64::from(size)),
        _ => {
            debug!("Could not read page size from sysconf");
            None
        }
    }
}

/// The real user id of the process and, when resolvable, its account name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: u32,
    pub name: String,
}

/// Looks up the passwd entry for the current real user id.
pub fn current_user() -> Result<UserIdentity, CollectError> {
    lookup_user(getuid())
}

fn lookup_user(uid: Uid) -> Result<UserIdentity, CollectError> {
    match User::from_uid(uid) {
        Ok(Some(user)) => Ok(UserIdentity {
            uid: uid.as_raw(),
            name: user.name,
        }),
        Ok(None) => Err(CollectError::CurrentUser(format!(
            "unknown userid {}",
            uid.as_raw()
        ))),
        Err(errno) => Err(CollectError::CurrentUser(errno.to_string())),
    }
}

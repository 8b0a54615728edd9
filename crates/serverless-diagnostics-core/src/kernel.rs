// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Kernel identification via `uname(2)`.
//!
//! The kernel hands back each field as a fixed-size, NUL-padded byte buffer.
//! Every field goes through [`field_to_string`] so that the padding never
//! leaks into the report, whatever the source of the bytes.

use crate::error::CollectError;
use nix::sys::utsname::{uname, UtsName};
use std::os::unix::ffi::OsStrExt;

/// Decodes a fixed-size kernel buffer, stopping at the first NUL byte.
///
/// A buffer with no NUL is used in full. Invalid UTF-8 is replaced rather
/// than rejected.
#[must_use]
pub fn field_to_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Kernel identification fields, one value per `uname` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelInfo {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    pub domainname: String,
}

impl KernelInfo {
    /// Queries the running kernel.
    ///
    /// The result is a fresh value per call; nothing is cached between
    /// invocations.
    ///
    /// `nix`'s `UtsName` accessors already stop at the terminating NUL, so on
    /// this path [`field_to_string`] only performs the UTF-8 conversion. The
    /// trim matters for raw buffers passed to [`KernelInfo::from_raw_fields`].
    pub fn query() -> Result<Self, CollectError> {
        let uts = uname().map_err(CollectError::Uname)?;
        Ok(Self::from_raw_fields(
            uts.sysname().as_bytes(),
            uts.nodename().as_bytes(),
            uts.release().as_bytes(),
            uts.version().as_bytes(),
            uts.machine().as_bytes(),
            domainname(&uts),
        ))
    }

    /// Builds the fields from raw kernel buffers.
    #[must_use]
    pub fn from_raw_fields(
        sysname: &[u8],
        nodename: &[u8],
        release: &[u8],
        version: &[u8],
        machine: &[u8],
        domainname: &[u8],
    ) -> Self {
        Self {
            sysname: field_to_string(sysname),
            nodename: field_to_string(nodename),
            release: field_to_string(release),
            version: field_to_string(version),
            machine: field_to_string(machine),
            domainname: field_to_string(domainname),
        }
    }

    /// Label/value pairs in report order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Sysname", self.sysname.as_str()),
            ("Nodename", self.nodename.as_str()),
            ("Release", self.release.as_str()),
            ("Version", self.version.as_str()),
            ("Machine", self.machine.as_str()),
            ("Domain", self.domainname.as_str()),
        ]
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn domainname(uts: &UtsName) -> &[u8] {
    uts.domainname().as_bytes()
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn domainname(_uts: &UtsName) -> &[u8] {
    b"(none)"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_at_first_nul() {
        let mut buf = [0u8; 65];
        buf[..5].copy_from_slice(b"linux");
        assert_eq!(field_to_string(&buf), "linux");
    }

    #[test]
    fn test_embedded_nul_hides_trailing_bytes() {
        assert_eq!(field_to_string(b"x86_64\0garbage\0"), "x86_64");
    }

    #[test]
    fn test_unterminated_buffer_used_in_full() {
        assert_eq!(field_to_string(b"aarch64"), "aarch64");
    }

    #[test]
    fn test_leading_nul_is_empty() {
        assert_eq!(field_to_string(&[0u8; 65]), "");
    }

    #[test]
    fn test_from_raw_fields() {
        let info = KernelInfo::from_raw_fields(
            b"Linux\0\0\0",
            b"169.254.1.1\0",
            b"5.10.0\0",
            b"#1 SMP\0",
            b"x86_64\0",
            b"(none)\0",
        );
        assert_eq!(info.sysname, "Linux");
        assert_eq!(info.nodename, "169.254.1.1");
        assert_eq!(info.fields()[5], ("Domain", "(none)"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_query_running_kernel() {
        let info = KernelInfo::query().unwrap();
        assert_eq!(info.sysname, "Linux");
        assert!(!info.release.contains('\0'));
        assert!(!info.machine.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_query_matches_nix_accessors() {
        let uts = uname().unwrap();
        let info = KernelInfo::query().unwrap();
        assert_eq!(info.sysname, uts.sysname().to_string_lossy());
        assert_eq!(info.release, uts.release().to_string_lossy());
        assert_eq!(info.machine, uts.machine().to_string_lossy());
        for (_, value) in info.fields() {
            assert!(!value.contains('\0'), "{value:?}");
        }
    }
}

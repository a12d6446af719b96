//! Host identity: OS family and architecture.

use serde::{Deserialize, Serialize};

/// Operating system family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    #[serde(alias = "darwin")]
    Macos,
    Freebsd,
    Unknown,
}

impl OsFamily {
    /// Detect the family of the host this binary was compiled for.
    pub fn current() -> Self {
        #[cfg(target_os = "linux")]
        {
            OsFamily::Linux
        }
        #[cfg(target_os = "macos")]
        {
            OsFamily::Macos
        }
        #[cfg(target_os = "freebsd")]
        {
            OsFamily::Freebsd
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "freebsd")))]
        {
            OsFamily::Unknown
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::Macos => write!(f, "macos"),
            OsFamily::Freebsd => write!(f, "freebsd"),
            OsFamily::Unknown => write!(f, "unknown"),
        }
    }
}

/// Host identity recorded in the cache so a consumer can tell which
/// system the flags were probed on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostInfo {
    /// OS family (affects platform-conditional groups).
    pub os: OsFamily,

    /// CPU architecture.
    pub arch: String,
}

impl HostInfo {
    /// Detect the current host.
    pub fn detect() -> Self {
        Self {
            os: OsFamily::current(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

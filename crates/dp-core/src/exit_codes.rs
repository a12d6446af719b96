//! Exit codes for the dp-core CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//! Ranges:
//! - 0: success
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal errors

/// Exit codes for dp-core operations.
///
/// These codes are a stable contract for automation. Changes require
/// a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All required probes succeeded and the cache was written.
    Clean = 0,

    /// Invalid arguments.
    ArgsError = 10,

    /// A required capability is missing from the host.
    CapabilityError = 11,

    /// Cache schema version mismatch.
    VersionError = 13,

    /// Internal error (bug - please report).
    InternalError = 20,

    /// I/O error (including an unwritable cache file).
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "clean",
            ExitCode::ArgsError => "args_error",
            ExitCode::CapabilityError => "capability_error",
            ExitCode::VersionError => "version_error",
            ExitCode::InternalError => "internal_error",
            ExitCode::IoError => "io_error",
        }
    }
}

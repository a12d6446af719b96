//! depprobe core - capability probing and flag cache generation.
//!
//! Probes the host for the external libraries the build needs, collects the
//! compiler/linker flags each probe reports into named groups, and writes
//! the resulting table to a versioned cache file for the consuming build
//! system.

pub mod exit_codes;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod probe;

pub use exit_codes::ExitCode;
pub use manifest::Manifest;
pub use probe::engine::{run_probes, ConfigError};
pub use probe::{ProbeKind, ProbeOutcome, ProbeSpec, Prober};

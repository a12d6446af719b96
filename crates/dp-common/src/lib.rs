//! depprobe shared types: flag groups, the flag-group table, and the
//! versioned flag cache schema.
//!
//! This crate provides the vocabulary shared between the prober and any
//! consumer of the cache file:
//! - Flag groups and the per-run flag-group table
//! - The versioned cache document with load/save
//! - Host identity (OS family, architecture)
//! - Cache error types

pub mod cache;
pub mod error;
pub mod flags;
pub mod host;
pub mod output;

pub use cache::{FlagCache, CACHE_SCHEMA_VERSION, DEFAULT_CACHE_FILE};
pub use error::{CacheError, Result};
pub use flags::{split_flags, FlagGroup, FlagTable};
pub use host::{HostInfo, OsFamily};
pub use output::OutputFormat;

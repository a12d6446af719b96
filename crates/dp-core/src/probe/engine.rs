//! Sequential configuration engine.
//!
//! Walks the manifest in declared order, threading an explicit flag table
//! through each probe call and returning it at the end. A failed required
//! probe aborts the run; a failed optional probe (or one whose dependency
//! group never materialized) is skipped.

use super::library::check_library;
use super::query::run_flag_query;
use super::runner::ProbeRunner;
use super::{ProbeKind, ProbeOutcome, ProbeSpec, Prober};
use crate::manifest::Manifest;
use dp_common::{FlagGroup, FlagTable, HostInfo};
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that abort a configuration run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required capability missing: {group}: {reason}")]
    RequiredCapabilityMissing { group: String, reason: String },
}

/// Prober backed by real subprocess probes.
#[derive(Debug, Default)]
pub struct SystemProber {
    runner: ProbeRunner,
}

impl SystemProber {
    pub fn new(runner: ProbeRunner) -> Self {
        Self { runner }
    }
}

impl Prober for SystemProber {
    fn probe(&self, spec: &ProbeSpec, dep_flags: &[String]) -> ProbeOutcome {
        match &spec.kind {
            ProbeKind::FlagQuery { program, args } => run_flag_query(&self.runner, program, args),
            ProbeKind::LibrarySymbol { lib, symbol } => {
                check_library(&self.runner, lib, symbol, dep_flags)
            }
        }
    }
}

/// Run every probe in the manifest against `prober`, in declared order,
/// then register the platform-conditional groups matching `host`.
///
/// The returned table holds exactly the groups that were successfully
/// registered; writing it to the cache is the caller's job.
pub fn run_probes(
    manifest: &Manifest,
    host: &HostInfo,
    prober: &impl Prober,
) -> Result<FlagTable, ConfigError> {
    let mut table = FlagTable::new();

    for spec in &manifest.probes {
        // A dependent probe only runs once its dependency group exists.
        let dep_flags: Vec<String> = match &spec.depends {
            Some(dep) => match table.get(dep) {
                Some(group) => group.flags.clone(),
                None => {
                    debug!(group = %spec.name, depends = %dep, "dependency not registered, skipping probe");
                    continue;
                }
            },
            None => Vec::new(),
        };

        match prober.probe(spec, &dep_flags) {
            ProbeOutcome::Found { flags } => {
                info!(group = %spec.name, count = flags.len(), "capability found");
                table.insert(
                    spec.name.clone(),
                    FlagGroup::new(flags).with_origin(spec.describe()),
                );
            }
            ProbeOutcome::Missing { reason } => {
                if spec.required {
                    error!(group = %spec.name, %reason, "required capability missing");
                    return Err(ConfigError::RequiredCapabilityMissing {
                        group: spec.name.clone(),
                        reason,
                    });
                }
                debug!(group = %spec.name, %reason, "optional capability missing, skipping");
            }
        }
    }

    for group in &manifest.platform_groups {
        if group.os == host.os {
            info!(group = %group.name, os = %group.os, "registering platform group");
            table.insert(
                group.name.clone(),
                FlagGroup::new(group.flags.clone()).with_origin("platform default"),
            );
        }
    }

    Ok(table)
}

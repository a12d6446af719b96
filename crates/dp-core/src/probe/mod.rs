//! Capability probing: descriptors, probe execution, and the
//! sequential configuration engine.

pub mod engine;
pub mod library;
pub mod query;
pub mod runner;

pub use engine::{run_probes, ConfigError, SystemProber};
pub use runner::{CommandOutput, ProbeRunner, RunError};

/// How a capability is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeKind {
    /// Run a flag-emitting program and tokenize its stdout.
    FlagQuery { program: String, args: Vec<String> },

    /// Link a generated stub against `-l<lib>` to verify `symbol` resolves.
    LibrarySymbol { lib: String, symbol: String },
}

/// One capability to detect: name, probe, required flag, and an optional
/// dependency on another group.
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    /// Group name the flags are registered under.
    pub name: String,

    /// The probe to run.
    pub kind: ProbeKind,

    /// Whether a failed probe aborts configuration.
    pub required: bool,

    /// Group that must already be registered before this probe runs.
    pub depends: Option<String>,
}

impl ProbeSpec {
    /// Declare a flag-query probe (optional by default).
    pub fn flag_query(name: impl Into<String>, program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: ProbeKind::FlagQuery {
                program: program.into(),
                args: args.iter().map(|s| s.to_string()).collect(),
            },
            required: false,
            depends: None,
        }
    }

    /// Declare a library/symbol link check (optional by default).
    pub fn library(
        name: impl Into<String>,
        lib: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ProbeKind::LibrarySymbol {
                lib: lib.into(),
                symbol: symbol.into(),
            },
            required: false,
            depends: None,
        }
    }

    /// Mark this capability as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare a dependency on another group.
    pub fn depends_on(mut self, group: impl Into<String>) -> Self {
        self.depends = Some(group.into());
        self
    }

    /// Human-readable description of the probe, recorded as the group origin.
    pub fn describe(&self) -> String {
        match &self.kind {
            ProbeKind::FlagQuery { program, args } => {
                if args.is_empty() {
                    program.clone()
                } else {
                    format!("{} {}", program, args.join(" "))
                }
            }
            ProbeKind::LibrarySymbol { lib, symbol } => {
                format!("link check: -l{} ({})", lib, symbol)
            }
        }
    }
}

/// Outcome of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The capability is present; flags to register.
    Found { flags: Vec<String> },

    /// The capability is absent or the probe failed.
    Missing { reason: String },
}

impl ProbeOutcome {
    /// Shorthand for a missing outcome.
    pub fn missing(reason: impl Into<String>) -> Self {
        ProbeOutcome::Missing {
            reason: reason.into(),
        }
    }
}

/// Capability detection seam: descriptor in, outcome out.
///
/// `dep_flags` carries the flags of the descriptor's dependency group (empty
/// when no dependency is declared) so link checks can compile against them.
pub trait Prober {
    fn probe(&self, spec: &ProbeSpec, dep_flags: &[String]) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builders() {
        let spec = ProbeSpec::flag_query("mad", "pkg-config", &["--libs", "--cflags", "mad"])
            .required();
        assert!(spec.required);
        assert!(spec.depends.is_none());
        assert_eq!(spec.describe(), "pkg-config --libs --cflags mad");

        let spec = ProbeSpec::library("sdl-ttf", "SDL_ttf", "TTF_Init").depends_on("sdl");
        assert!(!spec.required);
        assert_eq!(spec.depends.as_deref(), Some("sdl"));
        assert_eq!(spec.describe(), "link check: -lSDL_ttf (TTF_Init)");
    }
}

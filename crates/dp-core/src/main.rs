//! depprobe - build-configuration capability prober.
//!
//! Probes the host for required and optional external libraries, registers
//! the discovered compiler/linker flags into named groups, and writes the
//! flag-group table to a versioned cache file for the consuming build.

use clap::{Args, Parser, Subcommand};
use dp_common::{FlagCache, HostInfo, OutputFormat, DEFAULT_CACHE_FILE};
use dp_core::exit_codes::ExitCode;
use dp_core::logging::{init_logging, level_from_flags, LogFormat};
use dp_core::manifest::Manifest;
use dp_core::output::render_text;
use dp_core::probe::{run_probes, ConfigError, ProbeRunner, SystemProber};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// depprobe - probe build dependencies and cache their flags
#[derive(Parser)]
#[command(name = "dp-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Cache file path
    #[arg(long, global = true, default_value = DEFAULT_CACHE_FILE)]
    cache: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Per-probe timeout in seconds
    #[arg(long, global = true)]
    probe_timeout: Option<u64>,

    /// Log output format (human or jsonl)
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the host and write the flag cache
    Probe,

    /// Load an existing flag cache and print it
    Show,

    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    init_logging(
        cli.global.log_format,
        level_from_flags(cli.global.verbose, cli.global.quiet),
    );

    let code = match cli.command.unwrap_or(Commands::Probe) {
        Commands::Probe => cmd_probe(&cli.global),
        Commands::Show => cmd_show(&cli.global),
        Commands::Version => {
            println!("dp-core {}", env!("CARGO_PKG_VERSION"));
            ExitCode::Clean
        }
    };

    std::process::exit(code.as_i32());
}

/// Run the full configuration pass and write the cache.
fn cmd_probe(opts: &GlobalOpts) -> ExitCode {
    let host = HostInfo::detect();
    let manifest = Manifest::builtin();
    let runner = match opts.probe_timeout {
        Some(secs) => ProbeRunner::new(Duration::from_secs(secs)),
        None => ProbeRunner::default(),
    };
    let prober = SystemProber::new(runner);

    info!(os = %host.os, arch = %host.arch, probes = manifest.probes.len(), "probing host");

    let table = match run_probes(&manifest, &host, &prober) {
        Ok(table) => table,
        Err(e @ ConfigError::RequiredCapabilityMissing { .. }) => {
            error!("{e}");
            return ExitCode::CapabilityError;
        }
    };

    let cache = FlagCache::new(host, table);
    if let Err(e) = cache.save(&opts.cache) {
        error!("{e}");
        return ExitCode::IoError;
    }
    info!(path = %opts.cache.display(), groups = cache.groups.len(), "cache written");

    print_cache(&cache, opts.format)
}

/// Load an existing cache and print it.
fn cmd_show(opts: &GlobalOpts) -> ExitCode {
    let cache = match FlagCache::load(&opts.cache) {
        Ok(cache) => cache,
        Err(e) => {
            error!("{e}");
            return ExitCode::IoError;
        }
    };

    if let Err(e) = cache.check_schema() {
        error!("{e}");
        return ExitCode::VersionError;
    }

    print_cache(&cache, opts.format)
}

/// Print the command payload to stdout in the requested format.
fn print_cache(cache: &FlagCache, format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Text => print!("{}", render_text(cache)),
        OutputFormat::Json => match serde_json::to_string_pretty(cache) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize cache: {e}");
                return ExitCode::InternalError;
            }
        },
    }
    ExitCode::Clean
}

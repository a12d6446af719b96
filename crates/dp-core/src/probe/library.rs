//! Library/symbol link checks.
//!
//! Verifies that `-l<lib>` resolves `<symbol>` by compiling and linking a
//! generated C stub with the host C compiler. The dependency group's flags
//! are included on the compile line so checks like SDL_ttf see SDL's
//! include paths and link paths.

use super::runner::ProbeRunner;
use super::ProbeOutcome;
use std::env;
use std::fs;
use tracing::trace;

/// Run a link check using the compiler named by `CC`, or `cc`.
pub fn check_library(
    runner: &ProbeRunner,
    lib: &str,
    symbol: &str,
    dep_flags: &[String],
) -> ProbeOutcome {
    let compiler = env::var("CC").unwrap_or_else(|_| "cc".to_string());
    check_library_with(&compiler, runner, lib, symbol, dep_flags)
}

/// Run a link check with an explicit compiler.
pub fn check_library_with(
    compiler: &str,
    runner: &ProbeRunner,
    lib: &str,
    symbol: &str,
    dep_flags: &[String],
) -> ProbeOutcome {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            return ProbeOutcome::missing(format!("could not create scratch directory: {}", e))
        }
    };

    let src = dir.path().join("conftest.c");
    if let Err(e) = fs::write(&src, stub_source(symbol)) {
        return ProbeOutcome::missing(format!("could not write link-check stub: {}", e));
    }
    let out = dir.path().join("conftest");

    let mut args = vec![
        src.to_string_lossy().into_owned(),
        "-o".to_string(),
        out.to_string_lossy().into_owned(),
    ];
    args.extend(dep_flags.iter().cloned());
    args.push(format!("-l{}", lib));

    let output = match runner.run(compiler, &args) {
        Ok(output) => output,
        Err(e) => return ProbeOutcome::missing(format!("{}: {}", compiler, e)),
    };

    if output.timed_out {
        return ProbeOutcome::missing(format!("{} timed out", compiler));
    }

    if !output.success() {
        let stderr = output.stderr_str();
        let first_line = stderr.trim().lines().next().unwrap_or("").to_string();
        return ProbeOutcome::missing(format!(
            "could not link against -l{} ({})",
            lib,
            if first_line.is_empty() {
                "no diagnostic".to_string()
            } else {
                first_line
            }
        ));
    }

    trace!(lib, symbol, "link check succeeded");
    ProbeOutcome::Found {
        flags: vec![format!("-l{}", lib)],
    }
}

/// Generate the C stub that references `symbol`.
///
/// Declaring the symbol with a dummy prototype sidesteps needing the
/// library's headers; only the linker has to find it.
fn stub_source(symbol: &str) -> String {
    format!(
        "char {symbol}();\nint main(void) {{ {symbol}(); return 0; }}\n",
        symbol = symbol
    )
}

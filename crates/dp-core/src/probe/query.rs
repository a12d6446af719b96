//! Flag-query probes.
//!
//! A flag query runs a flag-emitting program (`pkg-config --libs --cflags
//! <pkgs>`, `curl-config --libs --cflags`, ...) and tokenizes its stdout.
//! Non-zero exit, spawn failure, timeout, or empty output all mean the
//! capability is absent.

use super::runner::ProbeRunner;
use super::ProbeOutcome;
use dp_common::split_flags;
use tracing::trace;

/// Run one flag query and turn the result into a probe outcome.
pub fn run_flag_query(runner: &ProbeRunner, program: &str, args: &[String]) -> ProbeOutcome {
    let output = match runner.run(program, args) {
        Ok(output) => output,
        Err(e) => return ProbeOutcome::missing(e.to_string()),
    };

    if output.timed_out {
        return ProbeOutcome::missing(format!("{} timed out", program));
    }

    if !output.success() {
        let mut reason = match output.exit_code {
            Some(code) => format!("{} exited with status {}", program, code),
            None => format!("{} was killed by a signal", program),
        };
        let stderr = output.stderr_str();
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            reason.push_str(": ");
            // first line is enough; pkg-config repeats itself
            reason.push_str(stderr.lines().next().unwrap_or(stderr));
        }
        return ProbeOutcome::missing(reason);
    }

    let flags = split_flags(&output.stdout_str());
    if flags.is_empty() {
        return ProbeOutcome::missing(format!("{} produced no flags", program));
    }

    trace!(program, count = flags.len(), "flag query succeeded");
    ProbeOutcome::Found { flags }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ProbeRunner {
        ProbeRunner::default()
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_query_tokenizes_stdout() {
        let outcome = run_flag_query(
            &runner(),
            "sh",
            &["-c".to_string(), "echo '-I/usr/include -lfoo'".to_string()],
        );
        assert_eq!(
            outcome,
            ProbeOutcome::Found {
                flags: vec!["-I/usr/include".to_string(), "-lfoo".to_string()]
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_missing() {
        let outcome = run_flag_query(
            &runner(),
            "sh",
            &[
                "-c".to_string(),
                "echo 'no such package' >&2; exit 1".to_string(),
            ],
        );
        match outcome {
            ProbeOutcome::Missing { reason } => {
                assert!(reason.contains("status 1"));
                assert!(reason.contains("no such package"));
            }
            other => panic!("expected Missing, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_is_missing() {
        let outcome = run_flag_query(&runner(), "true", &[]);
        match outcome {
            ProbeOutcome::Missing { reason } => assert!(reason.contains("no flags")),
            other => panic!("expected Missing, got {:?}", other),
        }
    }

    #[test]
    fn test_spawn_failure_is_missing() {
        let outcome = run_flag_query(&runner(), "/nonexistent/flag-tool", &[]);
        assert!(matches!(outcome, ProbeOutcome::Missing { .. }));
    }
}

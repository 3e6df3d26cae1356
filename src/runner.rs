// Child-process execution behind a one-method trait, so the self-check and
// the plugin loop can be tested with recording fakes.

use crate::log_debug;
use colored::Colorize;
use std::path::Path;
use std::process::Command;

/// Runs a program to completion. `Err` carries a human-readable reason
/// (spawn failure or non-zero exit); callers decide whether that is fatal.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<(), String>;
}

/// The real implementation: spawns the process with inherited stdio so its
/// output lands in the step log, and waits for it to finish.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<(), String> {
        log_debug!("[Runner] Executing {} {}", program.display(), args.join(" "));
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| format!("failed to start {}: {e}", program.display()))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {status}", program.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn successful_command_returns_ok() {
        assert!(ProcessRunner.run(Path::new("true"), &[]).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_exit_status() {
        let err = ProcessRunner.run(Path::new("false"), &[]).unwrap_err();
        assert!(err.contains("exited with"), "unexpected message: {err}");
    }

    #[test]
    fn missing_program_reports_spawn_failure() {
        let err = ProcessRunner
            .run(Path::new("/nonexistent/setup-ds-test-binary"), &["version"])
            .unwrap_err();
        assert!(err.contains("failed to start"), "unexpected message: {err}");
    }
}

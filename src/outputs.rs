// Interface to the CI host: step outputs, PATH additions, and secret
// masking, using the runner's file-command and workflow-command
// conventions. When the runner env vars are absent (local runs) the
// values are logged instead; that is never an error.

use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";
const PATH_FILE_VAR: &str = "GITHUB_PATH";

/// Publishes a step output as a `name=value` line in the runner's output
/// file.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    log_info!("[Outputs] {} = {}", name.bold(), value.cyan());
    match runner_file(OUTPUT_FILE_VAR) {
        Some(file) => append_line(Path::new(&file), &format!("{name}={value}")),
        None => {
            log_debug!("[Outputs] ${OUTPUT_FILE_VAR} not set; output logged only");
            Ok(())
        }
    }
}

/// Prepends a directory to the job's search path for all subsequent steps.
/// The current step keeps invoking the binary by absolute path, since PATH
/// changes only take effect in later steps.
pub fn add_path(dir: &Path) -> io::Result<()> {
    log_info!("[Outputs] Adding {} to the job PATH", dir.display().to_string().cyan());
    match runner_file(PATH_FILE_VAR) {
        Some(file) => append_line(Path::new(&file), &dir.display().to_string()),
        None => {
            log_warn!("[Outputs] ${PATH_FILE_VAR} not set; PATH not modified");
            Ok(())
        }
    }
}

/// Registers every line of a sensitive value with the runner's log masker.
/// Workflow commands go to stdout; one `::add-mask::` per line because the
/// masker works line-wise.
pub fn mask(value: &str) {
    for line in value.lines() {
        if !line.trim().is_empty() {
            println!("::add-mask::{line}");
        }
    }
}

fn runner_file(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn append_line(file: &Path, line: &str) -> io::Result<()> {
    let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
    writeln!(handle, "{line}")
}

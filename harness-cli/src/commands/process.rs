//! Synchronous child-process execution for the built-in handlers.

use std::path::Path;
use std::process::{Command, Stdio};

use harness_core::{HarnessError, Result};
use tracing::debug;

/// Split a configured command line the way a POSIX shell would.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(line)
        .map_err(|e| HarnessError::Initialization(format!("cannot parse \"{}\": {}", line, e)))?;
    if argv.is_empty() {
        return Err(HarnessError::Initialization("empty command line".to_string()));
    }
    Ok(argv)
}

/// Run `argv` in `cwd` and wait for it. Returns the exit code, or -1 when the
/// process was terminated by a signal.
pub fn run(argv: &[String], cwd: &Path, env: &[(String, String)], quiet: bool) -> Result<i32> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| HarnessError::Execution("empty command line".to_string()))?;

    debug!(program = %program, ?args, cwd = %cwd.display(), "spawning");

    let mut command = Command::new(program);
    command.args(args).current_dir(cwd);
    for (key, value) in env {
        command.env(key, value);
    }
    if quiet {
        command.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let status = command.status().map_err(|e| {
        HarnessError::Execution(format!(
            "failed to run {} in {}: {}",
            program,
            cwd.display(),
            e
        ))
    })?;

    Ok(status.code().unwrap_or(-1))
}

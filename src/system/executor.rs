// src/system/executor.rs

use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Failures while running a search command.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{command}' exited with status {code:?}: {stderr}")]
    NonZeroExitStatus {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Exit status search tools such as `rg` and `grep` use for "nothing matched".
const NO_MATCH_EXIT_CODE: i32 = 1;

/// Builds a command that runs `command_line` through the platform shell,
/// so environment references in configured paths are expanded the usual way.
fn shell_command(command_line: &str) -> StdCommand {
    if cfg!(target_os = "windows") {
        let mut command = StdCommand::new("cmd");
        command.arg("/C").arg(command_line);
        command
    } else {
        let mut command = StdCommand::new("sh");
        command.arg("-c").arg(command_line);
        command
    }
}

/// Runs a search command and captures its standard output.
///
/// A "no match" exit status yields empty output rather than an error.
pub fn execute_and_capture_output(command_line: &str) -> Result<String, ExecutionError> {
    let trimmed_command = command_line.trim();
    if trimmed_command.is_empty() {
        return Err(ExecutionError::EmptyCommand);
    }
    log::debug!("Executing: {}", trimmed_command);

    let output = shell_command(trimmed_command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?;

    if !output.status.success() {
        if output.status.code() == Some(NO_MATCH_EXIT_CODE) && output.stderr.is_empty() {
            return Ok(String::new());
        }
        return Err(ExecutionError::NonZeroExitStatus {
            command: trimmed_command.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: trimmed_command.to_string(),
        source: e,
    })
}

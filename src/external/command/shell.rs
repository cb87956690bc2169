use super::{CommandError, CommandLine, CommandRunner};
use async_trait::async_trait;
use std::{process::Output, time::Duration};

/// A [CommandRunner] which spawns real processes.
///
/// Async runs are bounded by an optional timeout, after which the child is
/// killed. Synchronous runs have no timeout.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(timeout: Option<Duration>) -> ShellRunner {
        ShellRunner { timeout }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    fn run_sync(&self, command: &CommandLine) -> Result<String, CommandError> {
        log::trace!("Running `{}`", command);
        let output = std::process::Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|e| CommandError::Spawn {
                command: command.to_string(),
                source: e,
            })?;
        stdout_of(command, output)
    }

    async fn run(&self, command: &CommandLine) -> Result<String, CommandError> {
        log::trace!("Running `{}` asynchronously", command);
        let mut process = tokio::process::Command::new(&command.program);
        process.args(&command.args).kill_on_drop(true);
        let child = process.output();
        let spawned = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, child).await {
                Ok(res) => res,
                Err(_) => {
                    return Err(CommandError::TimedOut {
                        command: command.to_string(),
                        timeout,
                    })
                }
            },
            None => child.await,
        };
        let output = spawned.map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            source: e,
        })?;
        stdout_of(command, output)
    }
}

fn stdout_of(command: &CommandLine, output: Output) -> Result<String, CommandError> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(CommandError::Failed {
            command: command.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}

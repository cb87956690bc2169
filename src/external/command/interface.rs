use async_trait::async_trait;
use std::{fmt, time::Duration};
use thiserror::Error;

/// An argv-style invocation of an external utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: &str, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Failure to run an external utility to completion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    #[error("couldn't start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` didn't finish within {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

/// Executes the utilities the brightness backends are built on.
///
/// Both methods return the standard output of the command. A command which
/// can't be started or exits unsuccessfully results in a [CommandError].
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    /// Run the command, blocking the calling thread until it finishes.
    ///
    /// Only meant for startup-time queries, before any requests are served.
    fn run_sync(&self, command: &CommandLine) -> Result<String, CommandError>;

    /// Run the command without blocking the runtime.
    async fn run(&self, command: &CommandLine) -> Result<String, CommandError>;
}

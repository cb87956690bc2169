use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use super::{CommandError, CommandLine, CommandRunner};

#[derive(Debug, Clone)]
struct Response {
    prefix: String,
    output: Option<String>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct State {
    responses: Vec<Response>,
    issued: Vec<String>,
    should_fail: bool,
}

/// A mock [CommandRunner], usable when testing the code issuing commands.
///
/// Responses are registered for command prefixes, the longest registered
/// prefix of the issued command line decides the answer. Commands with no
/// matching prefix fail as if the program didn't exist.
#[derive(Debug, Clone, Default)]
pub struct MockCommandRunner {
    state: Arc<Mutex<State>>,
}

impl MockCommandRunner {
    pub fn new() -> MockCommandRunner {
        MockCommandRunner::default()
    }

    /// Answer commands starting with `prefix` with the given standard output
    pub fn respond(&self, prefix: &str, output: &str) -> &Self {
        self.respond_after(prefix, output, Duration::ZERO)
    }

    /// Like [Self::respond], but async runs only finish after `delay`
    pub fn respond_after(&self, prefix: &str, output: &str, delay: Duration) -> &Self {
        self.register(prefix, Some(output.to_owned()), delay);
        self
    }

    /// Make commands starting with `prefix` exit unsuccessfully
    pub fn fail(&self, prefix: &str) -> &Self {
        self.register(prefix, None, Duration::ZERO);
        self
    }

    /// Set whether every command should fail, regardless of registered responses
    pub fn set_failure_mode(&self, should_fail: bool) {
        self.state.lock().unwrap().should_fail = should_fail;
    }

    /// Command lines issued so far, in the order they were issued
    pub fn issued(&self) -> Vec<String> {
        self.state.lock().unwrap().issued.clone()
    }

    fn register(&self, prefix: &str, output: Option<String>, delay: Duration) {
        let mut state = self.state.lock().unwrap();
        state.responses.retain(|r| r.prefix != prefix);
        state.responses.push(Response {
            prefix: prefix.to_owned(),
            output,
            delay,
        });
    }

    fn answer(&self, command: &CommandLine) -> (Result<String, CommandError>, Duration) {
        let line = command.to_string();
        let mut state = self.state.lock().unwrap();
        state.issued.push(line.clone());
        if state.should_fail {
            return (Err(failure(line)), Duration::ZERO);
        }
        let response = state
            .responses
            .iter()
            .filter(|r| line.starts_with(&r.prefix))
            .max_by_key(|r| r.prefix.len())
            .cloned();
        match response {
            Some(Response {
                output: Some(output),
                delay,
                ..
            }) => (Ok(output), delay),
            Some(Response { delay, .. }) => (Err(failure(line)), delay),
            None => (
                Err(CommandError::Spawn {
                    command: line,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no mock response"),
                }),
                Duration::ZERO,
            ),
        }
    }
}

fn failure(command: String) -> CommandError {
    CommandError::Failed {
        command,
        code: Some(1),
        stderr: "Mock CommandRunner is failing".to_owned(),
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    fn run_sync(&self, command: &CommandLine) -> Result<String, CommandError> {
        self.answer(command).0
    }

    async fn run(&self, command: &CommandLine) -> Result<String, CommandError> {
        let (result, delay) = self.answer(command);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

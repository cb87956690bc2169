use super::{
    controller_core::{ControllerCore, StartupError},
    output::{normalize, to_percentage, ParseError},
};
use crate::external::{
    command::{CommandLine, CommandRunner},
    monitors::Monitor,
};

const DDCUTIL: &str = "ddcutil";
/// VCP feature code of the luminance control
const BRIGHTNESS_FEATURE: &str = "10";

/// A backend talking DDC/CI to an external monitor through `ddcutil`,
/// addressing it by its serial number.
///
/// The controller starts at 0 and only learns the real brightness once
/// [DdcController::initialize] finishes.
#[derive(Debug)]
pub struct DdcController<R: CommandRunner> {
    core: ControllerCore<R>,
}

impl<R: CommandRunner> DdcController<R> {
    pub fn new(monitor: Monitor, runner: R) -> DdcController<R> {
        DdcController {
            core: ControllerCore::new(monitor, 0.0, runner),
        }
    }

    pub fn core(&self) -> &ControllerCore<R> {
        &self.core
    }

    fn serial(&self) -> &str {
        &self.core.monitor().serial
    }

    /// Query the monitor's current brightness, storing it on success
    pub async fn read_brightness(&self) -> Result<f64, StartupError> {
        let command = CommandLine::new(
            DDCUTIL,
            ["--sn", self.serial(), "getvcp", BRIGHTNESS_FEATURE, "--brief"],
        );
        let reply = self.core.runner().run(&command).await?;
        let (current, max) = parse_vcp_reply(&reply)?;
        let value = normalize(current, max)?;
        self.core.store(value);
        Ok(value)
    }

    /// Read the initial brightness. Failures are logged and leave the value at 0.
    pub async fn initialize(&self) {
        match self.read_brightness().await {
            Ok(value) => log::info!(
                "{} ({}) brightness is {:.2}",
                self.core.monitor().name,
                self.serial(),
                value
            ),
            // A failed read is indistinguishable from a dark monitor from here on
            Err(e) => log::warn!(
                "Couldn't read brightness of {} ({}), assuming 0: {}",
                self.core.monitor().name,
                self.serial(),
                e
            ),
        }
    }

    pub fn apply_command(&self, value: f64) -> CommandLine {
        CommandLine::new(
            DDCUTIL,
            [
                "--sn".to_owned(),
                self.serial().to_owned(),
                "setvcp".to_owned(),
                BRIGHTNESS_FEATURE.to_owned(),
                to_percentage(value).to_string(),
            ],
        )
    }
}

/// Extract the (current, max) pair from the brief output of `getvcp`.
///
/// Only the last non-empty line is considered. It must consist of exactly
/// five whitespace-separated tokens, e.g. `VCP 10 C 30 100`.
pub fn parse_vcp_reply(reply: &str) -> Result<(u32, u32), ParseError> {
    let line = reply
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ParseError::MalformedReply(reply.to_owned()))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 {
        return Err(ParseError::MalformedReply(line.to_owned()));
    }
    match (tokens[3].parse(), tokens[4].parse()) {
        (Ok(current), Ok(max)) => Ok((current, max)),
        _ => Err(ParseError::MalformedReply(line.to_owned())),
    }
}

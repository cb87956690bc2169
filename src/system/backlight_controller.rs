use super::{
    controller_core::{ControllerCore, StartupError},
    output::{normalize, parse_number, to_percentage},
};
use crate::external::{
    command::{CommandLine, CommandRunner},
    monitors::Monitor,
};

const BRIGHTNESSCTL: &str = "brightnessctl";

/// A backend driving the backlight through `brightnessctl`, which works
/// with raw (current, max) brightness pairs.
#[derive(Debug)]
pub struct BacklightController<R: CommandRunner> {
    core: ControllerCore<R>,
}

impl<R: CommandRunner> BacklightController<R> {
    /// Query the current brightness and create a controller for it.
    ///
    /// The queries run synchronously. Any failure means the monitor can't be
    /// managed by this backend and no controller is created.
    pub fn new(monitor: Monitor, runner: R) -> Result<BacklightController<R>, StartupError> {
        let current = parse_number(&runner.run_sync(&get_command())?)?;
        let max = parse_number(&runner.run_sync(&max_command())?)?;
        let value = normalize(current, max)?;
        log::debug!(
            "{} backlight at {}/{} ({:.2})",
            monitor.name,
            current,
            max,
            value
        );
        Ok(BacklightController {
            core: ControllerCore::new(monitor, value, runner),
        })
    }

    pub fn core(&self) -> &ControllerCore<R> {
        &self.core
    }

    pub fn apply_command(&self, value: f64) -> CommandLine {
        CommandLine::new(
            BRIGHTNESSCTL,
            ["set".to_owned(), format!("{}%", to_percentage(value)), "-q".to_owned()],
        )
    }
}

fn get_command() -> CommandLine {
    CommandLine::new(BRIGHTNESSCTL, ["get"])
}

fn max_command() -> CommandLine {
    CommandLine::new(BRIGHTNESSCTL, ["max"])
}

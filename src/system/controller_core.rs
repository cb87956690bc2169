//! State and apply machinery shared by all brightness backends.

use super::output::ParseError;
use crate::external::{
    command::{CommandError, CommandLine, CommandRunner},
    monitors::Monitor,
};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::{sync::broadcast, task::JoinHandle};

/// Capacity of the confirmed value channel, per controller
const NOTIFICATION_CAPACITY: usize = 16;

/// Clamp a requested brightness into [0, 1]. NaN is treated as 0.
pub fn clamp_brightness(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Failure to read the initial brightness of a monitor.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failure to confirm a brightness change.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("apply task didn't finish: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// The pending hardware write started by a brightness change.
///
/// Dropping the handle detaches the write, it keeps running in the background.
#[derive(Debug)]
pub struct ApplyHandle(JoinHandle<Result<f64, CommandError>>);

impl ApplyHandle {
    /// Wait until the backend confirms the change, returning the applied value
    pub async fn wait(self) -> Result<f64, ApplyError> {
        Ok(self.0.await??)
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// The last known brightness of a monitor together with the means of changing it.
///
/// The value is only ever changed through [ControllerCore::apply] or when a
/// backend reads the hardware state. Observers are notified only about
/// values the backend has confirmed.
#[derive(Debug)]
pub struct ControllerCore<R: CommandRunner> {
    monitor: Monitor,
    value: AtomicU64,
    notifier: broadcast::Sender<f64>,
    runner: R,
}

impl<R: CommandRunner> ControllerCore<R> {
    pub fn new(monitor: Monitor, initial_value: f64, runner: R) -> ControllerCore<R> {
        let (notifier, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        ControllerCore {
            monitor,
            value: AtomicU64::new(clamp_brightness(initial_value).to_bits()),
            notifier,
            runner,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f64) {
        self.value
            .store(clamp_brightness(value).to_bits(), Ordering::Relaxed);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<f64> {
        self.notifier.subscribe()
    }

    /// Record `value` as the current brightness and run `command` in the
    /// background to make the hardware match it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn apply(&self, value: f64, command: CommandLine) -> ApplyHandle {
        let value = clamp_brightness(value);
        self.store(value);
        let runner = self.runner.clone();
        let notifier = self.notifier.clone();
        let name = self.monitor.name.clone();
        ApplyHandle(tokio::spawn(async move {
            match runner.run(&command).await {
                Ok(_) => {
                    log::debug!("{} brightness set to {:.2}", name, value);
                    // Nobody listening is fine
                    let _ = notifier.send(value);
                    Ok(value)
                }
                Err(e) => {
                    log::error!("Couldn't set {} brightness to {:.2}: {}", name, value, e);
                    Err(e)
                }
            }
        }))
    }
}

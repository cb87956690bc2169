use crate::{
    external::{command::CommandRunner, monitors::Monitor},
    system::{
        backlight_controller::BacklightController,
        controller_core::{clamp_brightness, ApplyHandle, ControllerCore},
        ddc_controller::DdcController,
    },
};
use std::fmt;
use tokio::sync::broadcast;

/// Which backend a [BrightnessController] uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Backlight,
    Ddc,
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerKind::Backlight => write!(f, "brightnessctl"),
            ControllerKind::Ddc => write!(f, "ddcutil"),
        }
    }
}

/// Brightness control of a single monitor, exposed as a value in [0, 1].
///
/// [BrightnessController::get] never blocks, it returns the last value read
/// from the hardware or requested through [BrightnessController::set].
/// Writes are optimistic: the value changes immediately, the backend command
/// runs in the background and subscribers are only notified once it
/// succeeds.
///
/// Overlapping sets on one controller aren't serialized. Their commands race
/// and the one finishing last produces the last notification.
#[derive(Debug)]
pub enum BrightnessController<R: CommandRunner> {
    Backlight(BacklightController<R>),
    Ddc(DdcController<R>),
}

impl<R: CommandRunner> BrightnessController<R> {
    fn core(&self) -> &ControllerCore<R> {
        match self {
            BrightnessController::Backlight(c) => c.core(),
            BrightnessController::Ddc(c) => c.core(),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            BrightnessController::Backlight(_) => ControllerKind::Backlight,
            BrightnessController::Ddc(_) => ControllerKind::Ddc,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        self.core().monitor()
    }

    pub fn get(&self) -> f64 {
        self.core().get()
    }

    /// Change the brightness, clamping `value` into [0, 1].
    ///
    /// Returns as soon as the new value is stored. The returned handle can be
    /// awaited to learn whether the hardware accepted it, failures are logged
    /// either way.
    pub fn set(&self, value: f64) -> ApplyHandle {
        let value = clamp_brightness(value);
        let command = match self {
            BrightnessController::Backlight(c) => c.apply_command(value),
            BrightnessController::Ddc(c) => c.apply_command(value),
        };
        self.core().apply(value, command)
    }

    /// Receive every brightness value confirmed by the backend from now on
    pub fn subscribe(&self) -> broadcast::Receiver<f64> {
        self.core().subscribe()
    }

    /// Finish any asynchronous initialization the backend needs
    pub async fn initialize(&self) {
        if let BrightnessController::Ddc(c) = self {
            c.initialize().await
        }
    }
}

use super::{brightness_controller::BrightnessController, subscription::Subscription};
use crate::{
    external::{command::CommandRunner, monitors::Monitor},
    system::controller_core::ApplyHandle,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("there's no monitor with index {0}")]
    NoSuchMonitor(usize),

    #[error("monitor {0} has no working brightness controller")]
    Unmanaged(String),
}

/// A monitor and its controller, if one could be created
#[derive(Debug)]
pub struct ManagedMonitor<R: CommandRunner> {
    pub monitor: Monitor,
    pub controller: Option<Arc<BrightnessController<R>>>,
}

/// The controllers of all monitors, in monitor registry order.
#[derive(Debug)]
pub struct ControllerSet<R: CommandRunner> {
    entries: Vec<ManagedMonitor<R>>,
}

impl<R: CommandRunner> ControllerSet<R> {
    pub fn new(entries: Vec<ManagedMonitor<R>>) -> ControllerSet<R> {
        ControllerSet { entries }
    }

    pub fn entries(&self) -> &[ManagedMonitor<R>] {
        &self.entries
    }

    pub fn controller(&self, index: usize) -> Result<&Arc<BrightnessController<R>>, LookupError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(LookupError::NoSuchMonitor(index))?;
        entry
            .controller
            .as_ref()
            .ok_or_else(|| LookupError::Unmanaged(entry.monitor.name.clone()))
    }

    /// Controller of the first monitor, for components which only care about one
    pub fn primary(&self) -> Option<Arc<BrightnessController<R>>> {
        self.entries.first().and_then(|e| e.controller.clone())
    }

    pub fn get(&self, index: usize) -> Result<f64, LookupError> {
        Ok(self.controller(index)?.get())
    }

    pub fn set(&self, index: usize, value: f64) -> Result<ApplyHandle, LookupError> {
        Ok(self.controller(index)?.set(value))
    }

    /// Call `callback` with every brightness confirmed for the monitor, until
    /// the returned [Subscription] is dropped
    pub fn subscribe<F>(&self, index: usize, callback: F) -> Result<Subscription, LookupError>
    where
        F: FnMut(f64) + Send + 'static,
    {
        let receiver = self.controller(index)?.subscribe();
        Ok(Subscription::new(receiver, callback))
    }
}

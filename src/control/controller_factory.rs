use super::{
    brightness_controller::BrightnessController,
    controller_set::{ControllerSet, ManagedMonitor},
    policy::{resolve_policy, ConfigurationError, ControllerPolicy},
};
use crate::{
    external::{command::CommandRunner, monitors::Monitor},
    system::{
        backlight_controller::BacklightController,
        capability_probe::{self, CapabilitySet},
        ddc_controller::DdcController,
    },
};
use std::{collections::HashMap, sync::Arc};

/// Builds one [BrightnessController] per monitor according to the configured policies.
pub struct ControllerFactory<'a, R: CommandRunner> {
    runner: R,
    policies: &'a HashMap<String, String>,
}

impl<'a, R: CommandRunner> ControllerFactory<'a, R> {
    pub fn new(runner: R, policies: &'a HashMap<String, String>) -> ControllerFactory<'a, R> {
        ControllerFactory { runner, policies }
    }

    /// Create the controllers for `monitors`, in the same order.
    ///
    /// All policies are resolved before anything is constructed, so an
    /// invalid one fails the whole build. Monitors whose backlight can't be
    /// queried are left without a controller. DDC/CI controllers are
    /// initialized concurrently and the build waits for all of them.
    pub async fn build(&self, monitors: &[Monitor]) -> Result<ControllerSet<R>, ConfigurationError> {
        let policies = monitors
            .iter()
            .map(|m| resolve_policy(self.policies, &m.name))
            .collect::<Result<Vec<_>, _>>()?;

        let capabilities = if policies.contains(&ControllerPolicy::Auto) {
            capability_probe::probe(&self.runner).await
        } else {
            CapabilitySet::new()
        };

        let mut entries = Vec::with_capacity(monitors.len());
        for (monitor, policy) in monitors.iter().zip(policies) {
            let controller = self.construct(monitor, policy, &capabilities);
            entries.push(ManagedMonitor {
                monitor: monitor.clone(),
                controller: controller.map(Arc::new),
            });
        }

        let initializations: Vec<_> = entries
            .iter()
            .filter_map(|e| e.controller.clone())
            .map(|c| tokio::spawn(async move { c.initialize().await }))
            .collect();
        for initialization in initializations {
            if let Err(e) = initialization.await {
                log::error!("Controller initialization task failed: {}", e);
            }
        }

        Ok(ControllerSet::new(entries))
    }

    fn construct(
        &self,
        monitor: &Monitor,
        policy: ControllerPolicy,
        capabilities: &CapabilitySet,
    ) -> Option<BrightnessController<R>> {
        let use_ddc = match policy {
            ControllerPolicy::Backlight => false,
            ControllerPolicy::Ddc => true,
            ControllerPolicy::Auto => capabilities.contains(&monitor.serial),
        };
        log::debug!(
            "Monitor {} ({:?}) resolved to {}",
            monitor.name,
            policy,
            if use_ddc { "ddcutil" } else { "brightnessctl" }
        );
        if use_ddc {
            return Some(BrightnessController::Ddc(DdcController::new(
                monitor.clone(),
                self.runner.clone(),
            )));
        }
        match BacklightController::new(monitor.clone(), self.runner.clone()) {
            Ok(c) => Some(BrightnessController::Backlight(c)),
            Err(e) => {
                log::error!(
                    "Couldn't read backlight of {}, leaving it unmanaged: {}",
                    monitor.name,
                    e
                );
                None
            }
        }
    }
}

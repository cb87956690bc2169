use super::{
    command::{shell::ShellRunner, CommandRunner},
    monitors::{Monitor, MonitorRegistry, StaticRegistry},
};
use crate::config::Config;

#[cfg(test)]
use super::{command::mock::MockCommandRunner, monitors::MonitorConfig};

/// Bundles the external collaborators the controllers are built from.
pub struct DependencyProvider<R: CommandRunner, M: MonitorRegistry> {
    command_runner: R,
    monitor_registry: M,
}

impl<R: CommandRunner, M: MonitorRegistry> DependencyProvider<R, M> {
    pub fn new(command_runner: R, monitor_registry: M) -> DependencyProvider<R, M> {
        DependencyProvider {
            command_runner,
            monitor_registry,
        }
    }

    pub fn get_command_runner(&self) -> R {
        self.command_runner.clone()
    }

    pub fn get_monitors(&self) -> Vec<Monitor> {
        self.monitor_registry.monitors()
    }
}

impl DependencyProvider<ShellRunner, StaticRegistry> {
    pub fn make_system(config: &Config) -> Self {
        DependencyProvider::new(
            ShellRunner::new(config.command_timeout()),
            StaticRegistry::new(&config.monitors),
        )
    }
}

#[cfg(test)]
impl DependencyProvider<MockCommandRunner, StaticRegistry> {
    /// A provider with a mock runner and monitors with the given names and serials
    pub fn make_mock(monitors: &[(&str, &str)]) -> Self {
        let configs: Vec<MonitorConfig> = monitors
            .iter()
            .map(|(name, serial)| MonitorConfig {
                name: (*name).to_owned(),
                serial: (*serial).to_owned(),
            })
            .collect();
        DependencyProvider::new(MockCommandRunner::new(), StaticRegistry::new(&configs))
    }
}

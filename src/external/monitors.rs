use serde::Deserialize;

/// A display known to the host, as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonitorConfig {
    pub name: String,
    #[serde(default)]
    pub serial: String,
}

/// A display managed by one brightness controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// Position of the monitor in the registry
    pub index: usize,
    pub name: String,
    /// Hardware serial number, empty for internal panels
    pub serial: String,
}

/// Name of the monitor assumed when none are configured
pub const FALLBACK_MONITOR: &str = "backlight";

/// The ordered list of monitors whose brightness is managed.
pub trait MonitorRegistry: Send + Sync {
    /// Monitors in registry order. The list doesn't change while the
    /// controllers built from it are alive.
    fn monitors(&self) -> Vec<Monitor>;
}

/// A [MonitorRegistry] with a fixed list of monitors.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    monitors: Vec<Monitor>,
}

impl StaticRegistry {
    pub fn new(monitors: &[MonitorConfig]) -> StaticRegistry {
        let monitors = if monitors.is_empty() {
            vec![Monitor {
                index: 0,
                name: FALLBACK_MONITOR.to_owned(),
                serial: String::new(),
            }]
        } else {
            monitors
                .iter()
                .enumerate()
                .map(|(index, m)| Monitor {
                    index,
                    name: m.name.clone(),
                    serial: m.serial.clone(),
                })
                .collect()
        };
        StaticRegistry { monitors }
    }
}

impl MonitorRegistry for StaticRegistry {
    fn monitors(&self) -> Vec<Monitor> {
        self.monitors.clone()
    }
}

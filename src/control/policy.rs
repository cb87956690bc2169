use crate::config::DEFAULT_POLICY_KEY;
use std::{collections::HashMap, str::FromStr};
use thiserror::Error;

/// How the backend of a monitor is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPolicy {
    /// Always use brightnessctl
    Backlight,
    /// Always use ddcutil
    Ddc,
    /// Use ddcutil if the monitor was detected as DDC/CI capable
    Auto,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown controller policy {0:?}")]
pub struct UnknownPolicy(pub String);

impl FromStr for ControllerPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brightnessctl" => Ok(ControllerPolicy::Backlight),
            "ddcutil" => Ok(ControllerPolicy::Ddc),
            "auto" => Ok(ControllerPolicy::Auto),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}

/// A configuration mistake which prevents starting up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("invalid controller {value:?} for monitor {monitor}, expected one of brightnessctl, ddcutil, auto")]
    InvalidPolicy { monitor: String, value: String },
}

/// Pick the policy for a monitor: its own entry, then the default entry, then auto.
pub fn resolve_policy(
    policies: &HashMap<String, String>,
    monitor_name: &str,
) -> Result<ControllerPolicy, ConfigurationError> {
    match policies
        .get(monitor_name)
        .or_else(|| policies.get(DEFAULT_POLICY_KEY))
    {
        None => Ok(ControllerPolicy::Auto),
        Some(value) => value
            .parse::<ControllerPolicy>()
            .map_err(|UnknownPolicy(value)| ConfigurationError::InvalidPolicy {
                monitor: monitor_name.to_owned(),
                value,
            }),
    }
}

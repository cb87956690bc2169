//! Provides abstractions over the system utilities and host information
//! brightness control depends on

pub mod command;
pub mod dependency_provider;
pub mod monitors;

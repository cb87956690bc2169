//! Brightness controllers and how they get assigned to monitors

pub mod brightness_controller;
pub mod controller_factory;
pub mod controller_set;
pub mod policy;
pub mod subscription;

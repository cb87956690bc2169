//! Brightness backends and the detection of what the connected monitors support

pub mod backlight_controller;
pub mod capability_probe;
pub mod controller_core;
pub mod ddc_controller;
pub mod output;

#[cfg(test)]
mod test;

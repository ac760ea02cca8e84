//! # User Interface
//!
//! Dear ImGui overlay drawn on top of the scene. The [`UiManager`] owns the
//! ImGui context and renderer; the [`panel`] functions edit a
//! [`DroneControls`](crate::controls::DroneControls) that the frame driver
//! reads every frame.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{camera_options, drone_options};

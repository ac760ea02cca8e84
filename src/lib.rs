// src/lib.rs
//! Bolt drone viewer
//!
//! A small model viewer built on wgpu, winit and Dear ImGui. One imported
//! mesh hangs in a scene graph together with a camera and a point light; the
//! camera keeps the aspect ratio under resize and the mesh is lit with a
//! Phong shader.

pub mod app;
pub mod bolt;
pub mod config;
pub mod controls;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

#[cfg(test)]
mod test_support;

pub use app::BoltApp;
pub use bolt::Bolt;
pub use config::BoltConfig;
pub use error::{BoltError, Result};

/// Opens the viewer window and runs it until it is closed
pub fn run(config: BoltConfig) -> anyhow::Result<()> {
    BoltApp::new(config)?.run()
}

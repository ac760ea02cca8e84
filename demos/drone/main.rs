//! # Drone viewer
//!
//! Shows the first mesh of an OBJ file, lit by a point light, with panels for
//! the drone orientation and scale and for the camera pose.
//!
//! ## Usage:
//! ```bash
//! cargo run --example drone -- path/to/Drone.obj
//! ```
//!
//! Without an argument `res/Drone.obj` is loaded. Escape closes the window.

use bolt::BoltConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"),
    )
    .init();

    let mut config = BoltConfig::default().with_window_title("Bolt - Drone");
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_model_path(path);
    }

    bolt::run(config)
}

//! Viewer configuration

use std::path::PathBuf;

use cgmath::Vector3;

use crate::gfx::{camera::ProjectionConfig, shading::PhongMaterial};

/// Startup configuration of the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct BoltConfig {
    /// Model file, the first mesh of which is shown
    pub model_path: PathBuf,
    pub window_title: String,
    pub window_size: (u32, u32),
    pub clear_color: [f64; 3],
    pub projection: ProjectionConfig,
    pub material: PhongMaterial,
    /// World position of the point light
    pub light_position: Vector3<f32>,
    /// Initial world position of the camera
    pub camera_position: Vector3<f32>,
    pub axis_length: f32,
    pub show_axes: bool,
}

impl BoltConfig {
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_clear_color(mut self, color: [f64; 3]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_material(mut self, material: PhongMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_light_position(mut self, position: Vector3<f32>) -> Self {
        self.light_position = position;
        self
    }

    pub fn with_camera_position(mut self, position: Vector3<f32>) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_axes(mut self, show: bool, length: f32) -> Self {
        self.show_axes = show;
        self.axis_length = length;
        self
    }
}

impl Default for BoltConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("res/Drone.obj"),
            window_title: "Bolt".to_string(),
            window_size: (1200, 800),
            clear_color: [0.1, 0.2, 0.3],
            projection: ProjectionConfig::default(),
            material: PhongMaterial::default(),
            light_position: Vector3::new(3.0, 5.0, 8.0),
            camera_position: Vector3::new(0.0, 0.0, 10.0),
            axis_length: 1.0,
            show_axes: true,
        }
    }
}

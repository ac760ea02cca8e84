//! Per-frame state of the viewer controls
//!
//! The UI panels edit a [`DroneControls`] and the frame driver reads it; the
//! two never share any other state.

use std::ops::RangeInclusive;

use cgmath::Vector3;

use crate::config::BoltConfig;

/// Drone rotation range in degrees
pub const ROTATION_RANGE: RangeInclusive<f32> = 0.0..=360.0;
pub const SCALE_RANGE: RangeInclusive<f32> = 0.0..=5.0;
/// Camera position range per axis
pub const CAMERA_POSITION_RANGE: RangeInclusive<f32> = -20.0..=20.0;
/// Camera rotation range in degrees
pub const CAMERA_ROTATION_RANGE: RangeInclusive<f32> = -180.0..=180.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneControls {
    /// Drone rotation around X, degrees
    pub rotation_x: f32,
    /// Drone rotation around Y, degrees
    pub rotation_y: f32,
    /// Uniform drone scale
    pub scale: f32,
    pub camera_position: [f32; 3],
    /// Camera rotation around X, Y and Z, degrees
    pub camera_rotation: [f32; 3],
    pub show_axes: bool,
}

impl DroneControls {
    /// Controls matching the initial scene of `config`
    pub fn from_config(config: &BoltConfig) -> Self {
        Self {
            camera_position: config.camera_position.into(),
            show_axes: config.show_axes,
            ..Self::default()
        }
    }

    pub fn camera_position(&self) -> Vector3<f32> {
        self.camera_position.into()
    }

    /// Clamp every value into its slider range
    pub fn clamp(&mut self) {
        self.rotation_x = clamp_to(self.rotation_x, &ROTATION_RANGE);
        self.rotation_y = clamp_to(self.rotation_y, &ROTATION_RANGE);
        self.scale = clamp_to(self.scale, &SCALE_RANGE);
        for value in &mut self.camera_position {
            *value = clamp_to(*value, &CAMERA_POSITION_RANGE);
        }
        for value in &mut self.camera_rotation {
            *value = clamp_to(*value, &CAMERA_ROTATION_RANGE);
        }
    }
}

impl Default for DroneControls {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
            camera_position: [0.0, 0.0, 10.0],
            camera_rotation: [0.0; 3],
            show_axes: true,
        }
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let controls = DroneControls::default();
        let mut clamped = controls;
        clamped.clamp();
        assert_eq!(controls, clamped);
    }

    #[test]
    fn test_clamp() {
        let mut controls = DroneControls {
            rotation_x: 400.0,
            scale: -1.0,
            camera_position: [0.0, 25.0, -30.0],
            camera_rotation: [190.0, 0.0, -200.0],
            ..Default::default()
        };
        controls.clamp();

        assert_eq!(controls.rotation_x, 360.0);
        assert_eq!(controls.scale, 0.0);
        assert_eq!(controls.camera_position, [0.0, 20.0, -20.0]);
        assert_eq!(controls.camera_rotation, [180.0, 0.0, -180.0]);
    }

    #[test]
    fn test_from_config_uses_camera_position() {
        let config = BoltConfig::default().with_camera_position(Vector3::new(1.0, 2.0, 3.0));
        let controls = DroneControls::from_config(&config);
        assert_eq!(controls.camera_position, [1.0, 2.0, 3.0]);
        assert_eq!(controls.scale, 1.0);
    }
}

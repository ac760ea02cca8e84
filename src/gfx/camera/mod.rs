//! Scene cameras and projection helpers
//!
//! A [`Camera`] is attached to a scene node that provides its pose. Moving
//! the camera means transforming that node.

pub mod projection;
pub mod scene_camera;

pub use projection::{aspect_ratio_fix, AspectRatioPolicy, ProjectionConfig, OPENGL_TO_WGPU_MATRIX};
pub use scene_camera::{Camera, CameraView};

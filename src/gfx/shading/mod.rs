//! Phong lighting
//!
//! Lighting is evaluated in camera space: the light position and the mesh
//! transformation handed to the shader are both relative to the camera.

pub mod lighting;
pub mod phong;

pub use lighting::{light_position_in_camera, normal_matrix};
pub use phong::{PhongMaterial, PhongShader, PhongUniforms};

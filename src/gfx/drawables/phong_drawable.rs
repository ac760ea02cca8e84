use cgmath::Matrix4;

use super::Drawable;
use crate::gfx::{
    camera::CameraView,
    rendering::{MeshHandle, RenderBackend},
    scene::NodeId,
    shading::{light_position_in_camera, normal_matrix, PhongMaterial, PhongShader},
};

/// A mesh lit by a single point light with the Phong shader
#[derive(Debug, Clone)]
pub struct PhongDrawable {
    mesh: MeshHandle,
    light: NodeId,
    shader: PhongShader,
}

impl PhongDrawable {
    pub fn new(mesh: MeshHandle, light: NodeId, material: PhongMaterial) -> Self {
        Self {
            mesh,
            light,
            shader: PhongShader::new(material),
        }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Node whose position is used as the light position
    pub fn light(&self) -> NodeId {
        self.light
    }

    pub fn shader(&self) -> &PhongShader {
        &self.shader
    }
}

impl Drawable for PhongDrawable {
    fn draw(
        &mut self,
        transformation: Matrix4<f32>,
        camera: &CameraView<'_>,
        backend: &mut dyn RenderBackend,
    ) {
        let light_position = light_position_in_camera(camera, self.light);

        self.shader
            .set_light_position(light_position)
            .set_transformation_matrix(transformation)
            .set_normal_matrix(normal_matrix(&transformation))
            .set_projection_matrix(camera.projection_matrix())
            .draw(self.mesh, backend);
    }
}

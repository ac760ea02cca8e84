use cgmath::{Matrix3, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::rendering::{MeshHandle, RenderBackend};

/// Static surface and light colours of a Phong-shaded mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    pub ambient: Vector4<f32>,
    pub diffuse: Vector4<f32>,
    pub specular: Vector4<f32>,
    pub shininess: f32,
    pub light_color: Vector4<f32>,
}

impl PhongMaterial {
    pub fn with_diffuse(mut self, diffuse: Vector4<f32>) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: Vector4<f32>, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }
}

impl Default for PhongMaterial {
    /// Matte light blue
    fn default() -> Self {
        Self {
            ambient: Vector4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Vector4::new(0.4, 0.8, 1.0, 1.0),
            specular: Vector4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
            light_color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Uniform block of `phong.wgsl`
///
/// Matrices are column-major. `light_position` is in camera space with w = 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhongUniforms {
    pub transformation: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// mat3x3 columns, each padded to 16 bytes
    pub normal_matrix: [[f32; 4]; 3],
    pub light_position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub light_color: [f32; 4],
    pub shininess: f32,
    pub _padding: [f32; 3],
}

/// Uniform state of one Phong draw
///
/// Colours and shininess are set once; the transform-derived uniforms are
/// pushed every frame before [`PhongShader::draw`].
#[derive(Debug, Clone)]
pub struct PhongShader {
    material: PhongMaterial,
    light_position: Vector3<f32>,
    transformation: Matrix4<f32>,
    normal_matrix: Matrix3<f32>,
    projection: Matrix4<f32>,
}

impl PhongShader {
    pub fn new(material: PhongMaterial) -> Self {
        Self {
            material,
            light_position: Vector3::new(0.0, 0.0, 0.0),
            transformation: Matrix4::identity(),
            normal_matrix: Matrix3::identity(),
            projection: Matrix4::identity(),
        }
    }

    pub fn material(&self) -> &PhongMaterial {
        &self.material
    }

    pub fn set_ambient_color(&mut self, color: Vector4<f32>) -> &mut Self {
        self.material.ambient = color;
        self
    }

    pub fn set_diffuse_color(&mut self, color: Vector4<f32>) -> &mut Self {
        self.material.diffuse = color;
        self
    }

    pub fn set_specular_color(&mut self, color: Vector4<f32>) -> &mut Self {
        self.material.specular = color;
        self
    }

    pub fn set_shininess(&mut self, shininess: f32) -> &mut Self {
        self.material.shininess = shininess;
        self
    }

    pub fn set_light_color(&mut self, color: Vector4<f32>) -> &mut Self {
        self.material.light_color = color;
        self
    }

    /// Light position in camera space
    pub fn set_light_position(&mut self, position: Vector3<f32>) -> &mut Self {
        self.light_position = position;
        self
    }

    pub fn light_position(&self) -> Vector3<f32> {
        self.light_position
    }

    /// Model-view transformation of the mesh
    pub fn set_transformation_matrix(&mut self, transformation: Matrix4<f32>) -> &mut Self {
        self.transformation = transformation;
        self
    }

    pub fn set_normal_matrix(&mut self, normal_matrix: Matrix3<f32>) -> &mut Self {
        self.normal_matrix = normal_matrix;
        self
    }

    pub fn set_projection_matrix(&mut self, projection: Matrix4<f32>) -> &mut Self {
        self.projection = projection;
        self
    }

    /// Snapshot of the current state in GPU layout
    pub fn uniforms(&self) -> PhongUniforms {
        let n = self.normal_matrix;
        PhongUniforms {
            transformation: self.transformation.into(),
            projection: self.projection.into(),
            normal_matrix: [
                n.x.extend(0.0).into(),
                n.y.extend(0.0).into(),
                n.z.extend(0.0).into(),
            ],
            light_position: self.light_position.extend(1.0).into(),
            ambient: self.material.ambient.into(),
            diffuse: self.material.diffuse.into(),
            specular: self.material.specular.into(),
            light_color: self.material.light_color.into(),
            shininess: self.material.shininess,
            _padding: [0.0; 3],
        }
    }

    pub fn draw(&self, mesh: MeshHandle, backend: &mut dyn RenderBackend) {
        backend.draw_phong(mesh, &self.uniforms());
    }
}

use cgmath::{Matrix4, Vector3};

use crate::error::Result;
use crate::gfx::{
    rendering::{MeshCompiler, MeshHandle, RenderBackend},
    scene::LineVertex,
};

const X_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
const Y_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
const Z_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

/// World X/Y/Z axes drawn as red, green and blue arrows from the origin
///
/// The gizmo is not part of the scene graph; it is drawn with the camera's
/// view-projection matrix directly.
#[derive(Debug, Clone)]
pub struct AxisGizmo {
    length: f32,
    mesh: Option<MeshHandle>,
}

impl AxisGizmo {
    pub fn new(length: f32) -> Self {
        Self { length, mesh: None }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Line list: one shaft and two arrowhead strokes per axis
    pub fn vertices(&self) -> Vec<LineVertex> {
        let l = self.length;
        let head = l * 0.1;
        let mut vertices = Vec::with_capacity(18);

        let axes = [
            (Vector3::unit_x(), Vector3::unit_y(), X_COLOR),
            (Vector3::unit_y(), Vector3::unit_x(), Y_COLOR),
            (Vector3::unit_z(), Vector3::unit_y(), Z_COLOR),
        ];
        for (axis, side, color) in axes {
            let tip = axis * l;
            let back = axis * (l - head);
            let segments = [
                (Vector3::new(0.0, 0.0, 0.0), tip),
                (tip, back + side * head * 0.5),
                (tip, back - side * head * 0.5),
            ];
            for (from, to) in segments {
                vertices.push(LineVertex {
                    position: from.into(),
                    color,
                });
                vertices.push(LineVertex {
                    position: to.into(),
                    color,
                });
            }
        }

        vertices
    }

    pub fn compile(&mut self, compiler: &mut dyn MeshCompiler) -> Result<MeshHandle> {
        let handle = compiler.compile_lines(&self.vertices())?;
        self.mesh = Some(handle);
        Ok(handle)
    }

    /// Draws the axes in world space; does nothing before [`compile`](Self::compile)
    pub fn draw(&self, view_projection: Matrix4<f32>, backend: &mut dyn RenderBackend) {
        if let Some(mesh) = self.mesh {
            backend.draw_lines(mesh, view_projection);
        }
    }
}

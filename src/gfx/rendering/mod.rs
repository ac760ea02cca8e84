//! Rendering backend
//!
//! The scene core never talks to the GPU directly. Drawables issue calls on a
//! [`RenderBackend`] and meshes are uploaded through a [`MeshCompiler`]; the
//! wgpu [`RenderEngine`] implements the compiler and executes the calls
//! recorded in a [`FrameCommands`].

pub mod frame;
pub mod render_engine;

pub use frame::{DrawCommand, FrameCommands};
pub use render_engine::RenderEngine;

use cgmath::Matrix4;

use crate::error::Result;
use crate::gfx::{
    geometry::{CompileFlags, MeshData},
    scene::LineVertex,
    shading::PhongUniforms,
};

/// Handle to a mesh compiled by a [`MeshCompiler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) usize);

impl MeshHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Draw calls a frame is made of
pub trait RenderBackend {
    /// Draw a triangle mesh with the Phong shader
    fn draw_phong(&mut self, mesh: MeshHandle, uniforms: &PhongUniforms);

    /// Draw a line mesh with per-vertex colours
    fn draw_lines(&mut self, mesh: MeshHandle, transformation_projection: Matrix4<f32>);
}

/// Uploads geometry for drawing. Compiled meshes are immutable.
pub trait MeshCompiler {
    fn compile(&mut self, mesh: &MeshData, flags: CompileFlags) -> Result<MeshHandle>;

    fn compile_lines(&mut self, vertices: &[LineVertex]) -> Result<MeshHandle>;
}

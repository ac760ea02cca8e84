//! Test doubles for the importer, compiler and backend seams

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cgmath::Matrix4;

use crate::error::{BoltError, Result};
use crate::gfx::{
    camera::CameraView,
    drawables::Drawable,
    geometry::{CompileFlags, MeshData},
    rendering::{MeshCompiler, MeshHandle, RenderBackend},
    scene::LineVertex,
    shading::PhongUniforms,
};

/// Importer serving in-memory meshes
#[derive(Debug, Default)]
pub struct FakeImporter {
    pub meshes: Vec<MeshData>,
    pub fail_open: bool,
    pub opened: Option<PathBuf>,
}

impl FakeImporter {
    pub fn with_mesh(mesh: MeshData) -> Self {
        Self {
            meshes: vec![mesh],
            ..Default::default()
        }
    }
}

impl crate::gfx::import::Importer for FakeImporter {
    fn open_file(&mut self, path: &Path) -> Result<()> {
        if self.fail_open {
            return Err(BoltError::Open {
                path: path.to_path_buf(),
                message: "refused by test".to_string(),
            });
        }
        self.opened = Some(path.to_path_buf());
        Ok(())
    }

    fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    fn scene_count(&self) -> u32 {
        u32::from(!self.meshes.is_empty())
    }

    fn mesh_name(&self, index: u32) -> Option<&str> {
        self.meshes.get(index as usize).map(MeshData::name)
    }

    fn mesh(&self, index: u32) -> Option<MeshData> {
        self.meshes.get(index as usize).cloned()
    }
}

/// Compiler that hands out sequential handles and remembers what it saw
#[derive(Debug, Default)]
pub struct RecordingCompiler {
    pub meshes: Vec<(String, CompileFlags)>,
    /// Vertex count of every compiled line mesh
    pub line_meshes: Vec<usize>,
}

impl RecordingCompiler {
    pub fn call_count(&self) -> usize {
        self.meshes.len() + self.line_meshes.len()
    }
}

impl MeshCompiler for RecordingCompiler {
    fn compile(&mut self, mesh: &MeshData, flags: CompileFlags) -> Result<MeshHandle> {
        self.meshes.push((mesh.name().to_string(), flags));
        Ok(MeshHandle(self.call_count() - 1))
    }

    fn compile_lines(&mut self, vertices: &[LineVertex]) -> Result<MeshHandle> {
        self.line_meshes.push(vertices.len());
        Ok(MeshHandle(self.call_count() - 1))
    }
}

/// Backend that only records draw calls
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub phong: Vec<(MeshHandle, PhongUniforms)>,
    pub lines: Vec<(MeshHandle, Matrix4<f32>)>,
}

impl RecordingBackend {
    pub fn call_count(&self) -> usize {
        self.phong.len() + self.lines.len()
    }
}

impl RenderBackend for RecordingBackend {
    fn draw_phong(&mut self, mesh: MeshHandle, uniforms: &PhongUniforms) {
        self.phong.push((mesh, *uniforms));
    }

    fn draw_lines(&mut self, mesh: MeshHandle, transformation_projection: Matrix4<f32>) {
        self.lines.push((mesh, transformation_projection));
    }
}

/// Drawable that records the transformations it is drawn with
#[derive(Debug, Clone, Default)]
pub struct TransformProbe {
    seen: Rc<RefCell<Vec<Matrix4<f32>>>>,
}

impl TransformProbe {
    pub fn transformations(&self) -> Vec<Matrix4<f32>> {
        self.seen.borrow().clone()
    }
}

impl Drawable for TransformProbe {
    fn draw(
        &mut self,
        transformation: Matrix4<f32>,
        _camera: &CameraView<'_>,
        _backend: &mut dyn RenderBackend,
    ) {
        self.seen.borrow_mut().push(transformation);
    }
}

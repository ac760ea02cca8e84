//! Model import
//!
//! An [`Importer`] opens a model file and hands out its meshes as
//! [`MeshData`]. [`ObjImporter`] reads Wavefront OBJ through `tobj`.

pub mod obj;

pub use obj::ObjImporter;

use std::path::Path;

use crate::error::Result;
use crate::gfx::geometry::MeshData;

pub trait Importer {
    /// Open a model file, replacing whatever was open before
    fn open_file(&mut self, path: &Path) -> Result<()>;

    fn mesh_count(&self) -> u32;

    fn scene_count(&self) -> u32;

    fn mesh_name(&self, index: u32) -> Option<&str>;

    /// Mesh at `index`, `None` if there is no such mesh
    fn mesh(&self, index: u32) -> Option<MeshData>;
}

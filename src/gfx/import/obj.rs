use std::path::Path;

use cgmath::Vector3;

use super::Importer;
use crate::error::{BoltError, Result};
use crate::gfx::geometry::MeshData;

/// Wavefront OBJ importer
///
/// Faces are triangulated and every vertex gets a single index shared by all
/// attributes. OBJ has no scene hierarchy, so a file with models counts as one
/// scene.
#[derive(Debug, Default)]
pub struct ObjImporter {
    meshes: Vec<MeshData>,
}

impl ObjImporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Importer for ObjImporter {
    fn open_file(&mut self, path: &Path) -> Result<()> {
        self.meshes.clear();

        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| BoltError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Err(e) = materials {
            // materials are not used for shading
            log::debug!("No materials for {}: {}", path.display(), e);
        }

        self.meshes = models
            .into_iter()
            .enumerate()
            .map(|(i, model)| {
                let name = if model.name.is_empty() {
                    format!("mesh_{}", i)
                } else {
                    model.name
                };
                convert_mesh(name, model.mesh)
            })
            .collect();

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

fn convert_mesh(name: String, mesh: tobj::Mesh) -> MeshData {
    let positions = to_vectors(&mesh.positions);
    let normals = to_vectors(&mesh.normals);

    let mut data = MeshData::new(name).with_indices(mesh.indices);
    // with a single index, normals line up with positions or are missing
    if !normals.is_empty() && normals.len() == positions.len() {
        data = data.with_normals(normals);
    }
    data.with_positions(positions)
}

fn to_vectors(flat: &[f32]) -> Vec<Vector3<f32>> {
    flat.chunks_exact(3)
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .collect()
}

//! Turns imported [`MeshData`] into the interleaved vertex stream the Phong
//! pipeline draws.

use cgmath::{InnerSpace, Vector3, Zero};

use super::{MeshAttribute, MeshData};
use crate::error::{BoltError, Result};
use crate::gfx::scene::vertex::Vertex3D;

/// Options for compiling a mesh for drawing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileFlags {
    /// Replace missing normals with one normal per face. The mesh is
    /// de-indexed so every triangle gets its own three vertices.
    pub generate_flat_normals: bool,
}

impl CompileFlags {
    /// Flags needed to light `mesh` with Phong shading
    pub fn for_mesh(mesh: &MeshData) -> Self {
        Self {
            generate_flat_normals: !mesh.has_attribute(MeshAttribute::Normal),
        }
    }
}

/// Builds vertices and triangle indices for `mesh`.
///
/// Without indices the positions are read as a plain triangle list.
pub fn compile_vertices(
    mesh: &MeshData,
    flags: CompileFlags,
) -> Result<(Vec<Vertex3D>, Vec<u32>)> {
    let positions = mesh
        .positions()
        .ok_or_else(|| BoltError::MissingAttribute {
            mesh: mesh.name().to_string(),
            attribute: MeshAttribute::Position,
        })?;

    let indices: Vec<u32> = if mesh.is_indexed() {
        mesh.indices().to_vec()
    } else {
        (0..positions.len() as u32).collect()
    };

    if indices.len() % 3 != 0 {
        return Err(invalid(
            mesh,
            format!("{} indices is not a whole number of triangles", indices.len()),
        ));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(invalid(
            mesh,
            format!("index {} out of range for {} vertices", bad, positions.len()),
        ));
    }

    if flags.generate_flat_normals {
        return Ok(flat_shaded(positions, &indices));
    }

    let normals = mesh
        .normals()
        .ok_or_else(|| BoltError::MissingAttribute {
            mesh: mesh.name().to_string(),
            attribute: MeshAttribute::Normal,
        })?;
    if normals.len() != positions.len() {
        return Err(invalid(
            mesh,
            format!("{} normals for {} positions", normals.len(), positions.len()),
        ));
    }

    let vertices = positions
        .iter()
        .zip(normals)
        .map(|(p, n)| Vertex3D {
            position: (*p).into(),
            normal: (*n).into(),
        })
        .collect();

    Ok((vertices, indices))
}

/// Normal of the triangle `a, b, c` with counter-clockwise winding
pub fn face_normal(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> Vector3<f32> {
    let normal = (b - a).cross(c - a);
    if normal.magnitude2() > 0.0 {
        normal.normalize()
    } else {
        // degenerate triangle
        Vector3::zero()
    }
}

fn flat_shaded(positions: &[Vector3<f32>], indices: &[u32]) -> (Vec<Vertex3D>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(indices.len());

    for triangle in indices.chunks(3) {
        let corners = [
            positions[triangle[0] as usize],
            positions[triangle[1] as usize],
            positions[triangle[2] as usize],
        ];
        let normal = face_normal(corners[0], corners[1], corners[2]);

        for corner in corners {
            vertices.push(Vertex3D {
                position: corner.into(),
                normal: normal.into(),
            });
        }
    }

    let indices = (0..vertices.len() as u32).collect();
    (vertices, indices)
}

fn invalid(mesh: &MeshData, message: String) -> BoltError {
    BoltError::InvalidMesh {
        mesh: mesh.name().to_string(),
        message,
    }
}

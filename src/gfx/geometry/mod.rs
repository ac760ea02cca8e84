//! # Imported Geometry
//!
//! This module holds the CPU-side mesh data handed over by an importer, the
//! bounding-box scanner used for diagnostics and the helpers that turn mesh
//! data into GPU vertex streams.
//!
//! ## Usage
//!
//! ```rust
//! use bolt::gfx::geometry::{bounds, MeshAttribute, MeshData};
//! use cgmath::Vector3;
//!
//! let mesh = MeshData::new("tri")
//!     .with_positions(vec![
//!         Vector3::new(0.0, 0.0, 0.0),
//!         Vector3::new(1.0, 0.0, 0.0),
//!         Vector3::new(0.0, 1.0, 0.0),
//!     ])
//!     .with_indices(vec![0, 1, 2]);
//!
//! assert!(mesh.has_attribute(MeshAttribute::Position));
//! assert!(!mesh.has_attribute(MeshAttribute::Normal));
//!
//! let bounds = bounds::scan_mesh(&mesh).unwrap();
//! assert_eq!(bounds.max, Vector3::new(1.0, 1.0, 0.0));
//! ```

pub mod bounds;
pub mod mesh_tools;

pub use bounds::BoundingBox;
pub use mesh_tools::{compile_vertices, CompileFlags};

use std::fmt;

use cgmath::Vector3;

/// Vertex attributes an imported mesh may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshAttribute {
    Position,
    Normal,
}

impl fmt::Display for MeshAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshAttribute::Position => write!(f, "position"),
            MeshAttribute::Normal => write!(f, "normal"),
        }
    }
}

/// Imported mesh geometry, read-only once compiled for drawing
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    name: String,
    positions: Option<Vec<Vector3<f32>>>,
    normals: Option<Vec<Vector3<f32>>>,
    /// Triangle list indices; empty means the positions are a plain triangle list
    indices: Vec<u32>,
}

impl MeshData {
    /// Create an empty mesh with no attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_positions(mut self, positions: Vec<Vector3<f32>>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn with_normals(mut self, normals: Vec<Vector3<f32>>) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the given attribute is present (it may still be empty)
    pub fn has_attribute(&self, attribute: MeshAttribute) -> bool {
        match attribute {
            MeshAttribute::Position => self.positions.is_some(),
            MeshAttribute::Normal => self.normals.is_some(),
        }
    }

    /// Vertex positions, `None` if the attribute is absent
    pub fn positions(&self) -> Option<&[Vector3<f32>]> {
        self.positions.as_deref()
    }

    /// Vertex normals, `None` if the attribute is absent
    pub fn normals(&self) -> Option<&[Vector3<f32>]> {
        self.normals.as_deref()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of vertices in the position attribute
    pub fn vertex_count(&self) -> usize {
        self.positions.as_ref().map_or(0, Vec::len)
    }

    /// Number of triangles the mesh draws
    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len() / 3
        } else {
            self.vertex_count() / 3
        }
    }
}

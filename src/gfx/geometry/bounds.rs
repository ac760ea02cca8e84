//! Axis-aligned bounds of imported geometry
//!
//! The scan runs once at startup and its result is only logged.

use cgmath::{InnerSpace, Vector3};

use super::{MeshAttribute, MeshData};
use crate::error::{BoltError, Result};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Componentwise min/max over all positions, `None` for empty input
    pub fn from_positions(positions: &[Vector3<f32>]) -> Option<Self> {
        let (first, rest) = positions.split_first()?;

        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self::new(min, max))
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f32 {
        self.size().magnitude()
    }

    /// Whether `point` lies inside the box, faces included
    pub fn contains(&self, point: Vector3<f32>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(a.x, b.y, b.z),
            Vector3::new(b.x, b.y, b.z),
        ]
    }

    /// Distance from `point` to the farthest corner
    pub fn farthest_distance_from(&self, point: Vector3<f32>) -> f32 {
        self.corners()
            .iter()
            .map(|corner| (*corner - point).magnitude())
            .fold(0.0, f32::max)
    }
}

/// Scans the position attribute of `mesh`.
///
/// Fails if the attribute is absent or holds no vertices.
pub fn scan_mesh(mesh: &MeshData) -> Result<BoundingBox> {
    let positions = mesh
        .positions()
        .ok_or_else(|| BoltError::MissingAttribute {
            mesh: mesh.name().to_string(),
            attribute: MeshAttribute::Position,
        })?;

    BoundingBox::from_positions(positions)
        .ok_or_else(|| BoltError::EmptyMesh(mesh.name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_three_points() {
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, -1.0, 3.0),
            Vector3::new(1.0, 5.0, -2.0),
        ];
        let bounds = BoundingBox::from_positions(&positions).unwrap();

        assert_eq!(bounds.min, Vector3::new(0.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vector3::new(2.0, 5.0, 3.0));
        assert!(positions.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_single_point_is_degenerate_box() {
        let p = Vector3::new(1.5, -2.0, 4.0);
        let bounds = BoundingBox::from_positions(&[p]).unwrap();
        assert_eq!(bounds.min, p);
        assert_eq!(bounds.max, p);
        assert_eq!(bounds.diagonal(), 0.0);
    }

    #[test]
    fn test_empty_positions() {
        assert!(BoundingBox::from_positions(&[]).is_none());
    }

    #[test]
    fn test_extents_are_attained() {
        let positions = [
            Vector3::new(-3.0, 0.5, 0.0),
            Vector3::new(4.0, 0.0, 1.0),
            Vector3::new(0.0, 7.0, -6.0),
            Vector3::new(1.0, -2.0, 9.0),
        ];
        let bounds = BoundingBox::from_positions(&positions).unwrap();

        for axis in 0..3 {
            assert!(positions.iter().any(|p| p[axis] == bounds.min[axis]));
            assert!(positions.iter().any(|p| p[axis] == bounds.max[axis]));
        }
        assert_eq!(bounds.center(), Vector3::new(0.5, 2.5, 1.5));
        assert_eq!(bounds.size(), Vector3::new(7.0, 9.0, 15.0));
    }

    #[test]
    fn test_farthest_corner_distance() {
        let bounds = BoundingBox::new(
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let d = bounds.farthest_distance_from(Vector3::new(0.0, 0.0, 10.0));
        let expected = (1.0f32 + 1.0 + 121.0).sqrt();
        assert!((d - expected).abs() < 1e-5);
    }

    #[test]
    fn test_scan_mesh_without_positions_fails() {
        let mesh = MeshData::new("no_positions");
        match scan_mesh(&mesh) {
            Err(BoltError::MissingAttribute { mesh, attribute }) => {
                assert_eq!(mesh, "no_positions");
                assert_eq!(attribute, MeshAttribute::Position);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_scan_mesh_with_empty_positions_fails() {
        let mesh = MeshData::new("empty").with_positions(Vec::new());
        assert!(matches!(scan_mesh(&mesh), Err(BoltError::EmptyMesh(_))));
    }
}

//! # Transform Nodes
//!
//! A [`Node`] is one entry of the scene hierarchy. It only knows its own local
//! transformation and its links; absolute transformations are composed by the
//! owning [`Scene`](super::Scene) at query time.

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};

/// Handle to a node inside a [`Scene`](super::Scene) arena.
///
/// Handles are only created by the scene that owns the node and stay valid for
/// the scene's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    /// Index of the node in its scene's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the transform hierarchy.
///
/// All elementary operations left-multiply the local transformation, so a
/// call sequence reads in the order the operations are applied to a point:
///
/// ```
/// use bolt::gfx::scene::Scene;
/// use cgmath::{Deg, Vector3};
///
/// let mut scene = Scene::new();
/// let root = scene.root();
/// let id = scene.add_node(root);
/// scene
///     .node_mut(id)
///     .reset_transformation()
///     .rotate_y(Deg(90.0))
///     .translate(Vector3::new(0.0, 0.0, 10.0));
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    transformation: Matrix4<f32>,
}

impl Node {
    pub(super) fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transformation: Matrix4::identity(),
        }
    }

    /// Parent handle, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local transformation relative to the parent.
    pub fn transformation(&self) -> Matrix4<f32> {
        self.transformation
    }

    /// Replaces the local transformation outright.
    pub fn set_transformation(&mut self, transformation: Matrix4<f32>) -> &mut Self {
        self.transformation = transformation;
        self
    }

    /// Resets the local transformation to identity.
    pub fn reset_transformation(&mut self) -> &mut Self {
        self.transformation = Matrix4::identity();
        self
    }

    /// Applies a translation after the current transformation.
    pub fn translate(&mut self, translation: Vector3<f32>) -> &mut Self {
        self.transform(Matrix4::from_translation(translation))
    }

    /// Applies a rotation around the X axis after the current transformation.
    pub fn rotate_x(&mut self, angle: impl Into<Rad<f32>>) -> &mut Self {
        self.transform(Matrix4::from_angle_x(angle.into()))
    }

    /// Applies a rotation around the Y axis after the current transformation.
    pub fn rotate_y(&mut self, angle: impl Into<Rad<f32>>) -> &mut Self {
        self.transform(Matrix4::from_angle_y(angle.into()))
    }

    /// Applies a rotation around the Z axis after the current transformation.
    pub fn rotate_z(&mut self, angle: impl Into<Rad<f32>>) -> &mut Self {
        self.transform(Matrix4::from_angle_z(angle.into()))
    }

    /// Applies a non-uniform scaling after the current transformation.
    pub fn scale(&mut self, scale: Vector3<f32>) -> &mut Self {
        self.transform(Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z))
    }

    /// Left-multiplies the local transformation by `matrix`.
    pub fn transform(&mut self, matrix: Matrix4<f32>) -> &mut Self {
        self.transformation = matrix * self.transformation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, EuclideanSpace, Point3, Transform};

    fn apply(node: &Node, p: [f32; 3]) -> Point3<f32> {
        node.transformation()
            .transform_point(Point3::from_vec(Vector3::from(p)))
    }

    #[test]
    fn test_new_node_is_identity() {
        let node = Node::new(None);
        assert_eq!(node.transformation(), Matrix4::identity());
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_operations_apply_in_call_order() {
        // scale first, then translate: (1,0,0) -> (2,0,0) -> (2,3,0)
        let mut node = Node::new(None);
        node.scale(Vector3::new(2.0, 2.0, 2.0))
            .translate(Vector3::new(0.0, 3.0, 0.0));
        let p = apply(&node, [1.0, 0.0, 0.0]);
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!((p.y - 3.0).abs() < 1e-5);

        // translate first, then scale: (1,0,0) -> (1,3,0) -> (2,6,0)
        let mut node = Node::new(None);
        node.translate(Vector3::new(0.0, 3.0, 0.0))
            .scale(Vector3::new(2.0, 2.0, 2.0));
        let p = apply(&node, [1.0, 0.0, 0.0]);
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!((p.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_is_left_multiplied() {
        let mut node = Node::new(None);
        node.translate(Vector3::new(1.0, 0.0, 0.0)).rotate_z(Deg(90.0));
        let expected = Matrix4::from_angle_z(Deg(90.0))
            * Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(node.transformation(), expected);
    }

    #[test]
    fn test_reset_and_set_transformation() {
        let mut node = Node::new(None);
        node.translate(Vector3::new(4.0, 5.0, 6.0));
        node.reset_transformation();
        assert_eq!(node.transformation(), Matrix4::identity());

        let m = Matrix4::from_scale(3.0);
        node.rotate_x(Deg(30.0)).set_transformation(m);
        assert_eq!(node.transformation(), m);
    }
}

//! # Drawables
//!
//! A [`DrawableGroup`] binds drawables to scene nodes. The group owns only the
//! bindings: the nodes stay in the [`Scene`](crate::gfx::scene::Scene) and
//! meshes stay with the compiler that produced them, referenced by handle.
//!
//! Cameras walk the group in insertion order and hand every drawable the
//! transformation of its node relative to the camera.

pub mod phong_drawable;

pub use phong_drawable::PhongDrawable;

use cgmath::Matrix4;

use crate::gfx::{camera::CameraView, rendering::RenderBackend, scene::NodeId};

/// Something a camera can draw
pub trait Drawable {
    /// Issue draw calls for one frame.
    ///
    /// `transformation` maps the node's local space into camera space.
    fn draw(
        &mut self,
        transformation: Matrix4<f32>,
        camera: &CameraView<'_>,
        backend: &mut dyn RenderBackend,
    );
}

impl<F> Drawable for F
where
    F: FnMut(Matrix4<f32>, &CameraView<'_>, &mut dyn RenderBackend),
{
    fn draw(
        &mut self,
        transformation: Matrix4<f32>,
        camera: &CameraView<'_>,
        backend: &mut dyn RenderBackend,
    ) {
        self(transformation, camera, backend)
    }
}

/// Identifies a binding inside its [`DrawableGroup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(usize);

struct Binding {
    id: DrawableId,
    node: NodeId,
    drawable: Box<dyn Drawable>,
}

/// Ordered set of node/drawable bindings
#[derive(Default)]
pub struct DrawableGroup {
    bindings: Vec<Binding>,
    next_id: usize,
}

impl DrawableGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `drawable` to `node`; it is drawn after everything added before it
    pub fn add(&mut self, node: NodeId, drawable: impl Drawable + 'static) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        self.bindings.push(Binding {
            id,
            node,
            drawable: Box::new(drawable),
        });
        id
    }

    /// Remove a binding, returning the drawable. The node is left untouched.
    pub fn remove(&mut self, id: DrawableId) -> Option<Box<dyn Drawable>> {
        let index = self.bindings.iter().position(|b| b.id == id)?;
        Some(self.bindings.remove(index).drawable)
    }

    pub fn contains(&self, id: DrawableId) -> bool {
        self.bindings.iter().any(|b| b.id == id)
    }

    /// Node a binding draws at
    pub fn node(&self, id: DrawableId) -> Option<NodeId> {
        self.bindings.iter().find(|b| b.id == id).map(|b| b.node)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in draw order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut dyn Drawable)> + '_ {
        self.bindings
            .iter_mut()
            .map(|b| (b.node, b.drawable.as_mut() as &mut dyn Drawable))
    }
}

impl std::fmt::Debug for DrawableGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|b| (b.id, b.node)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Scene;
    use crate::test_support::TransformProbe;
    use cgmath::SquareMatrix;

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add_node(root);
        let b = scene.add_node(root);

        let mut group = DrawableGroup::new();
        let first = group.add(a, TransformProbe::default());
        let second = group.add(b, TransformProbe::default());

        assert_eq!(group.len(), 2);
        assert_eq!(group.node(second), Some(b));

        assert!(group.remove(first).is_some());
        assert!(!group.contains(first));
        assert!(group.remove(first).is_none());
        assert_eq!(group.len(), 1);

        // the node outlives its binding
        assert_eq!(scene.parent(a), Some(root));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut scene = Scene::new();
        let root = scene.root();
        let node = scene.add_node(root);

        let mut group = DrawableGroup::new();
        let first = group.add(node, TransformProbe::default());
        group.remove(first);
        let second = group.add(node, TransformProbe::default());

        assert_ne!(first, second);
        assert!(!group.contains(first));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let nodes: Vec<_> = (0..3).map(|_| scene.add_node(root)).collect();

        let mut group = DrawableGroup::new();
        for &node in nodes.iter().rev() {
            group.add(node, TransformProbe::default());
        }

        let order: Vec<_> = group.iter_mut().map(|(node, _)| node).collect();
        let expected: Vec<_> = nodes.iter().rev().copied().collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_closures_are_drawables() {
        let scene = Scene::new();
        let view = CameraView::new(&scene, Matrix4::identity(), Matrix4::identity());
        let mut backend = crate::test_support::RecordingBackend::default();

        let mut calls = 0;
        let mut drawable =
            |_: Matrix4<f32>, _: &CameraView<'_>, _: &mut dyn RenderBackend| calls += 1;
        Drawable::draw(&mut drawable, Matrix4::identity(), &view, &mut backend);
        Drawable::draw(&mut drawable, Matrix4::identity(), &view, &mut backend);

        assert_eq!(calls, 2);
    }
}

use cgmath::{Matrix4, SquareMatrix, Vector2};

use super::projection::{aspect_ratio_fix, AspectRatioPolicy};
use crate::gfx::{
    drawables::DrawableGroup,
    rendering::RenderBackend,
    scene::{NodeId, Scene},
};

/// Camera attached to a scene node.
///
/// The node provides the camera pose; the camera itself only owns the
/// projection. The effective projection is recomputed when the viewport, the
/// policy or the raw projection changes, never per frame.
#[derive(Debug, Clone)]
pub struct Camera {
    node: NodeId,
    aspect_ratio_policy: AspectRatioPolicy,
    raw_projection: Matrix4<f32>,
    projection: Matrix4<f32>,
    viewport: Vector2<u32>,
}

impl Camera {
    /// Creates a camera looking down -Z from `node`, with identity projection
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            aspect_ratio_policy: AspectRatioPolicy::default(),
            raw_projection: Matrix4::identity(),
            projection: Matrix4::identity(),
            viewport: Vector2::new(0, 0),
        }
    }

    /// Node providing the camera pose
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn aspect_ratio_policy(&self) -> AspectRatioPolicy {
        self.aspect_ratio_policy
    }

    pub fn set_aspect_ratio_policy(&mut self, policy: AspectRatioPolicy) -> &mut Self {
        self.aspect_ratio_policy = policy;
        self.fix_aspect_ratio();
        self
    }

    /// Sets the base projection the aspect ratio policy is applied to
    pub fn set_projection_matrix(&mut self, projection: Matrix4<f32>) -> &mut Self {
        self.raw_projection = projection;
        self.fix_aspect_ratio();
        self
    }

    /// Sets the viewport size and recomputes the effective projection.
    ///
    /// Has to be called on every resize, otherwise the image is distorted.
    pub fn set_viewport(&mut self, viewport: Vector2<u32>) -> &mut Self {
        self.viewport = viewport;
        self.fix_aspect_ratio();
        log::debug!(
            "Camera viewport {}x{}, projection x/y scale {:.4}/{:.4}",
            viewport.x,
            viewport.y,
            self.projection.x.x,
            self.projection.y.y
        );
        self
    }

    pub fn viewport(&self) -> Vector2<u32> {
        self.viewport
    }

    /// Projection with the aspect ratio correction applied
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    /// Maps world space to camera space: inverse of the node's absolute
    /// transformation
    pub fn camera_matrix(&self, scene: &Scene) -> Matrix4<f32> {
        scene
            .absolute_transformation(self.node)
            .invert()
            // degenerate pose (zero scale somewhere up the chain)
            .unwrap_or_else(Matrix4::identity)
    }

    /// Combined projection and camera matrix for world-space geometry
    pub fn view_projection(&self, scene: &Scene) -> Matrix4<f32> {
        self.projection * self.camera_matrix(scene)
    }

    /// Draws every drawable of `drawables` in registration order.
    ///
    /// Each drawable receives its node's transformation relative to the
    /// camera (camera matrix times absolute transformation).
    pub fn draw(
        &self,
        scene: &Scene,
        drawables: &mut DrawableGroup,
        backend: &mut dyn RenderBackend,
    ) {
        let view = CameraView::new(scene, self.camera_matrix(scene), self.projection);

        for (node, drawable) in drawables.iter_mut() {
            let transformation = view.camera_matrix * scene.absolute_transformation(node);
            drawable.draw(transformation, &view, backend);
        }
    }

    fn fix_aspect_ratio(&mut self) {
        self.projection =
            aspect_ratio_fix(self.aspect_ratio_policy, &self.raw_projection, self.viewport)
                * self.raw_projection;
    }
}

/// What a drawable sees of the active camera during a draw pass
#[derive(Debug, Clone, Copy)]
pub struct CameraView<'a> {
    scene: &'a Scene,
    camera_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl<'a> CameraView<'a> {
    pub fn new(
        scene: &'a Scene,
        camera_matrix: Matrix4<f32>,
        projection_matrix: Matrix4<f32>,
    ) -> Self {
        Self {
            scene,
            camera_matrix,
            projection_matrix,
        }
    }

    /// World to camera space
    pub fn camera_matrix(&self) -> Matrix4<f32> {
        self.camera_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// Read access to the scene, for looking up other nodes such as lights
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }
}

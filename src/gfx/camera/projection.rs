use cgmath::{perspective, Deg, Matrix4, SquareMatrix, Vector2};

/// Converts OpenGL clip space (z in -1..1) to wgpu clip space (z in 0..1).
///
/// Cameras work in OpenGL conventions; the render engine applies this when
/// uploading projection matrices.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// How a projection adapts to a viewport whose aspect ratio differs from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioPolicy {
    /// Stretch the projection to fill the viewport
    #[default]
    NotPreserved,
    /// Widen the frustum on the larger side so nothing gets stretched
    Extend,
    /// Crop the frustum on the smaller side so nothing gets stretched
    Clip,
}

/// Scaling that corrects `projection` for `viewport` under `policy`.
///
/// Returns identity for [`AspectRatioPolicy::NotPreserved`], an empty viewport
/// or a projection with a zero X/Y scale.
pub fn aspect_ratio_fix(
    policy: AspectRatioPolicy,
    projection: &Matrix4<f32>,
    viewport: Vector2<u32>,
) -> Matrix4<f32> {
    let scale = Vector2::new(projection.x.x.abs(), projection.y.y.abs());
    if policy == AspectRatioPolicy::NotPreserved
        || scale.x == 0.0
        || scale.y == 0.0
        || viewport.x == 0
        || viewport.y == 0
    {
        return Matrix4::identity();
    }

    let relative = Vector2::new(viewport.x as f32 * scale.x, viewport.y as f32 * scale.y);

    // Extend scales the larger side down, Clip scales the smaller side up
    let (sx, sy) = if (relative.x > relative.y) == (policy == AspectRatioPolicy::Extend) {
        (relative.y / relative.x, 1.0)
    } else {
        (1.0, relative.x / relative.y)
    };

    Matrix4::from_nonuniform_scale(sx, sy, 1.0)
}

/// Perspective projection parameters
///
/// The far plane has to cover the whole scene: geometry beyond it is clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view
    pub fov_y: Deg<f32>,
    pub near: f32,
    pub far: f32,
}

impl ProjectionConfig {
    pub const DEFAULT_FAR: f32 = 100.0;

    /// Far plane sized for a large scene
    pub const LARGE_SCENE_FAR: f32 = 5000.0;

    pub fn with_far(mut self, far: f32) -> Self {
        self.far = far;
        self
    }

    /// Perspective matrix with a square aspect ratio; the camera's aspect
    /// ratio policy adapts it to the viewport.
    pub fn matrix(&self) -> Matrix4<f32> {
        perspective(self.fov_y, 1.0, self.near, self.far)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: Deg(60.0),
            near: 0.01,
            far: Self::DEFAULT_FAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_preserved_is_identity() {
        let p = ProjectionConfig::default().matrix();
        let fix =
            aspect_ratio_fix(AspectRatioPolicy::NotPreserved, &p, Vector2::new(800, 600));
        assert_eq!(fix, Matrix4::identity());
    }

    #[test]
    fn test_empty_viewport_is_identity() {
        let p = ProjectionConfig::default().matrix();
        let fix = aspect_ratio_fix(AspectRatioPolicy::Extend, &p, Vector2::new(0, 600));
        assert_eq!(fix, Matrix4::identity());
    }

    #[test]
    fn test_extend_shrinks_wider_side() {
        let p = ProjectionConfig::default().matrix();

        let wide = aspect_ratio_fix(AspectRatioPolicy::Extend, &p, Vector2::new(800, 400));
        assert!((wide.x.x - 0.5).abs() < 1e-6);
        assert_eq!(wide.y.y, 1.0);

        let tall = aspect_ratio_fix(AspectRatioPolicy::Extend, &p, Vector2::new(400, 800));
        assert_eq!(tall.x.x, 1.0);
        assert!((tall.y.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clip_grows_narrower_side() {
        let p = ProjectionConfig::default().matrix();
        let wide = aspect_ratio_fix(AspectRatioPolicy::Clip, &p, Vector2::new(800, 400));
        assert_eq!(wide.x.x, 1.0);
        assert!((wide.y.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_extend_matches_perspective_with_viewport_aspect() {
        // Extending a square projection to 16:9 is the same as building the
        // perspective with that aspect ratio directly.
        let config = ProjectionConfig::default();
        let fix = aspect_ratio_fix(
            AspectRatioPolicy::Extend,
            &config.matrix(),
            Vector2::new(1600, 900),
        );
        let fixed = fix * config.matrix();
        let direct = perspective(config.fov_y, 1600.0 / 900.0, config.near, config.far);

        assert!((fixed.x.x - direct.x.x).abs() < 1e-5);
        assert!((fixed.y.y - direct.y.y).abs() < 1e-5);
        assert_eq!(fixed.z, direct.z);
        assert_eq!(fixed.w, direct.w);
    }
}

use cgmath::{EuclideanSpace, Matrix3, Matrix4, Point3, Transform, Vector3};

use crate::gfx::{camera::CameraView, scene::NodeId};

/// Position of `light` in the space of the camera drawing the frame
pub fn light_position_in_camera(camera: &CameraView<'_>, light: NodeId) -> Vector3<f32> {
    let world = camera.scene().absolute_translation(light);
    camera
        .camera_matrix()
        .transform_point(Point3::from_vec(world))
        .to_vec()
}

/// Rotation and scaling part of `transformation` (its upper-left 3x3)
pub fn normal_matrix(transformation: &Matrix4<f32>) -> Matrix3<f32> {
    Matrix3::from_cols(
        transformation.x.truncate(),
        transformation.y.truncate(),
        transformation.z.truncate(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Scene;
    use cgmath::{Deg, InnerSpace, SquareMatrix};

    fn scene_with_light() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let root = scene.root();
        let light = scene.add_node(root);
        scene
            .node_mut(light)
            .translate(Vector3::new(3.0, 5.0, 8.0));
        (scene, light)
    }

    #[test]
    fn test_light_with_identity_camera() {
        let (scene, light) = scene_with_light();
        let view = CameraView::new(&scene, Matrix4::identity(), Matrix4::identity());

        let position = light_position_in_camera(&view, light);
        assert!((position - Vector3::new(3.0, 5.0, 8.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_light_with_translated_camera() {
        let (scene, light) = scene_with_light();
        // camera at (0, 0, 10)
        let camera_matrix = Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0));
        let view = CameraView::new(&scene, camera_matrix, Matrix4::identity());

        let position = light_position_in_camera(&view, light);
        assert!((position - Vector3::new(3.0, 5.0, -2.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_light_with_rotated_camera() {
        let (scene, light) = scene_with_light();
        // camera turned 90 degrees around Y: world +X ends up behind it
        let pose = Matrix4::from_angle_y(Deg(90.0));
        let camera_matrix = pose.invert().unwrap();
        let view = CameraView::new(&scene, camera_matrix, Matrix4::identity());

        let position = light_position_in_camera(&view, light);
        assert!((position - Vector3::new(-8.0, 5.0, 3.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_light_follows_parent_node() {
        let (mut scene, light) = scene_with_light();
        let root = scene.root();
        scene
            .node_mut(root)
            .translate(Vector3::new(1.0, 0.0, 0.0));
        let view = CameraView::new(&scene, Matrix4::identity(), Matrix4::identity());

        let position = light_position_in_camera(&view, light);
        assert!((position - Vector3::new(4.0, 5.0, 8.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_normal_matrix_drops_translation() {
        let transformation = Matrix4::from_translation(Vector3::new(7.0, 8.0, 9.0))
            * Matrix4::from_nonuniform_scale(2.0, 3.0, 4.0);
        let normal = normal_matrix(&transformation);

        assert_eq!(normal, Matrix3::from_diagonal(Vector3::new(2.0, 3.0, 4.0)));
    }
}

//! # Frame driver
//!
//! [`Bolt`] owns the scene, the camera, the drawables and the axis gizmo. It
//! is built once by [`Bolt::init`] and then driven by the application: one
//! [`update`](Bolt::update) and one [`draw_frame`](Bolt::draw_frame) per frame,
//! plus [`resize`](Bolt::resize) whenever the window changes size.

use cgmath::{Deg, Matrix4, Vector2, Vector3};

use crate::config::BoltConfig;
use crate::controls::DroneControls;
use crate::error::{BoltError, Result};
use crate::gfx::{
    camera::{AspectRatioPolicy, Camera, ProjectionConfig},
    drawables::{DrawableGroup, PhongDrawable},
    geometry::{bounds, BoundingBox, CompileFlags},
    gizmos::AxisGizmo,
    import::Importer,
    rendering::{MeshCompiler, MeshHandle, RenderBackend},
    scene::{NodeId, Scene},
};

pub struct Bolt {
    scene: Scene,
    drone: NodeId,
    light: NodeId,
    camera: Camera,
    drawables: DrawableGroup,
    axes: AxisGizmo,
    show_axes: bool,
    drone_mesh: MeshHandle,
    bounds: BoundingBox,
}

impl Bolt {
    /// Loads the model and builds the scene.
    ///
    /// Nothing is compiled unless the first mesh exists and has positions.
    pub fn init(
        importer: &mut dyn Importer,
        compiler: &mut dyn MeshCompiler,
        config: &BoltConfig,
    ) -> Result<Self> {
        importer.open_file(&config.model_path)?;

        log::info!("Meshes: {}", importer.mesh_count());
        log::info!("Scenes: {}", importer.scene_count());
        for i in 0..importer.mesh_count() {
            log::info!("Mesh {} name = {}", i, importer.mesh_name(i).unwrap_or(""));
        }

        let mesh = importer.mesh(0).ok_or(BoltError::MissingMesh(0))?;

        let bounds = bounds::scan_mesh(&mesh)?;
        log::info!(
            "Bounding box of '{}': min {:?}, max {:?}, size {:?}, center {:?}",
            mesh.name(),
            bounds.min,
            bounds.max,
            bounds.size(),
            bounds.center()
        );
        check_far_plane(&bounds, config.camera_position, &config.projection);

        let flags = CompileFlags::for_mesh(&mesh);
        if flags.generate_flat_normals {
            log::info!("Mesh '{}' has no normals, generating flat normals", mesh.name());
        }
        let drone_mesh = compiler.compile(&mesh, flags)?;

        let mut axes = AxisGizmo::new(config.axis_length);
        axes.compile(compiler)?;

        let mut scene = Scene::new();
        let root = scene.root();
        let drone = scene.add_node(root);
        let eye = scene.add_node(root);
        let light = scene.add_node(root);

        scene.node_mut(drone).reset_transformation();
        scene
            .node_mut(eye)
            .reset_transformation()
            .translate(config.camera_position);
        scene
            .node_mut(light)
            .reset_transformation()
            .translate(config.light_position);

        let mut camera = Camera::new(eye);
        camera
            .set_aspect_ratio_policy(AspectRatioPolicy::Extend)
            .set_projection_matrix(config.projection.matrix());

        let mut drawables = DrawableGroup::new();
        drawables.add(drone, PhongDrawable::new(drone_mesh, light, config.material));

        Ok(Self {
            scene,
            drone,
            light,
            camera,
            drawables,
            axes,
            show_axes: config.show_axes,
            drone_mesh,
            bounds,
        })
    }

    /// Adapts the projection to a new framebuffer size
    pub fn resize(&mut self, size: Vector2<u32>) {
        self.camera.set_viewport(size);
    }

    /// Applies the controls to the drone and camera nodes
    pub fn update(&mut self, controls: &DroneControls) {
        self.scene.node_mut(self.drone).set_transformation(
            Matrix4::from_angle_y(Deg(controls.rotation_y))
                * Matrix4::from_angle_x(Deg(controls.rotation_x))
                * Matrix4::from_scale(controls.scale),
        );

        let [rx, ry, rz] = controls.camera_rotation;
        self.scene
            .node_mut(self.camera.node())
            .reset_transformation()
            .rotate_z(Deg(rz))
            .rotate_x(Deg(rx))
            .rotate_y(Deg(ry))
            .translate(controls.camera_position());

        self.show_axes = controls.show_axes;
    }

    /// Issues the draw calls of one frame
    pub fn draw_frame(&mut self, backend: &mut dyn RenderBackend) {
        self.camera.draw(&self.scene, &mut self.drawables, backend);

        if self.show_axes {
            let view_projection = self.camera.view_projection(&self.scene);
            self.axes.draw(view_projection, backend);
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn drone(&self) -> NodeId {
        self.drone
    }

    pub fn light(&self) -> NodeId {
        self.light
    }

    pub fn drone_mesh(&self) -> MeshHandle {
        self.drone_mesh
    }

    pub fn drawables(&self) -> &DrawableGroup {
        &self.drawables
    }

    /// Bounds of the imported mesh in model space
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

fn check_far_plane(bounds: &BoundingBox, camera: Vector3<f32>, projection: &ProjectionConfig) {
    let farthest = bounds.farthest_distance_from(camera);
    if farthest > projection.far {
        log::warn!(
            "Model reaches {:.1} units from the camera but the far plane is at {:.1}; \
             parts of it will be clipped",
            farthest,
            projection.far
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{MeshAttribute, MeshData};
    use crate::test_support::{FakeImporter, RecordingBackend, RecordingCompiler};
    use cgmath::{EuclideanSpace, InnerSpace, Point3, SquareMatrix, Transform};

    fn triangle() -> MeshData {
        MeshData::new("drone").with_positions(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ])
    }

    fn init(importer: &mut FakeImporter) -> (Result<Bolt>, RecordingCompiler) {
        let mut compiler = RecordingCompiler::default();
        let bolt = Bolt::init(importer, &mut compiler, &BoltConfig::default());
        (bolt, compiler)
    }

    #[test]
    fn test_init_builds_scene() {
        let mut importer = FakeImporter::with_mesh(triangle());
        let (bolt, compiler) = init(&mut importer);
        let bolt = bolt.unwrap();

        assert_eq!(importer.opened, Some(BoltConfig::default().model_path));
        assert_eq!(
            compiler.meshes,
            vec![(
                "drone".to_string(),
                CompileFlags {
                    generate_flat_normals: true
                }
            )]
        );
        assert_eq!(compiler.line_meshes.len(), 1);

        // root plus drone, camera and light
        assert_eq!(bolt.scene().len(), 4);
        assert_eq!(bolt.drawables().len(), 1);
        assert_eq!(
            bolt.scene().absolute_translation(bolt.light()),
            Vector3::new(3.0, 5.0, 8.0)
        );
        assert_eq!(
            bolt.scene().absolute_translation(bolt.camera().node()),
            Vector3::new(0.0, 0.0, 10.0)
        );
        assert_eq!(bolt.camera().aspect_ratio_policy(), AspectRatioPolicy::Extend);
        assert_eq!(bolt.bounds().max, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_mesh_with_normals_compiles_without_flags() {
        let mesh = triangle().with_normals(vec![Vector3::unit_z(); 3]);
        let mut importer = FakeImporter::with_mesh(mesh);
        let (bolt, compiler) = init(&mut importer);

        assert!(bolt.is_ok());
        assert_eq!(compiler.meshes[0].1, CompileFlags::default());
    }

    #[test]
    fn test_open_failure_stops_startup() {
        let mut importer = FakeImporter {
            fail_open: true,
            ..FakeImporter::with_mesh(triangle())
        };
        let (bolt, compiler) = init(&mut importer);

        assert!(matches!(bolt, Err(BoltError::Open { .. })));
        assert_eq!(compiler.call_count(), 0);
    }

    #[test]
    fn test_missing_mesh_stops_before_compile() {
        let mut importer = FakeImporter::default();
        let (bolt, compiler) = init(&mut importer);

        assert!(matches!(bolt, Err(BoltError::MissingMesh(0))));
        assert_eq!(compiler.call_count(), 0);
    }

    #[test]
    fn test_missing_positions_stop_before_compile() {
        let mut importer = FakeImporter::with_mesh(MeshData::new("hollow"));
        let (bolt, compiler) = init(&mut importer);

        match bolt {
            Err(BoltError::MissingAttribute { mesh, attribute }) => {
                assert_eq!(mesh, "hollow");
                assert_eq!(attribute, MeshAttribute::Position);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("startup should fail"),
        }
        assert_eq!(compiler.call_count(), 0);
    }

    #[test]
    fn test_update_sets_drone_and_camera() {
        let mut importer = FakeImporter::with_mesh(triangle());
        let (bolt, _) = init(&mut importer);
        let mut bolt = bolt.unwrap();

        let controls = DroneControls {
            rotation_y: 90.0,
            scale: 2.0,
            camera_position: [0.0, 0.0, 5.0],
            camera_rotation: [0.0, 90.0, 0.0],
            ..Default::default()
        };
        bolt.update(&controls);

        let drone = bolt.scene().absolute_transformation(bolt.drone());
        let p = drone.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, -2.0)).magnitude() < 1e-5);

        // rotation is applied before the translation, so the position is
        // not rotated
        let eye = bolt.scene().absolute_translation(bolt.camera().node());
        assert!((eye - Vector3::new(0.0, 0.0, 5.0)).magnitude() < 1e-5);

        let camera = bolt.scene().absolute_transformation(bolt.camera().node());
        let forward = camera.transform_vector(-Vector3::unit_z());
        assert!((forward - Vector3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_draw_frame_issues_drone_then_axes() {
        let mut importer = FakeImporter::with_mesh(triangle());
        let (bolt, _) = init(&mut importer);
        let mut bolt = bolt.unwrap();
        bolt.resize(Vector2::new(800, 600));
        bolt.update(&DroneControls::default());

        let mut backend = RecordingBackend::default();
        bolt.draw_frame(&mut backend);
        assert_eq!(backend.phong.len(), 1);
        assert_eq!(backend.phong[0].0, bolt.drone_mesh());
        assert_eq!(backend.lines.len(), 1);
        assert_eq!(
            backend.lines[0].1,
            bolt.camera().view_projection(bolt.scene())
        );

        // light stays in world space, camera at (0, 0, 10)
        let light = backend.phong[0].1.light_position;
        assert!((light[2] + 2.0).abs() < 1e-5);

        let hidden = DroneControls {
            show_axes: false,
            ..Default::default()
        };
        bolt.update(&hidden);
        let mut backend = RecordingBackend::default();
        bolt.draw_frame(&mut backend);
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_resize_keeps_view_undistorted() {
        let mut importer = FakeImporter::with_mesh(triangle());
        let (bolt, _) = init(&mut importer);
        let mut bolt = bolt.unwrap();

        bolt.resize(Vector2::new(1600, 800));
        let projection = bolt.camera().projection_matrix();
        assert!((projection.x.x * 2.0 - projection.y.y).abs() < 1e-5);

        // the camera looks at the origin along -Z
        let view_projection = bolt.camera().view_projection(bolt.scene());
        let center = view_projection.transform_point(Point3::origin());
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);
        assert_ne!(projection, Matrix4::identity());
    }
}

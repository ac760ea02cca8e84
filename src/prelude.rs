//! # Bolt Prelude
//!
//! Commonly used types in one import:
//!
//! ```
//! use bolt::prelude::*;
//!
//! let mut scene = Scene::new();
//! let drone = scene.add_node(scene.root());
//! scene.node_mut(drone).translate(Vector3::new(0.0, 1.0, 0.0));
//! ```

pub use crate::app::BoltApp;
pub use crate::bolt::Bolt;
pub use crate::config::BoltConfig;
pub use crate::controls::DroneControls;
pub use crate::error::{BoltError, Result};

pub use crate::gfx::camera::{AspectRatioPolicy, Camera, CameraView, ProjectionConfig};
pub use crate::gfx::drawables::{Drawable, DrawableGroup, PhongDrawable};
pub use crate::gfx::geometry::{BoundingBox, MeshAttribute, MeshData};
pub use crate::gfx::import::{Importer, ObjImporter};
pub use crate::gfx::rendering::{MeshCompiler, MeshHandle, RenderBackend};
pub use crate::gfx::scene::{NodeId, Scene};
pub use crate::gfx::shading::{PhongMaterial, PhongShader};

pub use cgmath::{Deg, Matrix4, Vector2, Vector3, Vector4};
pub use imgui::Ui;

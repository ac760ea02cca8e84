//! # Graphics Module
//!
//! Scene graph, camera, lighting and the wgpu backend of the viewer.
//!
//! - **Scene** ([`scene`]) - node hierarchy with relative transformations
//! - **Camera** ([`camera`]) - projection with aspect ratio correction
//! - **Drawables** ([`drawables`]) - objects attached to nodes and drawn by a camera
//! - **Shading** ([`shading`]) - Phong material and light placement
//! - **Geometry** ([`geometry`]) - mesh data and bounding boxes
//! - **Rendering** ([`rendering`]) - backend traits and the wgpu [`RenderEngine`]
//!
//! The scene side never touches the GPU: drawing goes through
//! [`rendering::RenderBackend`] and mesh upload through
//! [`rendering::MeshCompiler`].

pub mod camera;
pub mod drawables;
pub mod geometry;
pub mod gizmos;
pub mod import;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shading;

pub use rendering::render_engine::RenderEngine;

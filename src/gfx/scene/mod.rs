//! # Scene Management Module
//!
//! This module provides the transform hierarchy used by Bolt. Nodes live in an
//! arena owned by the [`Scene`] and refer to each other through [`NodeId`]
//! handles, so the tree can be walked without back-pointers.
//!
//! ## Key Components
//!
//! - [`Scene`] - Arena owning the node tree, root included
//! - [`Node`] - Local transformation plus parent/children links
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex layouts
//!
//! ## Usage
//!
//! ```
//! use bolt::gfx::scene::Scene;
//! use cgmath::Vector3;
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let light = scene.add_node(root);
//! scene.node_mut(light).translate(Vector3::new(3.0, 5.0, 8.0));
//!
//! let world = scene.absolute_translation(light);
//! assert_eq!(world, Vector3::new(3.0, 5.0, 8.0));
//! ```
//!
//! Absolute transformations are never cached: they are composed root-first
//! every time they are queried.

pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use node::{Node, NodeId};
pub use scene::Scene;
pub use vertex::{LineVertex, Vertex3D};

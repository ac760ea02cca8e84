//! # Gizmos
//!
//! Visual aids drawn on top of the scene. They are drawn by the frame driver
//! directly rather than through a drawable group.

pub mod axes;

pub use axes::AxisGizmo;

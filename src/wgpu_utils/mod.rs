//! WGPU utility functions and helpers

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::{dynamic_uniform, dynamic_uniform_layout};
pub use uniform_buffer::DynamicUniformBuffer;

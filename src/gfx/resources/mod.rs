//! GPU resources shared by the render pipelines

pub mod texture_resource;

pub use texture_resource::DepthTexture;

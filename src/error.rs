//! Error types for Bolt
//!
//! Every error here is a startup error: the frame path itself never fails.

use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::geometry::MeshAttribute;

/// Main error type for model loading, GPU setup and window creation.
#[derive(Error, Debug)]
pub enum BoltError {
    /// The importer could not open or parse the model file.
    #[error("Cannot open model file '{path}': {message}")]
    Open {
        /// Path to the file that failed to open.
        path: PathBuf,
        /// Importer message.
        message: String,
    },

    /// The model does not contain the requested mesh.
    #[error("Model has no mesh {0}")]
    MissingMesh(u32),

    /// A required vertex attribute is absent.
    #[error("Mesh '{mesh}' has no {attribute} attribute")]
    MissingAttribute {
        mesh: String,
        attribute: MeshAttribute,
    },

    /// The position attribute exists but holds no vertices.
    #[error("Mesh '{0}' has no vertices")]
    EmptyMesh(String),

    /// Geometry that cannot be compiled for drawing.
    #[error("Mesh '{mesh}' cannot be compiled: {message}")]
    InvalidMesh { mesh: String, message: String },

    /// Adapter, device or surface creation failed.
    #[error("Graphics error: {0}")]
    Graphics(String),

    /// Window or event loop creation failed.
    #[error("Window error: {0}")]
    Window(String),
}

/// Result type alias using [`BoltError`].
pub type Result<T> = std::result::Result<T, BoltError>;

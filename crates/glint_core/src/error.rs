//! Errors raised while assembling a scene.

use thiserror::Error;

/// Errors that can occur during scene construction and loading.
///
/// All of these are configuration errors: they abort setup and are never
/// raised while rendering.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Undefined material {0}")]
    UndefinedMaterial(String),

    #[error("Material {0} is already defined")]
    DuplicateMaterial(String),

    #[error("Matrix stack underflow: pop without a matching push")]
    MatrixStackUnderflow,

    #[error("Transform is not invertible")]
    SingularTransform,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene description: {0}")]
    InvalidDescription(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

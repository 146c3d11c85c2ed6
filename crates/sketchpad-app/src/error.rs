use sketchpad_core::canvas::CanvasError;
use sketchpad_core::config::ConfigError;
use sketchpad_core::document::DocumentError;
use sketchpad_render::RendererError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Script step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: CanvasError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub type AppResult<T> = Result<T, AppError>;

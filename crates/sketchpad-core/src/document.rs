//! Structured (JSON) form of a drawing.

use crate::color::SerializableColor;
use crate::stroke::{Stroke, StrokeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document format version written by this crate.
pub const DOCUMENT_VERSION: u32 = 1;

/// Errors raised while importing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(u32),
    #[error("Invalid document size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("Invalid stroke at index {index}: {source}")]
    InvalidStroke {
        index: usize,
        #[source]
        source: StrokeError,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A complete drawing: surface size, paper color and strokes in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchDocument {
    pub version: u32,
    pub width: f64,
    pub height: f64,
    pub background_color: SerializableColor,
    pub strokes: Vec<Stroke>,
}

impl SketchDocument {
    pub fn new(width: f64, height: f64, background_color: SerializableColor) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            width,
            height,
            background_color,
            strokes: Vec::new(),
        }
    }

    pub fn with_strokes(mut self, strokes: Vec<Stroke>) -> Self {
        self.strokes = strokes;
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.version != DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion(self.version));
        }
        let valid_extent = |v: f64| v.is_finite() && v > 0.0;
        if !valid_extent(self.width) || !valid_extent(self.height) {
            return Err(DocumentError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        for (index, stroke) in self.strokes.iter().enumerate() {
            stroke
                .validate()
                .map_err(|source| DocumentError::InvalidStroke { index, source })?;
        }
        Ok(())
    }
}

//! Sketchpad Core Library
//!
//! Platform-agnostic stroke engine: point sampling, curve smoothing, lasso
//! selection and the transforms applied to selected strokes.

pub mod camera;
pub mod canvas;
pub mod color;
pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod lasso;
pub mod ruler;
pub mod smoothing;
pub mod store;
pub mod stroke;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasError, Gesture};
pub use color::{ColorError, SerializableColor};
pub use config::{CanvasConfig, ConfigError, Dimension, ExportFormat, Theme};
pub use document::{DocumentError, SketchDocument, DOCUMENT_VERSION};
pub use geometry::{add_point, point_in_polygon, snap_to_angle};
pub use input::{PointerEvent, PointerSample, PointerType};
pub use lasso::LassoSelection;
pub use ruler::RulerState;
pub use store::StrokeStore;
pub use stroke::{Stroke, StrokeError, StrokeId};
pub use tools::{ToolKind, ToolStyle, ToolThickness};

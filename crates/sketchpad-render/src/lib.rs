//! Sketchpad Render Library
//!
//! Drawing surface contract, the redraw routine and the SVG, PNG and JSON
//! exporters. Raster output uses tiny-skia.

pub mod renderer;
pub mod export;
pub mod raster;
pub mod svg;

pub use export::{export, export_configured, export_png, ExportArtifact};
pub use raster::RasterSurface;
pub use renderer::{
    draw_stroke, redraw, DrawCommand, PaintStyle, RecordingSurface, RenderContext, RenderResult,
    RendererError, Surface,
};
pub use svg::export_svg;

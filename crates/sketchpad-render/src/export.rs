//! Export dispatcher: turns a canvas into the configured output artifacts.

use crate::raster::RasterSurface;
use crate::renderer::{redraw, RenderContext, RenderResult};
use crate::svg::export_svg;
use sketchpad_core::canvas::Canvas;
use sketchpad_core::config::ExportFormat;

/// One exported file.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportArtifact {
    Svg(String),
    Png(Vec<u8>),
    Json(String),
}

impl ExportArtifact {
    /// Default download name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportArtifact::Svg(_) => "sketch.svg",
            ExportArtifact::Png(_) => "sketch.png",
            ExportArtifact::Json(_) => "sketch.json",
        }
    }

    /// Media type of the artifact's bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportArtifact::Svg(_) => "image/svg+xml",
            ExportArtifact::Png(_) => "image/png",
            ExportArtifact::Json(_) => "application/json",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ExportArtifact::Svg(text) | ExportArtifact::Json(text) => text.as_bytes(),
            ExportArtifact::Png(data) => data,
        }
    }
}

/// Rasterize the canvas as it currently appears, without selection or ruler
/// overlays, and encode it as PNG.
pub fn export_png(canvas: &Canvas) -> RenderResult<Vec<u8>> {
    let size = canvas.size();
    let mut surface = RasterSurface::for_size(size.width, size.height)?;
    redraw(&RenderContext::new(canvas).with_overlays(false), &mut surface);
    surface.to_png()
}

/// Produce the artifacts for `format`. `Both` yields SVG then PNG.
pub fn export(canvas: &Canvas, format: ExportFormat) -> RenderResult<Vec<ExportArtifact>> {
    let artifacts = match format {
        ExportFormat::Svg => vec![ExportArtifact::Svg(export_svg(&canvas.document()))],
        ExportFormat::Png => vec![ExportArtifact::Png(export_png(canvas)?)],
        ExportFormat::Both => vec![
            ExportArtifact::Svg(export_svg(&canvas.document())),
            ExportArtifact::Png(export_png(canvas)?),
        ],
        ExportFormat::Json => vec![ExportArtifact::Json(canvas.document().to_json()?)],
    };
    log::info!(
        "Exported {} stroke(s) as {:?}",
        canvas.store().len(),
        artifacts.iter().map(ExportArtifact::file_name).collect::<Vec<_>>()
    );
    Ok(artifacts)
}

/// Export using the format from the canvas configuration.
pub fn export_configured(canvas: &Canvas) -> RenderResult<Vec<ExportArtifact>> {
    export(canvas, canvas.config().export_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchpad_core::config::{CanvasConfig, Dimension};
    use sketchpad_core::document::SketchDocument;
    use sketchpad_core::input::{PointerEvent, PointerSample};

    fn small_canvas(format: ExportFormat) -> Canvas {
        let config = CanvasConfig {
            width: Dimension::Pixels(40.0),
            height: Dimension::Pixels(30.0),
            export_format: format,
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::new(config, None).unwrap();
        for event in [
            PointerEvent::Down(PointerSample::mouse(Point::new(5.0, 5.0))),
            PointerEvent::Move(PointerSample::mouse(Point::new(20.0, 20.0))),
            PointerEvent::Up(PointerSample::mouse(Point::new(20.0, 20.0))),
        ] {
            canvas.handle_event(event);
        }
        canvas
    }

    #[test]
    fn test_export_formats() {
        let canvas = small_canvas(ExportFormat::Svg);

        let svg = export(&canvas, ExportFormat::Svg).unwrap();
        assert_eq!(svg.len(), 1);
        assert_eq!(svg[0].file_name(), "sketch.svg");

        let both = export(&canvas, ExportFormat::Both).unwrap();
        let names: Vec<_> = both.iter().map(ExportArtifact::file_name).collect();
        assert_eq!(names, vec!["sketch.svg", "sketch.png"]);
        assert_eq!(&both[1].as_bytes()[1..4], b"PNG");

        let json = export(&canvas, ExportFormat::Json).unwrap();
        assert_eq!(json[0].mime_type(), "application/json");
        let ExportArtifact::Json(text) = &json[0] else {
            panic!("expected JSON artifact");
        };
        let document = SketchDocument::from_json(text).unwrap();
        assert_eq!(document.strokes, canvas.strokes());
        assert_eq!(document.width, 40.0);
    }

    #[test]
    fn test_export_configured_uses_config() {
        let canvas = small_canvas(ExportFormat::Png);
        let artifacts = export_configured(&canvas).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(matches!(artifacts[0], ExportArtifact::Png(_)));
    }
}

//! Raster surface backed by a tiny-skia pixmap, with PNG snapshots.

use crate::renderer::{PaintStyle, RenderResult, RendererError, Surface};
use kurbo::{Affine, BezPath, PathEl, Point};
use sketchpad_core::color::SerializableColor;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

/// Opacity of the glow relative to the stroke's own opacity.
const GLOW_OPACITY: f64 = 0.35;

/// CPU drawing surface.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RendererError::InitFailed(format!("cannot create a {width}x{height} surface"))
        })?;
        Ok(Self { pixmap })
    }

    /// Surface matching a canvas size, rounded up to whole pixels.
    pub fn for_size(width: f64, height: f64) -> RenderResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::InitFailed(format!(
                "invalid surface size {width}x{height}"
            )));
        }
        Self::new(width.ceil() as u32, height.ceil() as u32)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Snapshot the surface as PNG bytes.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let rgba: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
            writer.finish()?;
        }
        log::debug!(
            "Encoded {}x{} PNG ({} bytes)",
            self.width(),
            self.height(),
            png_data.len()
        );
        Ok(png_data)
    }
}

fn to_skia_color(color: SerializableColor, opacity: f64) -> Color {
    let mut c = Color::from_rgba8(color.r, color.g, color.b, color.a);
    c.apply_opacity(opacity.clamp(0.0, 1.0) as f32);
    c
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

impl RasterSurface {
    fn stroke_with(
        &mut self,
        path: &tiny_skia::Path,
        color: SerializableColor,
        width: f64,
        opacity: f64,
        dash: Option<[f64; 2]>,
        transform: Transform,
    ) {
        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color, opacity));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(path, &paint, &stroke, transform, None);
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self, color: SerializableColor) {
        self.pixmap.fill(to_skia_color(color, 1.0));
    }

    fn stroke_path(&mut self, path: &BezPath, style: &PaintStyle, transform: Affine) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let transform = to_skia_transform(transform);

        // tiny-skia has no shadow blur; a wider faint pass approximates it.
        if style.shadow_blur > 0.0 {
            self.stroke_with(
                &path,
                style.color,
                style.width + style.shadow_blur,
                style.opacity * GLOW_OPACITY,
                style.dash,
                transform,
            );
        }
        self.stroke_with(
            &path,
            style.color,
            style.width,
            style.opacity,
            style.dash,
            transform,
        );
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: SerializableColor,
        opacity: f64,
        transform: Affine,
    ) {
        let Some(circle) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color, opacity));
        paint.anti_alias = true;
        self.pixmap.fill_path(
            &circle,
            &paint,
            FillRule::Winding,
            to_skia_transform(transform),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{redraw, RenderContext};
    use sketchpad_core::canvas::Canvas;
    use sketchpad_core::config::CanvasConfig;
    use sketchpad_core::input::{PointerEvent, PointerSample};
    use sketchpad_core::tools::ToolKind;

    #[test]
    fn test_invalid_size() {
        assert!(RasterSurface::new(0, 10).is_err());
        assert!(RasterSurface::for_size(f64::NAN, 10.0).is_err());
        let surface = RasterSurface::for_size(10.2, 5.0).unwrap();
        assert_eq!((surface.width(), surface.height()), (11, 5));
    }

    #[test]
    fn test_clear_and_dot() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.clear(SerializableColor::rgb(0xfc, 0xfc, 0xfa));
        assert_eq!(surface.pixel(0, 0), Some([0xfc, 0xfc, 0xfa, 0xff]));

        surface.fill_circle(
            Point::new(10.0, 10.0),
            4.0,
            SerializableColor::black(),
            1.0,
            Affine::IDENTITY,
        );
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0xff]));
        assert_eq!(surface.pixel(0, 0), Some([0xfc, 0xfc, 0xfa, 0xff]));
    }

    #[test]
    fn test_redraw_paints_strokes() {
        let mut canvas = Canvas::new(
            CanvasConfig {
                width: sketchpad_core::config::Dimension::Pixels(64.0),
                height: sketchpad_core::config::Dimension::Pixels(32.0),
                ..CanvasConfig::default()
            },
            None,
        )
        .unwrap();
        canvas.set_tool(ToolKind::Pen).unwrap();
        canvas.set_thickness(8.0);
        for event in [
            PointerEvent::Down(PointerSample::mouse(Point::new(4.0, 16.0))),
            PointerEvent::Move(PointerSample::mouse(Point::new(30.0, 16.0))),
            PointerEvent::Move(PointerSample::mouse(Point::new(60.0, 16.0))),
            PointerEvent::Up(PointerSample::mouse(Point::new(60.0, 16.0))),
        ] {
            canvas.handle_event(event);
        }

        let mut surface = RasterSurface::new(64, 32).unwrap();
        redraw(&RenderContext::new(&canvas), &mut surface);

        let center = surface.pixel(32, 16).unwrap();
        assert!(center[0] < 0x80, "stroke should darken the center: {center:?}");
        assert_eq!(surface.pixel(32, 1), Some([0xfc, 0xfc, 0xfa, 0xff]));
    }

    #[test]
    fn test_png_signature() {
        let mut surface = RasterSurface::new(8, 4).unwrap();
        surface.clear(SerializableColor::white());
        let png = surface.to_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}

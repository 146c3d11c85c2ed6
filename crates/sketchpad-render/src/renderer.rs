//! Drawing surface contract and the full-redraw routine.

use kurbo::{Affine, BezPath, Point};
use sketchpad_core::canvas::{Canvas, Gesture};
use sketchpad_core::color::SerializableColor;
use sketchpad_core::document::DocumentError;
use sketchpad_core::smoothing::polyline_path;
use sketchpad_core::stroke::Stroke;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Paint parameters for one stroked path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyle {
    pub color: SerializableColor,
    pub width: f64,
    /// Alpha multiplier applied on top of the color's own alpha.
    pub opacity: f64,
    pub dash: Option<[f64; 2]>,
    /// Soft glow radius in the paint color (0 = none).
    pub shadow_blur: f64,
}

impl PaintStyle {
    /// Opaque solid line.
    pub fn solid(color: SerializableColor, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
            shadow_blur: 0.0,
        }
    }

    /// Style of a committed or in-progress stroke, from its tool.
    pub fn for_stroke(stroke: &Stroke) -> Self {
        let style = stroke.tool.style();
        Self {
            color: stroke.color,
            width: stroke.thickness,
            opacity: style.opacity,
            dash: style.dash,
            shadow_blur: style.shadow_blur,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_dash(mut self, dash: [f64; 2]) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// A 2D drawing target.
///
/// Paths are given in their own coordinates; `transform` maps them onto the
/// surface. Lines use round caps and joins.
pub trait Surface {
    /// Fill the whole surface.
    fn clear(&mut self, color: SerializableColor);

    fn stroke_path(&mut self, path: &BezPath, style: &PaintStyle, transform: Affine);

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: SerializableColor,
        opacity: f64,
        transform: Affine,
    );
}

/// Lasso outline dash (dash, gap).
pub const LASSO_DASH: [f64; 2] = [4.0, 4.0];
pub const LASSO_WIDTH: f64 = 2.0;
/// Ruler preview dash (dash, gap).
pub const RULER_DASH: [f64; 2] = [8.0, 8.0];
pub const RULER_WIDTH: f64 = 3.0;
/// Extra width of the selection highlight over the stroke thickness.
pub const HIGHLIGHT_EXTRA_WIDTH: f64 = 6.0;

/// Context for a single redraw.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Outline color while a lasso is being captured.
    pub capture_color: SerializableColor,
    /// Outline color of a finished selection and of the ruler preview.
    pub selection_color: SerializableColor,
    /// Opacity of the highlight drawn behind selected strokes.
    pub highlight_opacity: f64,
    /// Whether ruler and lasso overlays are drawn (off for exports).
    pub show_overlays: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            capture_color: SerializableColor::rgb(0xaa, 0xaa, 0xaa),
            selection_color: SerializableColor::rgb(0x00, 0x7a, 0xff),
            highlight_opacity: 0.2,
            show_overlays: true,
        }
    }

    pub fn with_overlays(mut self, show: bool) -> Self {
        self.show_overlays = show;
        self
    }
}

/// Draw one stroke: a filled dot for single points, otherwise the smoothed
/// polyline.
pub fn draw_stroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Stroke, transform: Affine) {
    match stroke.points.as_slice() {
        [] => {}
        [center] => {
            surface.fill_circle(*center, stroke.thickness / 2.0, stroke.color, 1.0, transform);
        }
        _ => {
            surface.stroke_path(&stroke.to_path(), &PaintStyle::for_stroke(stroke), transform);
        }
    }
}

/// Repaint the whole surface from the canvas state.
///
/// Order: background, selection highlights, committed strokes, the stroke in
/// progress, then the ruler and lasso overlays. The pan offset applies to
/// strokes only.
pub fn redraw<S: Surface + ?Sized>(ctx: &RenderContext<'_>, surface: &mut S) {
    let canvas = ctx.canvas;
    surface.clear(canvas.background());

    let selection_visible = ctx.show_overlays
        && matches!(
            canvas.gesture(),
            Gesture::Selected | Gesture::Dragging { .. }
        );

    if selection_visible {
        draw_highlights(ctx, surface);
    }

    let view = canvas.camera().transform();
    for stroke in canvas.store().iter() {
        draw_stroke(surface, stroke, view);
    }
    if let Some(stroke) = canvas.current_stroke() {
        draw_stroke(surface, stroke, view);
    }

    if !ctx.show_overlays {
        return;
    }

    if let Some(ruler) = canvas.ruler() {
        let path = polyline_path(&[ruler.start, ruler.end]);
        let style = PaintStyle::solid(ctx.selection_color, RULER_WIDTH).with_dash(RULER_DASH);
        surface.stroke_path(&path, &style, Affine::IDENTITY);
    }

    let outline_color = match canvas.gesture() {
        Gesture::Capturing => Some(ctx.capture_color),
        _ if selection_visible => Some(ctx.selection_color),
        _ => None,
    };
    let polygon = canvas.lasso().polygon();
    if let Some(color) = outline_color {
        if polygon.len() >= 2 {
            let style = PaintStyle::solid(color, LASSO_WIDTH).with_dash(LASSO_DASH);
            surface.stroke_path(&polyline_path(polygon), &style, Affine::IDENTITY);
        }
    }
}

/// Translucent wide band along the raw points of each selected stroke.
fn draw_highlights<S: Surface + ?Sized>(ctx: &RenderContext<'_>, surface: &mut S) {
    let store = ctx.canvas.store();
    for id in ctx.canvas.lasso().selected() {
        let Some(stroke) = store.get(*id) else {
            continue;
        };
        if stroke.points.len() < 2 {
            continue;
        }
        let style = PaintStyle::solid(
            ctx.selection_color,
            stroke.thickness + HIGHLIGHT_EXTRA_WIDTH,
        )
        .with_opacity(ctx.highlight_opacity);
        surface.stroke_path(&polyline_path(&stroke.points), &style, Affine::IDENTITY);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(SerializableColor),
    Stroke {
        path: BezPath,
        style: PaintStyle,
        transform: Affine,
    },
    Circle {
        center: Point,
        radius: f64,
        color: SerializableColor,
        opacity: f64,
        transform: Affine,
    },
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded path strokes, in call order.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, &PaintStyle, &Affine)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Stroke {
                path,
                style,
                transform,
            } => Some((path, style, transform)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: SerializableColor) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_path(&mut self, path: &BezPath, style: &PaintStyle, transform: Affine) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style: *style,
            transform,
        });
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: SerializableColor,
        opacity: f64,
        transform: Affine,
    ) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            opacity,
            transform,
        });
    }
}

//! Canvas: the drawing engine state and its input dispatch.

use crate::camera::Camera;
use crate::color::SerializableColor;
use crate::config::{CanvasConfig, ConfigError};
use crate::document::{DocumentError, SketchDocument};
use crate::geometry::add_point;
use crate::input::{PointerEvent, PointerSample};
use crate::lasso::{LassoSelection, SCALE_DOWN, SCALE_UP};
use crate::ruler::RulerState;
use crate::store::StrokeStore;
use crate::stroke::{Stroke, StrokeError, StrokeId};
use crate::tools::{ToolKind, ToolThickness};
use kurbo::{Point, Size};
use thiserror::Error;

/// Canvas construction and command errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Invalid stroke at index {index}: {source}")]
    InvalidStroke {
        index: usize,
        #[source]
        source: StrokeError,
    },
    #[error("Tool is not enabled: {0}")]
    ToolUnavailable(ToolKind),
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Freehand stroke being recorded; committed on release.
    Drawing(Stroke),
    /// Lasso outline being captured.
    Capturing,
    /// A lasso selection exists and the pointer is up.
    Selected,
    /// Lasso selection following the pointer.
    Dragging { last: Point },
    RulerDragging(RulerState),
    Panning { last_y: f64 },
}

impl Gesture {
    /// Whether a pointer is down for this gesture.
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle | Gesture::Selected)
    }
}

/// The drawing engine.
///
/// All input goes through [`Canvas::handle_event`] and the command methods.
/// None of them draw; they raise a redraw request that the host collects with
/// [`Canvas::take_redraw`] and renders in a separate step.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    size: Size,
    background: SerializableColor,
    store: StrokeStore,
    lasso: LassoSelection,
    camera: Camera,
    gesture: Gesture,
    tool: ToolKind,
    color: SerializableColor,
    thickness: ToolThickness,
    needs_redraw: bool,
}

impl Canvas {
    /// Build a canvas. `container` is the host's available size, needed when
    /// the configuration uses percentages.
    pub fn new(config: CanvasConfig, container: Option<Size>) -> Result<Self, CanvasError> {
        config.validate()?;
        let size = config.resolve_size(container)?;
        log::debug!("Canvas created at {}x{}", size.width, size.height);
        Ok(Self {
            size,
            background: config.background_color,
            store: StrokeStore::new(),
            lasso: LassoSelection::new(),
            camera: Camera::new(),
            gesture: Gesture::Idle,
            tool: config.initial_tool(),
            color: config.initial_color(),
            thickness: ToolThickness::default(),
            needs_redraw: true,
            config,
        })
    }

    /// Configuration the canvas was built from.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Logical drawing size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Background color, also used by the eraser.
    pub fn background(&self) -> SerializableColor {
        self.background
    }

    /// Committed strokes and redo history.
    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    /// Current lasso outline and selection.
    pub fn lasso(&self) -> &LassoSelection {
        &self.lasso
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Color of new strokes.
    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Thickness the active tool draws with, if it draws at all.
    pub fn thickness(&self) -> Option<f64> {
        self.thickness.get(self.tool)
    }

    /// Stroke currently being drawn.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        match &self.gesture {
            Gesture::Drawing(stroke) => Some(stroke),
            _ => None,
        }
    }

    /// Ruler being dragged.
    pub fn ruler(&self) -> Option<&RulerState> {
        match &self.gesture {
            Gesture::RulerDragging(ruler) => Some(ruler),
            _ => None,
        }
    }

    /// Ordered snapshot of committed strokes.
    pub fn strokes(&self) -> Vec<Stroke> {
        self.store.to_vec()
    }

    /// Return and reset the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Gesture to fall back to once the pointer is released.
    fn resting_gesture(&self) -> Gesture {
        if self.tool == ToolKind::Lasso && self.lasso.has_selection() {
            Gesture::Selected
        } else {
            Gesture::Idle
        }
    }

    // --- input ---------------------------------------------------------------

    /// Feed one input event. Returns true if visible state changed.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        let changed = match event {
            PointerEvent::Down(sample) => self.pointer_down(sample),
            PointerEvent::Move(sample) => self.pointer_move(sample),
            PointerEvent::Up(_) | PointerEvent::Leave(_) => self.finish_gesture(),
            PointerEvent::Wheel { delta_y, .. } => self.wheel(delta_y),
        };
        if changed {
            self.request_redraw();
        }
        changed
    }

    fn pointer_down(&mut self, sample: PointerSample) -> bool {
        if !accept_sample(&sample) {
            return false;
        }
        // A second press without a release closes the previous gesture.
        let mut changed = self.gesture.is_active() && self.finish_gesture();

        let position = sample.position;
        if self.tool == ToolKind::Move || sample.is_touch_pan() {
            self.gesture = Gesture::Panning { last_y: position.y };
            return changed;
        }

        match self.tool {
            tool if tool.is_freehand() => {
                let color = if tool == ToolKind::Eraser {
                    self.background
                } else {
                    self.color
                };
                let thickness = self.thickness.get(tool).unwrap_or(1.0);
                self.gesture = Gesture::Drawing(Stroke::new(tool, color, thickness, position));
                changed = true;
            }
            ToolKind::Ruler => {
                self.gesture = Gesture::RulerDragging(RulerState::begin(position));
                changed = true;
            }
            ToolKind::Lasso => {
                if self.lasso.hit(position) {
                    self.gesture = Gesture::Dragging { last: position };
                } else {
                    self.lasso.begin_capture(position);
                    self.gesture = Gesture::Capturing;
                    changed = true;
                }
            }
            _ => {}
        }
        changed
    }

    fn pointer_move(&mut self, sample: PointerSample) -> bool {
        if !accept_sample(&sample) {
            return false;
        }
        let position = sample.position;
        let min_distance = self.config.min_point_distance;

        match &mut self.gesture {
            Gesture::Drawing(stroke) => add_point(&mut stroke.points, position, min_distance),
            Gesture::Capturing => {
                self.lasso.extend_capture(position);
                true
            }
            Gesture::Dragging { last } => {
                let delta = position - *last;
                *last = position;
                self.lasso.drag_by(&mut self.store, delta);
                true
            }
            Gesture::RulerDragging(ruler) => {
                ruler.update(position);
                true
            }
            Gesture::Panning { last_y } => {
                let dy = position.y - *last_y;
                *last_y = position.y;
                self.camera.pan(dy);
                dy != 0.0
            }
            Gesture::Idle | Gesture::Selected => false,
        }
    }

    /// Terminate whatever gesture is in progress (pointer up or leave).
    fn finish_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Drawing(stroke) => {
                log::debug!("Committed {} stroke with {} points", stroke.tool, stroke.len());
                self.store.commit(stroke);
                self.gesture = self.resting_gesture();
                true
            }
            Gesture::Capturing => {
                let selected = self.lasso.finish_capture(&self.store);
                if selected == 0 {
                    self.lasso.clear();
                }
                log::debug!("Lasso selected {selected} strokes");
                self.gesture = self.resting_gesture();
                true
            }
            Gesture::Dragging { .. } => {
                self.gesture = self.resting_gesture();
                false
            }
            Gesture::RulerDragging(ruler) => {
                let thickness = self.thickness.get(ToolKind::Ruler).unwrap_or(1.0);
                log::debug!("Committed ruler line of length {:.1}", ruler.length());
                self.store.commit(ruler.into_stroke(self.color, thickness));
                self.gesture = self.resting_gesture();
                true
            }
            Gesture::Panning { .. } => {
                self.gesture = self.resting_gesture();
                false
            }
            gesture @ (Gesture::Idle | Gesture::Selected) => {
                self.gesture = gesture;
                false
            }
        }
    }

    fn wheel(&mut self, delta_y: f64) -> bool {
        if self.tool != ToolKind::Lasso || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 { SCALE_UP } else { SCALE_DOWN };
        self.lasso.scale(&mut self.store, factor)
    }

    // --- commands ------------------------------------------------------------

    /// Switch tools. Any gesture in progress is dropped along with the lasso
    /// selection. The move tool is always available.
    pub fn set_tool(&mut self, tool: ToolKind) -> Result<(), CanvasError> {
        if tool != ToolKind::Move && !self.config.has_tool(tool) {
            log::warn!("Tool {tool} is not enabled");
            return Err(CanvasError::ToolUnavailable(tool));
        }
        if tool == self.tool {
            return Ok(());
        }
        self.tool = tool;
        self.gesture = Gesture::Idle;
        self.lasso.clear();
        self.request_redraw();
        Ok(())
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
    }

    /// Set the active tool's thickness (clamped). Returns false for tools
    /// without a thickness.
    pub fn set_thickness(&mut self, value: f64) -> bool {
        self.thickness.set(self.tool, value)
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.store.undo();
        if changed {
            self.after_store_change();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.store.redo();
        if changed {
            self.after_store_change();
        }
        changed
    }

    fn after_store_change(&mut self) {
        self.lasso.retain_existing(&self.store);
        if self.gesture == Gesture::Selected && !self.lasso.has_selection() {
            self.lasso.clear();
            self.gesture = Gesture::Idle;
        }
        self.request_redraw();
    }

    /// Drop every stroke, the redo history and the selection.
    pub fn clear(&mut self) {
        self.store.clear();
        self.lasso.clear();
        self.gesture = Gesture::Idle;
        log::info!("Canvas cleared");
        self.request_redraw();
    }

    /// Delete the lasso selection. Not recorded in undo history.
    pub fn delete_selection(&mut self) -> usize {
        let removed = self.lasso.delete(&mut self.store);
        if removed > 0 {
            log::debug!("Deleted {removed} selected strokes");
            self.gesture = Gesture::Idle;
            self.request_redraw();
        }
        removed
    }

    /// Duplicate the lasso selection, offset down and right.
    pub fn copy_selection(&mut self) -> Vec<StrokeId> {
        let copies = self.lasso.copy(&mut self.store);
        if !copies.is_empty() {
            log::debug!("Copied {} selected strokes", copies.len());
            self.request_redraw();
        }
        copies
    }

    /// Scale the lasso selection about its centroid.
    pub fn scale_selection(&mut self, factor: f64) -> bool {
        let scaled = self.lasso.scale(&mut self.store, factor);
        if scaled {
            self.request_redraw();
        }
        scaled
    }

    /// Replace all strokes (programmatic load).
    pub fn load_strokes(&mut self, strokes: Vec<Stroke>) -> Result<(), CanvasError> {
        for (index, stroke) in strokes.iter().enumerate() {
            stroke
                .validate()
                .map_err(|source| CanvasError::InvalidStroke { index, source })?;
        }
        self.lasso.clear();
        self.gesture = Gesture::Idle;
        let ids = self.store.replace_all(strokes);
        log::info!("Loaded {} strokes", ids.len());
        self.request_redraw();
        Ok(())
    }

    /// Structured snapshot of the drawing.
    pub fn document(&self) -> SketchDocument {
        SketchDocument::new(self.size.width, self.size.height, self.background)
            .with_strokes(self.strokes())
    }

    /// Load a structured document, adopting its size and background.
    pub fn load_document(&mut self, document: SketchDocument) -> Result<(), CanvasError> {
        document.validate()?;
        self.size = Size::new(document.width, document.height);
        self.background = document.background_color;
        self.load_strokes(document.strokes)
    }
}

/// Whether a down or move sample may reach the gesture state.
fn accept_sample(sample: &PointerSample) -> bool {
    if !sample.position.is_finite() {
        log::trace!("Rejected non-finite sample at {:?}", sample.position);
        return false;
    }
    if sample.is_palm() {
        log::trace!("Rejected palm contact at {:?}", sample.position);
        return false;
    }
    true
}

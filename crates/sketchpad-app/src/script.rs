//! Replay scripts: recorded input and toolbar actions applied to a canvas.

use crate::error::{AppError, AppResult};
use kurbo::Point;
use serde::Deserialize;
use sketchpad_core::canvas::Canvas;
use sketchpad_core::color::SerializableColor;
use sketchpad_core::config::CanvasConfig;
use sketchpad_core::input::{PointerEvent, PointerSample};
use sketchpad_core::tools::ToolKind;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
    Leave(PointerSample),
    Wheel {
        #[serde(default)]
        position: Point,
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    /// Press, drag through and release at the given points with a mouse.
    Draw { points: Vec<Point> },
    Tool { tool: ToolKind },
    Color { color: SerializableColor },
    Thickness { value: f64 },
    Undo,
    Redo,
    Clear,
    DeleteSelection,
    CopySelection,
    ScaleSelection { factor: f64 },
}

/// A replay file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Canvas configuration embedded in the script.
    pub config: Option<CanvasConfig>,
    pub steps: Vec<ScriptStep>,
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Steps that changed what is on screen.
    pub changed: usize,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        if let Some(config) = &script.config {
            config.validate()?;
        }
        Ok(script)
    }

    /// Apply every step in order.
    pub fn run(&self, canvas: &mut Canvas) -> AppResult<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        for (index, step) in self.steps.iter().enumerate() {
            let changed = apply_step(canvas, step)
                .map_err(|source| AppError::Step { index, source })?;
            summary.steps += 1;
            if changed {
                summary.changed += 1;
            }
        }
        log::debug!(
            "Replayed {} steps, {} changed the canvas",
            summary.steps,
            summary.changed
        );
        Ok(summary)
    }
}

fn apply_step(
    canvas: &mut Canvas,
    step: &ScriptStep,
) -> Result<bool, sketchpad_core::canvas::CanvasError> {
    let changed = match step {
        ScriptStep::Down(sample) => canvas.handle_event(PointerEvent::Down(*sample)),
        ScriptStep::Move(sample) => canvas.handle_event(PointerEvent::Move(*sample)),
        ScriptStep::Up(sample) => canvas.handle_event(PointerEvent::Up(*sample)),
        ScriptStep::Leave(sample) => canvas.handle_event(PointerEvent::Leave(*sample)),
        ScriptStep::Wheel { position, delta_y } => canvas.handle_event(PointerEvent::Wheel {
            position: *position,
            delta_y: *delta_y,
        }),
        ScriptStep::Draw { points } => {
            let Some((first, rest)) = points.split_first() else {
                return Ok(false);
            };
            let mut changed = canvas.handle_event(PointerEvent::Down(PointerSample::mouse(*first)));
            for point in rest {
                changed |= canvas.handle_event(PointerEvent::Move(PointerSample::mouse(*point)));
            }
            let last = rest.last().unwrap_or(first);
            changed |= canvas.handle_event(PointerEvent::Up(PointerSample::mouse(*last)));
            changed
        }
        ScriptStep::Tool { tool } => {
            canvas.set_tool(*tool)?;
            true
        }
        ScriptStep::Color { color } => {
            canvas.set_color(*color);
            false
        }
        ScriptStep::Thickness { value } => {
            if !canvas.set_thickness(*value) {
                log::warn!("Tool {} has no thickness; ignoring", canvas.tool());
            }
            false
        }
        ScriptStep::Undo => canvas.undo(),
        ScriptStep::Redo => canvas.redo(),
        ScriptStep::Clear => {
            canvas.clear();
            true
        }
        ScriptStep::DeleteSelection => canvas.delete_selection() > 0,
        ScriptStep::CopySelection => !canvas.copy_selection().is_empty(),
        ScriptStep::ScaleSelection { factor } => canvas.scale_selection(*factor),
    };
    Ok(changed)
}

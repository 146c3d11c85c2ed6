//! Tool kinds, their visual styles and per-tool thickness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest thickness the thickness control accepts.
pub const MIN_THICKNESS: f64 = 1.0;
/// Largest thickness the thickness control accepts.
pub const MAX_THICKNESS: f64 = 30.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Pen,
    Marker,
    Eraser,
    Ruler,
    Lasso,
    Move,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pencil,
        ToolKind::Pen,
        ToolKind::Marker,
        ToolKind::Eraser,
        ToolKind::Ruler,
        ToolKind::Lasso,
        ToolKind::Move,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Pen => "pen",
            ToolKind::Marker => "marker",
            ToolKind::Eraser => "eraser",
            ToolKind::Ruler => "ruler",
            ToolKind::Lasso => "lasso",
            ToolKind::Move => "move",
        }
    }

    /// Freehand tools that record sampled points into a stroke.
    pub fn is_freehand(self) -> bool {
        matches!(
            self,
            ToolKind::Pencil | ToolKind::Pen | ToolKind::Marker | ToolKind::Eraser
        )
    }

    /// Rendering style for strokes made with this tool.
    pub fn style(self) -> ToolStyle {
        match self {
            ToolKind::Marker => ToolStyle {
                opacity: 0.3,
                dash: None,
                shadow_blur: 8.0,
            },
            ToolKind::Pen => ToolStyle {
                opacity: 0.7,
                ..ToolStyle::OPAQUE
            },
            ToolKind::Pencil => ToolStyle {
                opacity: 0.6,
                dash: Some(PENCIL_DASH),
                shadow_blur: 0.0,
            },
            ToolKind::Eraser | ToolKind::Ruler | ToolKind::Lasso | ToolKind::Move => {
                ToolStyle::OPAQUE
            }
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tool: {s}"))
    }
}

/// Dash pattern of pencil strokes (dash, gap).
pub const PENCIL_DASH: [f64; 2] = [0.5, 2.0];

/// How a tool's strokes are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStyle {
    /// Global alpha multiplier (0..=1).
    pub opacity: f64,
    /// Dash pattern, `None` for a solid line.
    pub dash: Option<[f64; 2]>,
    /// Shadow blur radius in the stroke's own color (0 = none).
    pub shadow_blur: f64,
}

impl ToolStyle {
    pub const OPAQUE: ToolStyle = ToolStyle {
        opacity: 1.0,
        dash: None,
        shadow_blur: 0.0,
    };
}

/// Per-tool thickness, edited by the thickness control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolThickness {
    pub pencil: f64,
    pub pen: f64,
    pub marker: f64,
    pub eraser: f64,
    /// Thickness of the straight pen strokes the ruler commits.
    pub ruler: f64,
}

impl Default for ToolThickness {
    fn default() -> Self {
        Self {
            pencil: 3.0,
            pen: 5.0,
            marker: 10.0,
            eraser: 15.0,
            ruler: 3.0,
        }
    }
}

impl ToolThickness {
    /// Thickness for a stroke-producing tool.
    pub fn get(&self, tool: ToolKind) -> Option<f64> {
        match tool {
            ToolKind::Pencil => Some(self.pencil),
            ToolKind::Pen => Some(self.pen),
            ToolKind::Marker => Some(self.marker),
            ToolKind::Eraser => Some(self.eraser),
            ToolKind::Ruler => Some(self.ruler),
            ToolKind::Lasso | ToolKind::Move => None,
        }
    }

    /// Set a tool's thickness, clamped to the control's range.
    /// Returns false for tools without a thickness.
    pub fn set(&mut self, tool: ToolKind, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let value = value.clamp(MIN_THICKNESS, MAX_THICKNESS);
        let slot = match tool {
            ToolKind::Pencil => &mut self.pencil,
            ToolKind::Pen => &mut self.pen,
            ToolKind::Marker => &mut self.marker,
            ToolKind::Eraser => &mut self.eraser,
            ToolKind::Ruler => &mut self.ruler,
            ToolKind::Lasso | ToolKind::Move => return false,
        };
        *slot = value;
        true
    }
}

//! Canvas configuration, loadable from JSON.

use crate::color::SerializableColor;
use crate::tools::ToolKind;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Percentage size {0} needs a container")]
    MissingContainer(Dimension),
    #[error("Palette must contain at least one color")]
    EmptyPalette,
    #[error("At least one tool must be enabled")]
    NoTools,
    #[error("Point spacing must be a non-negative number, got {0}")]
    InvalidSpacing(f64),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A width or height: absolute pixels or a percentage of the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    Pixels(f64),
    Percent(f64),
}

/// JSON form of a [`Dimension`]: a bare number or a string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl Dimension {
    /// Parse `"640"`, `"640px"` or `"50%"`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let text = text.trim();
        let invalid = || ConfigError::InvalidDimension(text.to_string());
        if let Some(percent) = text.strip_suffix('%') {
            let value: f64 = percent.trim().parse().map_err(|_| invalid())?;
            return Ok(Dimension::Percent(value));
        }
        let number = text.strip_suffix("px").unwrap_or(text);
        number.trim().parse().map(Dimension::Pixels).map_err(|_| invalid())
    }

    /// Resolve against the container extent along the same axis.
    pub fn resolve(self, container: Option<f64>) -> Result<f64, ConfigError> {
        let value = match self {
            Dimension::Pixels(px) => px,
            Dimension::Percent(pct) => {
                let extent = container.ok_or(ConfigError::MissingContainer(self))?;
                extent * pct / 100.0
            }
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidDimension(self.to_string()));
        }
        Ok(value)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Pixels(px) => write!(f, "{px}"),
            Dimension::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = ConfigError;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(px) => Ok(Dimension::Pixels(px)),
            DimensionRepr::Text(text) => Dimension::parse(&text),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dim: Dimension) -> Self {
        match dim {
            Dimension::Pixels(px) => DimensionRepr::Number(px),
            Dimension::Percent(_) => DimensionRepr::Text(dim.to_string()),
        }
    }
}

/// Output format(s) produced by an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
    /// SVG and PNG together.
    Both,
    Json,
}

/// UI color scheme label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Default paper color.
pub const DEFAULT_BACKGROUND: SerializableColor = SerializableColor::rgb(0xfc, 0xfc, 0xfa);

/// Default color swatches.
pub const DEFAULT_PALETTE: [SerializableColor; 9] = [
    SerializableColor::rgb(0x00, 0x00, 0x00),
    SerializableColor::rgb(0xff, 0x3b, 0x30),
    SerializableColor::rgb(0xff, 0x95, 0x00),
    SerializableColor::rgb(0xff, 0xcc, 0x00),
    SerializableColor::rgb(0x4c, 0xd9, 0x64),
    SerializableColor::rgb(0x5a, 0xc8, 0xfa),
    SerializableColor::rgb(0x05, 0x79, 0xff),
    SerializableColor::rgb(0x58, 0x56, 0xd6),
    SerializableColor::rgb(0xff, 0xff, 0xff),
];

/// Tools offered by default, in toolbar order.
pub const DEFAULT_TOOLS: [ToolKind; 6] = [
    ToolKind::Pencil,
    ToolKind::Pen,
    ToolKind::Marker,
    ToolKind::Eraser,
    ToolKind::Lasso,
    ToolKind::Ruler,
];

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub width: Dimension,
    pub height: Dimension,
    pub background_color: SerializableColor,
    pub tools: Vec<ToolKind>,
    pub colors: Vec<SerializableColor>,
    pub export_format: ExportFormat,
    pub theme: Theme,
    /// Minimum distance between recorded samples of a freehand stroke.
    ///
    /// Defaults to zero, which keeps every sample except exact repeats, so
    /// short unit-step drags record each point. Set it to
    /// [`DEFAULT_MIN_DISTANCE`](crate::geometry::DEFAULT_MIN_DISTANCE) to
    /// decimate dense pointer input at the cost of dropping sub-1.5 steps.
    pub min_point_distance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: Dimension::Pixels(800.0),
            height: Dimension::Pixels(600.0),
            background_color: DEFAULT_BACKGROUND,
            tools: DEFAULT_TOOLS.to_vec(),
            colors: DEFAULT_PALETTE.to_vec(),
            export_format: ExportFormat::default(),
            theme: Theme::default(),
            min_point_distance: 0.0,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tools.is_empty() {
            return Err(ConfigError::NoTools);
        }
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(self.min_point_distance.is_finite() && self.min_point_distance >= 0.0) {
            return Err(ConfigError::InvalidSpacing(self.min_point_distance));
        }
        Ok(())
    }

    /// Resolve the drawing surface size, given the container size if any.
    pub fn resolve_size(&self, container: Option<Size>) -> Result<Size, ConfigError> {
        let width = self.width.resolve(container.map(|c| c.width))?;
        let height = self.height.resolve(container.map(|c| c.height))?;
        Ok(Size::new(width, height))
    }

    /// Initial stroke color: first palette entry.
    pub fn initial_color(&self) -> SerializableColor {
        self.colors.first().copied().unwrap_or_default()
    }

    /// Initial tool: first configured tool.
    pub fn initial_tool(&self) -> ToolKind {
        self.tools.first().copied().unwrap_or_default()
    }

    pub fn has_tool(&self, tool: ToolKind) -> bool {
        self.tools.contains(&tool)
    }
}

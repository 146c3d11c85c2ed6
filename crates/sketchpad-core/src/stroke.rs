//! Stroke: a single drawn path with uniform tool, color and thickness.

use crate::color::SerializableColor;
use crate::smoothing;
use crate::tools::ToolKind;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable handle of a stroke inside a [`StrokeStore`](crate::store::StrokeStore).
pub type StrokeId = Uuid;

/// Reasons a stroke is rejected on import.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    #[error("stroke has no points")]
    NoPoints,
    #[error("stroke thickness must be positive, got {0}")]
    InvalidThickness(f64),
    #[error("stroke contains a non-finite coordinate")]
    NonFinitePoint,
}

/// A drawn path. Points are in input order and define the path direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub tool: ToolKind,
    pub color: SerializableColor,
    pub thickness: f64,
    pub points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke at its first sample.
    pub fn new(tool: ToolKind, color: SerializableColor, thickness: f64, first: Point) -> Self {
        Self {
            tool,
            color,
            thickness,
            points: vec![first],
        }
    }

    /// Build a stroke from a complete point list.
    pub fn from_points(
        tool: ToolKind,
        color: SerializableColor,
        thickness: f64,
        points: Vec<Point>,
    ) -> Result<Self, StrokeError> {
        let stroke = Self {
            tool,
            color,
            thickness,
            points,
        };
        stroke.validate()?;
        Ok(stroke)
    }

    /// Check the stroke invariants.
    pub fn validate(&self) -> Result<(), StrokeError> {
        if self.points.is_empty() {
            return Err(StrokeError::NoPoints);
        }
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(StrokeError::InvalidThickness(self.thickness));
        }
        if self.points.iter().any(|p| !p.is_finite()) {
            return Err(StrokeError::NonFinitePoint);
        }
        Ok(())
    }

    /// Whether the stroke renders as a filled dot.
    pub fn is_dot(&self) -> bool {
        self.points.len() < 2
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Scale the offsets of every point from `center` by `factor`.
    pub fn scale_about(&mut self, center: Point, factor: f64) {
        for point in &mut self.points {
            *point = center + (*point - center) * factor;
        }
    }

    /// Deep copy with every point shifted by `offset`.
    pub fn offset_copy(&self, offset: Vec2) -> Self {
        let mut copy = self.clone();
        copy.translate(offset);
        copy
    }

    /// Points after the smoothing pipeline (the geometry that gets drawn).
    pub fn smoothed_points(&self) -> Vec<Point> {
        smoothing::smooth(&self.points)
    }

    /// Smoothed polyline path; empty for dots.
    pub fn to_path(&self) -> BezPath {
        if self.is_dot() {
            return BezPath::new();
        }
        smoothing::polyline_path(&self.smoothed_points())
    }
}

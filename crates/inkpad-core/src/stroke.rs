//! Stroke and brush definitions for the handwriting surface.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Default ink color, a near-black dark gray.
    pub fn ink() -> Self {
        Self::new(0x11, 0x11, 0x11, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Brush kind, controlling stroke opacity.
///
/// Unrecognized values deserialize to `Pen`, which renders fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    Marker,
    Pencil,
    // serde requires the catch-all variant to come last.
    #[default]
    #[serde(other)]
    Pen,
}

impl BrushKind {
    /// Compositing alpha for strokes drawn with this brush.
    pub fn alpha(self) -> f64 {
        match self {
            BrushKind::Marker => 0.3,
            BrushKind::Pencil => 0.6,
            BrushKind::Pen => 1.0,
        }
    }

    /// Cycle to the next brush kind.
    pub fn next(self) -> Self {
        match self {
            BrushKind::Pen => BrushKind::Marker,
            BrushKind::Marker => BrushKind::Pencil,
            BrushKind::Pencil => BrushKind::Pen,
        }
    }

    /// Get display name for this brush kind.
    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Pen => "Pen",
            BrushKind::Marker => "Marker",
            BrushKind::Pencil => "Pencil",
        }
    }
}

/// Tool settings captured at the start of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Ink color.
    pub color: SerializableColor,
    /// Line width.
    pub width: f64,
    /// Brush kind (determines opacity).
    pub brush: BrushKind,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::ink(),
            width: 3.0,
            brush: BrushKind::Pen,
        }
    }
}

/// A committed freehand stroke: the points of one gesture plus the tool
/// settings active when it started.
///
/// Points are appended while the gesture is live; once committed into the
/// document a stroke is never mutated again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    /// Captured points, in gesture order.
    pub points: Vec<Point>,
    /// Style captured at gesture start.
    pub style: StrokeStyle,
}

impl Stroke {
    /// Create a stroke from captured points and the style they were drawn with.
    pub fn new(points: Vec<Point>, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Append a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding rectangle padded by the line width, or `None` for an empty
    /// stroke. Used to clip redraws to the region a stroke can touch.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut rect = Rect::from_points(*first, *first);
        for p in &self.points[1..] {
            rect = rect.union_pt(*p);
        }
        // Round caps extend half the width past every point; pad one more
        // unit for anti-aliased edges.
        Some(rect.inflate(self.style.width / 2.0 + 1.0, self.style.width / 2.0 + 1.0))
    }
}

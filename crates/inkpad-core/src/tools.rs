//! Pen tool: gesture capture for freehand strokes.

use crate::stroke::{BrushKind, SerializableColor, Stroke, StrokeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Live tool settings, driven by the host's brush/color/size controls.
///
/// Values are passed through unvalidated (an unrecognized brush already
/// collapsed to `Pen` at the deserialization boundary); only the width is
/// clamped to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub brush: BrushKind,
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            brush: BrushKind::Pen,
            color: SerializableColor::ink(),
            width: 3.0,
        }
    }
}

impl ToolSettings {
    /// Freeze the current settings into a stroke style.
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width.max(0.0),
            brush: self.brush,
        }
    }
}

/// State of a pen interaction.
#[derive(Debug, Clone, Default)]
enum PenState {
    /// Pen is idle, waiting for a pointer-down.
    #[default]
    Idle,
    /// A gesture is in progress.
    Active {
        /// Style frozen at gesture start.
        style: StrokeStyle,
        /// Points accumulated so far.
        points: Vec<Point>,
    },
}

/// Accumulates pointer positions into a stroke over one gesture.
///
/// The style is captured once at `begin` so the committed stroke renders
/// with the settings active when it was drawn, not the live tool state.
#[derive(Debug, Clone, Default)]
pub struct PenTool {
    state: PenState,
}

impl PenTool {
    /// Create a new idle pen tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture at `point` with the given settings.
    ///
    /// An already-active gesture is discarded; the host never delivers two
    /// downs without an up, but a dropped up event must not wedge the tool.
    pub fn begin(&mut self, point: Point, settings: &ToolSettings) {
        self.state = PenState::Active {
            style: settings.style(),
            points: vec![point],
        };
    }

    /// Append a point to the active gesture. No-op when idle.
    pub fn update(&mut self, point: Point) {
        if let PenState::Active { points, .. } = &mut self.state {
            points.push(point);
        }
    }

    /// End the gesture and commit the accumulated points as a stroke.
    ///
    /// The pointer-up itself captures no coordinate; only down and move
    /// positions end up in the stroke. Returns `None` when no gesture was
    /// active.
    pub fn end(&mut self) -> Option<Stroke> {
        match std::mem::take(&mut self.state) {
            PenState::Active { style, points } => Some(Stroke::new(points, style)),
            PenState::Idle => None,
        }
    }

    /// Cancel the current gesture, discarding its points.
    pub fn cancel(&mut self) {
        self.state = PenState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, PenState::Active { .. })
    }

    /// The in-progress stroke, for live preview rendering.
    pub fn preview_stroke(&self) -> Option<Stroke> {
        if let PenState::Active { style, points } = &self.state {
            Some(Stroke::new(points.clone(), *style))
        } else {
            None
        }
    }

    /// Style of the active gesture, if any.
    pub fn active_style(&self) -> Option<StrokeStyle> {
        if let PenState::Active { style, .. } = &self.state {
            Some(*style)
        } else {
            None
        }
    }

    /// The last two captured points, spanning the newest segment.
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        if let PenState::Active { points, .. } = &self.state {
            let last = *points.last()?;
            let prev = points.len().checked_sub(2).map(|i| points[i]).unwrap_or(last);
            Some((prev, last))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_accumulates_points_in_order() {
        let mut pen = PenTool::new();
        let settings = ToolSettings::default();

        pen.begin(Point::new(10.0, 10.0), &settings);
        pen.update(Point::new(20.0, 10.0));
        pen.update(Point::new(20.0, 20.0));
        let stroke = pen.end().unwrap();

        assert_eq!(stroke.points.len(), 3);
        assert_eq!(stroke.points[0], Point::new(10.0, 10.0));
        assert_eq!(stroke.points[1], Point::new(20.0, 10.0));
        assert_eq!(stroke.points[2], Point::new(20.0, 20.0));
        assert!(!pen.is_active());
    }

    #[test]
    fn test_style_frozen_at_gesture_start() {
        let mut pen = PenTool::new();
        let mut settings = ToolSettings {
            brush: BrushKind::Marker,
            width: 8.0,
            ..ToolSettings::default()
        };

        pen.begin(Point::new(0.0, 0.0), &settings);
        // Control changes mid-gesture must not affect the stroke.
        settings.brush = BrushKind::Pen;
        settings.width = 1.0;
        let stroke = pen.end().unwrap();

        assert_eq!(stroke.style.brush, BrushKind::Marker);
        assert_eq!(stroke.style.width, 8.0);
    }

    #[test]
    fn test_update_while_idle_is_noop() {
        let mut pen = PenTool::new();
        pen.update(Point::new(1.0, 1.0));
        assert!(!pen.is_active());
        assert!(pen.end().is_none());
    }

    #[test]
    fn test_up_position_is_not_captured() {
        let mut pen = PenTool::new();
        let settings = ToolSettings::default();

        // Down at A, up at B with no move in between: a one-point stroke,
        // not an A-to-B segment.
        pen.begin(Point::new(0.0, 0.0), &settings);
        let stroke = pen.end().unwrap();
        assert_eq!(stroke.points.len(), 1);
        assert_eq!(stroke.points[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut pen = PenTool::new();
        pen.begin(Point::new(0.0, 0.0), &ToolSettings::default());
        pen.cancel();
        assert!(!pen.is_active());
        assert!(pen.preview_stroke().is_none());
    }

    #[test]
    fn test_negative_width_is_clamped() {
        let settings = ToolSettings {
            width: -2.0,
            ..ToolSettings::default()
        };
        assert_eq!(settings.style().width, 0.0);
    }
}

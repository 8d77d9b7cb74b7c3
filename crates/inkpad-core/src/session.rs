//! Drawing session: owns the document, tool state and surface settings,
//! and routes host events into them.

use crate::background::BackgroundStyle;
use crate::document::SketchDocument;
use crate::input::PointerEvent;
use crate::stroke::{BrushKind, SerializableColor, Stroke};
use crate::tools::{PenTool, ToolSettings};
use kurbo::{Point, Rect, Size};

/// Default drawable surface width in pixels.
pub const SURFACE_WIDTH: f64 = 900.0;
/// Default drawable surface height in pixels.
pub const SURFACE_HEIGHT: f64 = 600.0;

/// One drawing surface and everything mutable on it.
///
/// The host application owns a session per canvas and feeds it pointer
/// events and control changes; nothing here is global, so independent
/// canvases and unit tests get isolated state for free.
#[derive(Debug, Clone, Default)]
pub struct SketchSession {
    /// The document being drawn into.
    pub document: SketchDocument,
    /// Pen tool capturing the active gesture.
    pub tool: PenTool,
    /// Live tool settings.
    pub settings: ToolSettings,
    /// Current background style.
    pub background: BackgroundStyle,
}

impl SketchSession {
    /// Create a session with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size of the drawing area.
    pub fn surface_size(&self) -> Size {
        Size::new(SURFACE_WIDTH, SURFACE_HEIGHT)
    }

    /// Route a pointer event into the session.
    ///
    /// Returns the surface region invalidated by the event, padded for the
    /// current line width, or `None` when nothing changed. A pointer-down
    /// snapshots the document for undo (once per gesture, never per point)
    /// and thereby clears the redo branch.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Rect> {
        match event {
            PointerEvent::Down { position } => {
                self.document.push_undo();
                self.tool.begin(position, &self.settings);
                Some(self.pad(Rect::from_points(position, position)))
            }
            PointerEvent::Move { position } => {
                if !self.tool.is_active() {
                    return None;
                }
                self.tool.update(position);
                self.tool
                    .last_segment()
                    .map(|(a, b)| self.pad(Rect::from_points(a, b)))
            }
            PointerEvent::Up { .. } => {
                let stroke = self.tool.end()?;
                let region = stroke.bounds();
                log::debug!(
                    "gesture committed: {} points, brush {}",
                    stroke.len(),
                    stroke.style.brush.name()
                );
                self.document.add_stroke(stroke);
                region
            }
        }
    }

    /// Pad a region by the line width plus an anti-aliasing margin. Uses
    /// the active gesture's frozen width; control changes mid-gesture must
    /// not shrink the invalidated region below what gets inked.
    fn pad(&self, rect: Rect) -> Rect {
        let width = self
            .tool
            .active_style()
            .map(|style| style.width)
            .unwrap_or_else(|| self.settings.width.max(0.0));
        let margin = width / 2.0 + 1.0;
        rect.inflate(margin, margin)
    }

    /// The in-progress stroke, if a gesture is active.
    pub fn preview_stroke(&self) -> Option<Stroke> {
        self.tool.preview_stroke()
    }

    /// Undo the last gesture. Returns true if anything changed; the caller
    /// should trigger a full redraw when it did.
    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    /// Redo the last undone gesture. Returns true if anything changed.
    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }

    /// Brush control changed.
    pub fn set_brush(&mut self, brush: BrushKind) {
        self.settings.brush = brush;
    }

    /// Color control changed.
    pub fn set_color(&mut self, color: SerializableColor) {
        self.settings.color = color;
    }

    /// Size control changed.
    pub fn set_width(&mut self, width: f64) {
        self.settings.width = width;
    }

    /// Background style control changed. Ink is untouched: the next full
    /// redraw repaints every committed stroke over the new pattern.
    pub fn set_background(&mut self, style: BackgroundStyle) {
        self.background = style;
    }

    /// Convenience for hosts that deliver raw positions.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<Rect> {
        self.handle_pointer(PointerEvent::Down {
            position: Point::new(x, y),
        })
    }

    /// Convenience for hosts that deliver raw positions.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Rect> {
        self.handle_pointer(PointerEvent::Move {
            position: Point::new(x, y),
        })
    }

    /// Convenience for hosts that deliver raw positions.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<Rect> {
        self.handle_pointer(PointerEvent::Up {
            position: Point::new(x, y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_commits_one_stroke() {
        let mut session = SketchSession::new();
        session.pointer_down(10.0, 10.0);
        session.pointer_move(20.0, 10.0);
        session.pointer_move(20.0, 20.0);
        session.pointer_up(20.0, 20.0);

        assert_eq!(session.document.len(), 1);
        let stroke = &session.document.strokes[0];
        assert_eq!(stroke.points.len(), 3);
        assert_eq!(stroke.points[0], Point::new(10.0, 10.0));
        assert_eq!(stroke.points[1], Point::new(20.0, 10.0));
        assert_eq!(stroke.points[2], Point::new(20.0, 20.0));
    }

    #[test]
    fn test_undo_removes_stroke_and_redo_restores_it() {
        let mut session = SketchSession::new();
        session.pointer_down(10.0, 10.0);
        session.pointer_move(20.0, 20.0);
        session.pointer_up(20.0, 20.0);

        let id = session.document.strokes[0].id();
        assert!(session.undo());
        assert!(session.document.is_empty());
        assert!(session.redo());
        assert_eq!(session.document.len(), 1);
        assert_eq!(session.document.strokes[0].id(), id);
    }

    #[test]
    fn test_new_gesture_after_undo_clears_redo() {
        let mut session = SketchSession::new();
        session.pointer_down(10.0, 10.0);
        session.pointer_up(20.0, 20.0);
        assert!(session.undo());

        session.pointer_down(30.0, 30.0);
        session.pointer_up(40.0, 40.0);
        assert!(!session.redo());
        assert_eq!(session.document.len(), 1);
    }

    #[test]
    fn test_snapshot_taken_once_per_gesture() {
        let mut session = SketchSession::new();
        session.pointer_down(0.0, 0.0);
        session.pointer_move(5.0, 5.0);
        session.pointer_move(9.0, 9.0);
        session.pointer_up(9.0, 9.0);

        // One undo steps over the entire gesture, not single points.
        assert!(session.undo());
        assert!(session.document.is_empty());
        assert!(!session.undo());
    }

    #[test]
    fn test_up_away_from_last_point_adds_no_segment() {
        let mut session = SketchSession::new();
        session.pointer_down(100.0, 100.0);
        session.pointer_up(200.0, 100.0);

        // The up coordinate is discarded: a one-point stroke, which the
        // renderer drops, not a visible segment to (200, 100).
        assert_eq!(session.document.len(), 1);
        assert_eq!(session.document.strokes[0].points.len(), 1);
        assert_eq!(
            session.document.strokes[0].points[0],
            Point::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut session = SketchSession::new();
        assert!(session.pointer_move(5.0, 5.0).is_none());
        assert!(session.pointer_up(5.0, 5.0).is_none());
        assert!(session.document.is_empty());
        // The ignored up consumed no undo snapshot.
        assert!(!session.document.can_undo());
    }

    #[test]
    fn test_move_dirty_region_covers_new_segment() {
        let mut session = SketchSession::new();
        session.settings.width = 4.0;
        session.pointer_down(10.0, 10.0);
        let region = session.pointer_move(30.0, 10.0).unwrap();

        assert!(region.x0 <= 10.0 - 2.0);
        assert!(region.x1 >= 30.0 + 2.0);
        assert!(region.y0 <= 8.0 && region.y1 >= 12.0);
    }

    #[test]
    fn test_setting_changes_do_not_touch_committed_strokes() {
        let mut session = SketchSession::new();
        session.pointer_down(0.0, 0.0);
        session.pointer_up(5.0, 5.0);

        session.set_brush(BrushKind::Marker);
        session.set_width(12.0);
        session.set_color(SerializableColor::new(255, 0, 0, 255));
        session.set_background(BackgroundStyle::Grid);

        let stroke = &session.document.strokes[0];
        assert_eq!(stroke.style.brush, BrushKind::Pen);
        assert_eq!(stroke.style.width, 3.0);
        assert_eq!(stroke.style.color, SerializableColor::ink());
    }
}

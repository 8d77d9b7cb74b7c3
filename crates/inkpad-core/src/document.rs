//! Sketch document and undo/redo state management.

use crate::stroke::{Stroke, StrokeId};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// A structural snapshot of document state for undo/redo.
///
/// Snapshots are plain clones of the stroke list. Restoring one is a
/// synchronous swap, so undo/redo never involve re-encoding or decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentSnapshot {
    strokes: Vec<Stroke>,
}

/// A sketch document: the ordered stroke log plus its undo/redo history.
///
/// The stroke list is the single source of truth; rendering is a pure
/// function of it. It is append-only while drawing and replaced wholesale
/// on undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Committed strokes, in drawing order (back to front).
    pub strokes: Vec<Stroke>,
    /// Undo history stack.
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    /// Redo history stack.
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for SketchDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            strokes: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Take a snapshot of the current document state for undo.
    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            strokes: self.strokes.clone(),
        }
    }

    /// Push current state to undo stack (call before making changes).
    ///
    /// Any new edit discards the redo branch: redo is only ever valid for
    /// states most recently undone.
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);

        // Clear redo stack when new changes are made
        self.redo_stack.clear();

        // Limit undo history size
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let current = self.snapshot();
            self.redo_stack.push(current);

            self.strokes = snapshot.strokes;
            log::debug!("undo: {} strokes restored", self.strokes.len());
            true
        } else {
            false
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.undo_stack.push(current);

            self.strokes = snapshot.strokes;
            log::debug!("redo: {} strokes restored", self.strokes.len());
            true
        } else {
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Append a committed stroke to the document.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Get a stroke by ID.
    pub fn get_stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    /// Clear all strokes from the document.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Get the bounding box of all strokes.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for stroke in &self.strokes {
            let Some(bounds) = stroke.bounds() else {
                continue;
            };
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Serialize the document to JSON. Undo/redo history is not persisted.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;
    use kurbo::Point;

    fn two_point_stroke(x: f64) -> Stroke {
        Stroke::new(
            vec![Point::new(x, 0.0), Point::new(x, 10.0)],
            StrokeStyle::default(),
        )
    }

    #[test]
    fn test_document_creation() {
        let doc = SketchDocument::new();
        assert!(doc.is_empty());
        assert!(doc.bounds().is_none());
        assert!(!doc.can_undo());
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_stroke_lookup_and_bounds() {
        let mut doc = SketchDocument::new();
        let stroke = two_point_stroke(5.0);
        let id = stroke.id();
        doc.add_stroke(stroke);

        assert!(doc.get_stroke(id).is_some());
        let bounds = doc.bounds().unwrap();
        assert!(bounds.contains(kurbo::Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_undo_restores_prior_strokes() {
        let mut doc = SketchDocument::new();
        doc.push_undo();
        doc.add_stroke(two_point_stroke(1.0));

        assert_eq!(doc.len(), 1);
        assert!(doc.undo());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_undo_then_redo_is_identity() {
        let mut doc = SketchDocument::new();
        doc.push_undo();
        doc.add_stroke(two_point_stroke(1.0));
        doc.push_undo();
        doc.add_stroke(two_point_stroke(2.0));
        let before = doc.strokes.clone();

        assert!(doc.undo());
        assert_eq!(doc.len(), 1);
        assert!(doc.redo());
        assert_eq!(doc.len(), 2);
        for (a, b) in doc.strokes.iter().zip(&before) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.points, b.points);
        }
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut doc = SketchDocument::new();
        doc.push_undo();
        doc.add_stroke(two_point_stroke(1.0));

        assert!(doc.undo());
        assert!(doc.can_redo());

        // A fresh edit discards the undone branch.
        doc.push_undo();
        doc.add_stroke(two_point_stroke(2.0));
        assert!(!doc.can_redo());
        assert!(!doc.redo());
    }

    #[test]
    fn test_undo_redo_on_empty_stacks_is_noop() {
        let mut doc = SketchDocument::new();
        assert!(!doc.undo());
        assert!(!doc.redo());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_history_is_capped() {
        let mut doc = SketchDocument::new();
        for i in 0..(MAX_UNDO_HISTORY + 10) {
            doc.push_undo();
            doc.add_stroke(two_point_stroke(i as f64));
        }

        let mut undone = 0;
        while doc.undo() {
            undone += 1;
        }
        assert_eq!(undone, MAX_UNDO_HISTORY);
        // Oldest states fell off the stack; ten strokes remain.
        assert_eq!(doc.len(), 10);
    }

    #[test]
    fn test_json_round_trip_skips_history() {
        let mut doc = SketchDocument::new();
        doc.push_undo();
        doc.add_stroke(two_point_stroke(1.0));

        let json = doc.to_json().unwrap();
        let restored = SketchDocument::from_json(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(!restored.can_undo());
        assert!(!restored.can_redo());
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let mut doc = SketchDocument::new();
        doc.add_stroke(two_point_stroke(4.0));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.json");
        std::fs::write(&path, doc.to_json().unwrap()).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let restored = SketchDocument::from_json(&json).unwrap();
        assert_eq!(restored.id, doc.id);
        assert_eq!(restored.len(), 1);
    }
}

//! Inkpad Core Library
//!
//! Platform-agnostic drawing state and logic for the Inkpad handwriting
//! surface: strokes, brush settings, the sketch document with snapshot
//! undo/redo, and the session that routes pointer input into all of them.

pub mod background;
pub mod document;
pub mod input;
pub mod session;
pub mod stroke;
pub mod tools;

pub use background::BackgroundStyle;
pub use document::SketchDocument;
pub use input::PointerEvent;
pub use session::{SketchSession, SURFACE_HEIGHT, SURFACE_WIDTH};
pub use stroke::{BrushKind, SerializableColor, Stroke, StrokeId, StrokeStyle};
pub use tools::{PenTool, ToolSettings};

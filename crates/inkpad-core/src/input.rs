//! Pointer input events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/pen/touch handling.
///
/// Coordinates are relative to the drawing surface. The host run-loop
/// delivers these sequentially; a gesture is the span from `Down` to `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    /// The surface position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_accessor() {
        let p = Point::new(12.0, 34.0);
        assert_eq!(PointerEvent::Down { position: p }.position(), p);
        assert_eq!(PointerEvent::Move { position: p }.position(), p);
        assert_eq!(PointerEvent::Up { position: p }.position(), p);
    }
}

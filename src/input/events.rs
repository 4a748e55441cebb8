use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events that can be handled by the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap, places a vertex while drawing
    Click {
        position: Point,
        button: MouseButton,
    },
    /// Double click/tap, finishes the active sketch
    DoubleClick { position: Point },
    /// Mouse/finger move, drags the pending vertex while drawing
    MouseMove { position: Point },
    /// Drag in progress (map pan)
    Drag { delta: Point },
    /// Scroll wheel or pinch zoom
    Scroll { delta: f64, position: Point },
    /// Viewport/window resize
    Resize { size: Point },
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Click { position, .. } => Some(*position),
            InputEvent::DoubleClick { position } => Some(*position),
            InputEvent::MouseMove { position } => Some(*position),
            InputEvent::Scroll { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Checks whether this event can affect an in-progress sketch
    pub fn is_draw_event(&self) -> bool {
        matches!(
            self,
            InputEvent::Click { .. } | InputEvent::DoubleClick { .. } | InputEvent::MouseMove { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_event_position() {
        let click = InputEvent::Click {
            position: Point::new(100.0, 200.0),
            button: MouseButton::Left,
        };
        assert_eq!(click.position(), Some(Point::new(100.0, 200.0)));

        let drag = InputEvent::Drag {
            delta: Point::new(5.0, 5.0),
        };
        assert_eq!(drag.position(), None);
    }

    #[test]
    fn test_draw_event_classification() {
        let move_event = InputEvent::MouseMove {
            position: Point::new(50.0, 75.0),
        };
        assert!(move_event.is_draw_event());

        let scroll = InputEvent::Scroll {
            delta: 1.0,
            position: Point::new(0.0, 0.0),
        };
        assert!(!scroll.is_draw_event());
    }
}

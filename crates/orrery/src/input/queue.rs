/// Host events the session understands. Pointer coordinates are raw pixels,
/// origin top-left, +y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A press began at (x, y). Starts a camera drag.
    PointerDown { x: f32, y: f32 },
    /// The press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer left the canvas. Clears hover.
    PointerLeave,
    /// Wheel scroll, in pixels. Positive = away from the user (zoom out).
    Wheel { delta_y: f32 },
    /// The canvas was resized.
    Resize { width: f32, height: f32 },
    /// Speed slider moved.
    SetSpeed { multiplier: f32 },
    /// Orbit-line checkbox toggled.
    SetOrbitLinesVisible { visible: bool },
}

/// A queue of input events.
/// The host writes events between frames; the session drains them at the
/// start of each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-note pointer drag.
//!
//! The controller only does position math; releasing hover timers and
//! hiding the edit badge on drag start are the caller's side of the
//! contract (see `BoardApp`). There is no momentum, no group drag, and a
//! drag never changes stacking order.

use crate::constants::NOTE_SIZE;
use crate::geometry::{BoardBounds, Point};

#[derive(Debug, Clone, Copy, Default)]
pub struct DragController {
    dragging: bool,
    /// Pointer offset from the note's top-left corner, captured at grab
    /// time so the note does not jump under the pointer.
    grab_dx: f64,
    grab_dy: f64,
}

impl DragController {
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Start a drag. Refused while the note is in edit mode.
    pub fn begin(&mut self, pointer: Point, note_pos: Point, editing: bool) -> bool {
        if editing {
            return false;
        }
        self.dragging = true;
        self.grab_dx = pointer.x - note_pos.x;
        self.grab_dy = pointer.y - note_pos.y;
        true
    }

    /// Translate pointer motion into the next clamped note position.
    /// Returns `None` when there is nothing to do: no active drag, or the
    /// note entered edit mode mid-gesture.
    pub fn motion(&self, pointer: Point, bounds: BoardBounds, editing: bool) -> Option<Point> {
        if !self.dragging || editing {
            return None;
        }
        let raw = Point::new(pointer.x - self.grab_dx, pointer.y - self.grab_dy);
        Some(bounds.clamp_origin(raw, NOTE_SIZE))
    }

    pub fn end(&mut self) {
        self.dragging = false;
    }
}

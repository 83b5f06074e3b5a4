//! Board-space geometry.
//!
//! The engine works in *board units*, a virtual pixel space independent of
//! terminal cells. All placement, drag, and overlap math lives here or is
//! built on the helpers here; the unit↔cell scale factors in
//! [`crate::constants`] are only applied at the input and render boundaries.

use ratatui::layout::Rect;

use crate::constants::{NOTE_SIZE, UNITS_PER_COL, UNITS_PER_ROW};

/// Cell footprint of a note: `NOTE_SIZE` board units per axis.
pub const NOTE_COLS: u16 = (NOTE_SIZE / UNITS_PER_COL) as u16;
pub const NOTE_ROWS: u16 = (NOTE_SIZE / UNITS_PER_ROW) as u16;

/// A point in board units. Also used for note origins (top-left corners).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Usable board surface, in board units, with origin `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardBounds {
    pub width: f64,
    pub height: f64,
}

impl BoardBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bounds covered by a terminal region of `cols x rows` cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            width: cols as f64 * UNITS_PER_COL,
            height: rows as f64 * UNITS_PER_ROW,
        }
    }

    /// Clamp an origin so a `size`-square anchored there stays on the board.
    pub fn clamp_origin(&self, p: Point, size: f64) -> Point {
        Point::new(
            clamp(p.x, 0.0, self.width - size),
            clamp(p.y, 0.0, self.height - size),
        )
    }
}

/// Three-way clamp. When `hi < lo` (surface smaller than a note), `hi` wins,
/// matching the origin-clamp convention used throughout.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Per-axis overlap extent of two `size`-square rectangles anchored at `a`
/// and `b`. Each component is `>= 0`; a pair disjoint on an axis yields zero
/// for that axis.
pub fn overlap_extent(a: Point, b: Point, size: f64) -> (f64, f64) {
    let w = (a.x + size).min(b.x + size) - a.x.max(b.x);
    let h = (a.y + size).min(b.y + size) - a.y.max(b.y);
    (w.max(0.0), h.max(0.0))
}

/// Convert a pointer cell (board-local column/row) to board units. The cell's
/// top-left corner is used so drag grab offsets stay stable.
pub fn cell_to_units(col: u16, row: u16) -> Point {
    Point::new(col as f64 * UNITS_PER_COL, row as f64 * UNITS_PER_ROW)
}

/// Convert a board-unit position to the cell that contains it.
pub fn units_to_cell(p: Point) -> (u16, u16) {
    let col = (p.x / UNITS_PER_COL).floor().max(0.0) as u16;
    let row = (p.y / UNITS_PER_ROW).floor().max(0.0) as u16;
    (col, row)
}

/// Terminal rectangle a note occupies, given the board's screen region.
/// Positions are clamped to board units already, so the rect always starts
/// inside `board`; the width/height may poke past it on tiny terminals and
/// get clipped at render time.
pub fn note_cell_rect(pos: Point, board: Rect) -> Rect {
    let (col, row) = units_to_cell(pos);
    Rect {
        x: board.x.saturating_add(col),
        y: board.y.saturating_add(row),
        width: NOTE_COLS,
        height: NOTE_ROWS,
    }
}

/// Whether a terminal cell lies inside a rect.
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

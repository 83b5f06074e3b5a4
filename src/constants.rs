//! Shared crate-wide constants.

use std::time::Duration;

/// Square footprint of a note, in board units. Notes never resize, so every
/// collision and coverage computation works on `NOTE_SIZE x NOTE_SIZE`
/// squares.
pub const NOTE_SIZE: f64 = 180.0;

/// How much two notes may overlap per axis before the spawn planner treats
/// them as "too close".
///
/// Units: board units. Raising this lets freshly posted notes sit closer
/// together; lowering it spreads them out and pushes the planner into its
/// repulsion fallback sooner on crowded boards.
pub const ALLOWED_OVERLAP: f64 = 20.0;

/// Minimum per-axis separation between note origins for a spawn candidate to
/// be accepted outright. Two notes conflict only when BOTH axis gaps fall
/// below this value.
pub const MIN_SEPARATION: f64 = NOTE_SIZE - ALLOWED_OVERLAP;

/// Maximum jitter applied around the board center when generating a spawn
/// candidate, per axis in each direction.
pub const SPAWN_JITTER: f64 = 100.0;

/// Number of additional random candidates the spawn planner draws before
/// giving up on pure probing and switching to repulsion.
pub const SPAWN_PROBES: usize = 35;

/// Iteration cap for the repulsion fallback. The fallback is best-effort; a
/// saturated board can exhaust this budget and still return a touching
/// position.
pub const REPULSION_STEPS: usize = 20;

/// Distance one neighboring note pushes a repulsed candidate per iteration.
///
/// Units: board units.
pub const REPULSION_PUSH: f64 = 24.0;

/// Spawn position used when the board surface has not been laid out yet.
pub const FALLBACK_SPAWN: (f64, f64) = (50.0, 50.0);

/// Coverage ratio at or above which a note counts as mostly covered and a
/// hover resolves to an overlap notice instead of a promotion.
pub const COVERED_RATIO: f64 = 0.6;

/// Hover time before the edit badge is revealed on a note.
pub const EDIT_BADGE_DELAY: Duration = Duration::from_secs(3);

/// Hover time before the overlap resolution runs (promote the note, or
/// report how many neighbors cover it).
pub const HOVER_RESOLVE_DELAY: Duration = Duration::from_secs(5);

/// Lifetime of the transient overlap notice before it dismisses itself.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Delay between opening an edit session and focusing its surface. Gives the
/// rendered editor one frame to exist before the caret is placed.
pub const EDIT_FOCUS_DELAY: Duration = Duration::from_millis(30);

/// Upper bound on visible characters in a note.
pub const MAX_CHARS: usize = 180;

/// Upper bound on lines in a note.
pub const MAX_LINES: usize = 7;

/// Horizontal size of one terminal cell, in board units.
///
/// Cells are roughly twice as tall as they are wide, so the two scale
/// factors keep a note's `NOTE_SIZE` footprint visually square: 20 columns
/// by 10 rows.
pub const UNITS_PER_COL: f64 = 9.0;

/// Vertical size of one terminal cell, in board units.
pub const UNITS_PER_ROW: f64 = 18.0;

/// Magnitude of the decorative tilt assigned to a note at creation.
///
/// Units: degrees, drawn from `[-NOTE_TILT_RANGE, +NOTE_TILT_RANGE]`.
pub const NOTE_TILT_RANGE: f64 = 4.0;

/// Bounds of the decorative shadow depth assigned at creation.
pub const SHADOW_MIN: u8 = 2;
pub const SHADOW_MAX: u8 = 5;

/// Main loop poll interval; also the resolution of hover/notice timers.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

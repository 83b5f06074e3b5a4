//! The timed hover state machine.
//!
//! Resting the pointer on a note arms two independent one-shot deadlines:
//! after 3 seconds the note reveals its edit badge, and after 5 seconds the
//! hover *resolves* — the note either promotes itself above the stack or,
//! when it is mostly buried, reports how many neighbors cover it. Leaving
//! the note, starting a drag, or removing the note cancels whatever has not
//! fired yet; cancellation and firing share the main loop, so a cancelled
//! deadline never goes off late.

use std::time::Instant;

use crate::constants::{EDIT_BADGE_DELAY, HOVER_RESOLVE_DELAY, NOTICE_TTL};
use crate::geometry::Point;
use crate::note::NoteId;
use crate::timer::Deadline;

/// What a hover session wants done, emitted from [`HoverSession::tick`].
/// The app layer owns the store and executes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    /// The 3-second mark: reveal the edit badge.
    ShowBadge,
    /// The 5-second mark: promote the note or report its coverage.
    Resolve,
}

/// One pointer's dwell on one note.
#[derive(Debug)]
pub struct HoverSession {
    note: NoteId,
    /// Where a coverage notice would be anchored; starts at the note center
    /// and then follows the live pointer.
    anchor: Point,
    badge_at: Deadline,
    resolve_at: Deadline,
    badge_shown: bool,
}

impl HoverSession {
    pub fn enter(note: NoteId, anchor: Point, now: Instant) -> Self {
        Self {
            note,
            anchor,
            badge_at: Deadline::after(now, EDIT_BADGE_DELAY),
            resolve_at: Deadline::after(now, HOVER_RESOLVE_DELAY),
            badge_shown: false,
        }
    }

    pub fn note(&self) -> NoteId {
        self.note
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn badge_shown(&self) -> bool {
        self.badge_shown
    }

    /// Track the pointer without disturbing the armed deadlines.
    pub fn motion(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// Cancel both deadlines and retract the badge. Used on drag start and
    /// on edit entry; dropping the session entirely is the leave path.
    /// Idempotent.
    pub fn cancel_timers(&mut self) {
        self.badge_at.cancel();
        self.resolve_at.cancel();
        self.badge_shown = false;
    }

    /// Fire any deadlines that `now` has reached, each at most once.
    pub fn tick(&mut self, now: Instant) -> Vec<HoverEvent> {
        let mut fired = Vec::new();
        if self.badge_at.fire(now) {
            self.badge_shown = true;
            fired.push(HoverEvent::ShowBadge);
        }
        if self.resolve_at.fire(now) {
            fired.push(HoverEvent::Resolve);
        }
        fired
    }
}

/// Transient "this note is buried" message, anchored near the pointer and
/// auto-dismissed. Ephemeral view state: it never touches the store.
#[derive(Debug, Clone)]
pub struct OverlapNotice {
    pub text: String,
    pub anchor: Point,
    expires_at: Deadline,
}

impl OverlapNotice {
    pub fn new(neighbors: usize, anchor: Point, now: Instant) -> Self {
        let text = if neighbors > 0 {
            format!("{neighbors} notes are overlapping this note")
        } else {
            "Notes are overlapping this note".to_string()
        };
        Self {
            text,
            anchor,
            expires_at: Deadline::after(now, NOTICE_TTL),
        }
    }

    /// True once the notice has outlived its display window.
    pub fn expired(&mut self, now: Instant) -> bool {
        self.expires_at.fire(now)
    }
}

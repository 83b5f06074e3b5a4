//! In-place note editing.
//!
//! An [`EditSession`] owns a working copy of one note's content plus an
//! explicit selection value. The selection is a pair of character offsets —
//! there is no ambient "current selection" anywhere else in the program —
//! and the save/restore pair exists so a formatting command always lands on
//! the user's last captured range even after focus wandered to a toolbar.

use std::time::Instant;

use crate::constants::{EDIT_FOCUS_DELAY, MAX_CHARS, MAX_LINES};
use crate::note::NoteId;
use crate::timer::Deadline;

use super::{FormatCommand, RichText};

/// A normalized character range; `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_cursor(self) -> bool {
        self.start == self.end
    }

    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Caret movement commands understood by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug)]
pub struct EditSession {
    note: NoteId,
    text: RichText,
    /// Selection anchor (where the selection started) and head (where the
    /// caret is); equal for a plain caret.
    anchor: usize,
    head: usize,
    saved: Option<Selection>,
    focus_at: Deadline,
    focused: bool,
}

impl EditSession {
    /// Open a session on a note's current content. The surface is not
    /// focused yet; focus lands after [`EDIT_FOCUS_DELAY`] via [`tick`],
    /// giving the editor one frame to appear first.
    ///
    /// [`tick`]: EditSession::tick
    pub fn open(note: NoteId, content: RichText, now: Instant) -> Self {
        Self {
            note,
            text: content,
            anchor: 0,
            head: 0,
            saved: None,
            focus_at: Deadline::after(now, EDIT_FOCUS_DELAY),
            focused: false,
        }
    }

    pub fn note(&self) -> NoteId {
        self.note
    }

    pub fn content(&self) -> &RichText {
        &self.text
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    pub fn caret(&self) -> usize {
        self.head
    }

    /// Drive the deferred focus. Once it fires, the caret moves to the end
    /// of the text and that position is captured as the saved selection.
    pub fn tick(&mut self, now: Instant) {
        if self.focus_at.fire(now) {
            self.focused = true;
            let end = self.text.char_len();
            self.anchor = end;
            self.head = end;
            self.save_selection();
        }
    }

    /// Capture the live selection for a later [`restore_selection`].
    ///
    /// [`restore_selection`]: EditSession::restore_selection
    pub fn save_selection(&mut self) {
        self.saved = Some(self.selection());
    }

    /// Reinstate the last captured selection. Repeated calls without an
    /// intervening save keep restoring the same range. Returns `None` when
    /// nothing was ever captured.
    pub fn restore_selection(&mut self) -> Option<Selection> {
        let sel = self.saved?.clamp(self.text.char_len());
        self.anchor = sel.start;
        self.head = sel.end;
        Some(sel)
    }

    /// Apply an inline-style command to the captured selection: restore,
    /// toggle, then re-capture the resulting range. Skipped gracefully when
    /// no selection was ever saved.
    pub fn apply(&mut self, cmd: FormatCommand) {
        let Some(sel) = self.restore_selection() else {
            return;
        };
        if !sel.is_cursor() {
            self.text.toggle(sel.start..sel.end, cmd);
        }
        self.save_selection();
    }

    /// Insert a character at the caret, replacing any selected range. Typing
    /// past [`MAX_CHARS`] is ignored, as is a newline that would exceed
    /// [`MAX_LINES`].
    pub fn insert_char(&mut self, ch: char) {
        let sel = self.selection();
        let after_removal = self.text.char_len() - (sel.end - sel.start);
        if after_removal >= MAX_CHARS {
            return;
        }
        if ch == '\n' && self.text.line_count() >= MAX_LINES {
            return;
        }
        let format = self.text.format_at(sel.start);
        if !sel.is_cursor() {
            self.text.delete(sel.start..sel.end);
        }
        self.text.insert(sel.start, ch.to_string().as_str(), format);
        self.anchor = sel.start + 1;
        self.head = self.anchor;
        self.save_selection();
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let sel = self.selection();
        if !sel.is_cursor() {
            self.text.delete(sel.start..sel.end);
            self.anchor = sel.start;
        } else if sel.start > 0 {
            self.text.delete(sel.start - 1..sel.start);
            self.anchor = sel.start - 1;
        } else {
            return;
        }
        self.head = self.anchor;
        self.save_selection();
    }

    /// Move the caret; with `extend` the anchor stays put so the selection
    /// grows or shrinks.
    pub fn move_caret(&mut self, mv: CaretMove, extend: bool) {
        let len = self.text.char_len();
        self.head = match mv {
            CaretMove::Left => self.head.saturating_sub(1),
            CaretMove::Right => (self.head + 1).min(len),
            CaretMove::Home => 0,
            CaretMove::End => len,
        };
        if !extend {
            self.anchor = self.head;
        }
        self.save_selection();
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.text.char_len();
        self.save_selection();
    }

    /// Close the session, yielding the edited content for the board store.
    pub fn commit(self) -> (NoteId, RichText) {
        (self.note, self.text)
    }
}

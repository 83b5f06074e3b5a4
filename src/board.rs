//! The board store: the single source of truth for the note collection.
//!
//! Every mutation rebuilds an immutable snapshot (`Arc<[Note]>`), so any
//! reader holding a snapshot — the renderer mid-frame, the overlap scan —
//! keeps seeing a consistent collection no matter what mutates in between.
//! Callers are responsible for clamping positions before calling
//! [`BoardStore::update`]; the store does not second-guess geometry.
//!
//! The store also owns the single-active-editor rule: at most one note can
//! be in edit mode at a time, enforced by [`BoardStore::begin_edit`].

use std::sync::Arc;

use crate::geometry::Point;
use crate::note::{Note, NoteColor, NoteId, NoteStyle};
use crate::richtext::RichText;

/// Partial update applied through [`BoardStore::update`]. Unset fields leave
/// the note untouched.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub pos: Option<Point>,
    pub content: Option<RichText>,
    pub z: Option<u32>,
}

impl NotePatch {
    pub fn pos(pos: Point) -> Self {
        Self {
            pos: Some(pos),
            ..Self::default()
        }
    }

    pub fn content(content: RichText) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn z(z: u32) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct BoardStore {
    notes: Arc<[Note]>,
    next_id: u64,
    editing: Option<NoteId>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    pub fn new() -> Self {
        Self {
            notes: Arc::from(Vec::new()),
            next_id: 1,
            editing: None,
        }
    }

    /// Current snapshot. Cheap to clone and safe to hold across mutations.
    pub fn notes(&self) -> Arc<[Note]> {
        Arc::clone(&self.notes)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Highest stacking order currently on the board; 0 when empty.
    pub fn max_z(&self) -> u32 {
        self.notes.iter().map(|n| n.z).max().unwrap_or(0)
    }

    pub fn add_note(
        &mut self,
        content: RichText,
        color: NoteColor,
        style: NoteStyle,
        pos: Point,
        tilt: f64,
        shadow_depth: u8,
    ) -> NoteId {
        let id = NoteId(self.next_id);
        self.next_id += 1;
        let mut notes = self.notes.to_vec();
        notes.push(Note {
            id,
            content,
            color,
            style,
            pos,
            tilt,
            shadow_depth,
            z: 0,
        });
        self.notes = Arc::from(notes);
        tracing::debug!(%id, x = pos.x, y = pos.y, "note added");
        id
    }

    /// Apply a patch to one note. Returns `false` when the note no longer
    /// exists (e.g. a stale timer firing after deletion).
    pub fn update(&mut self, id: NoteId, patch: NotePatch) -> bool {
        let Some(idx) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        let mut notes = self.notes.to_vec();
        let note = &mut notes[idx];
        if let Some(pos) = patch.pos {
            note.pos = pos;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(z) = patch.z {
            note.z = z;
        }
        self.notes = Arc::from(notes);
        true
    }

    pub fn remove(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        let notes: Vec<Note> = self.notes.iter().filter(|n| n.id != id).cloned().collect();
        if notes.len() == before {
            return false;
        }
        self.notes = Arc::from(notes);
        if self.editing == Some(id) {
            self.editing = None;
        }
        tracing::debug!(%id, "note removed");
        true
    }

    /// Claim the single edit slot for a note. Fails while another note is
    /// editing, or when the note does not exist. Re-claiming the same note
    /// succeeds.
    pub fn begin_edit(&mut self, id: NoteId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        match self.editing {
            Some(current) if current != id => false,
            _ => {
                self.editing = Some(id);
                true
            }
        }
    }

    pub fn end_edit(&mut self, id: NoteId) {
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    pub fn editing(&self) -> Option<NoteId> {
        self.editing
    }

    pub fn is_editing(&self, id: NoteId) -> bool {
        self.editing == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut BoardStore, x: f64, y: f64) -> NoteId {
        store.add_note(
            RichText::plain("note"),
            NoteColor::Yellow,
            NoteStyle::Plain,
            Point::new(x, y),
            0.0,
            2,
        )
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut store = BoardStore::new();
        let a = add(&mut store, 0.0, 0.0);
        let b = add(&mut store, 10.0, 0.0);
        store.remove(a);
        let c = add(&mut store, 20.0, 0.0);
        assert!(a < b && b < c);
    }

    #[test]
    fn snapshots_are_isolated_from_later_mutations() {
        let mut store = BoardStore::new();
        let id = add(&mut store, 0.0, 0.0);
        let before = store.notes();
        store.update(id, NotePatch::pos(Point::new(50.0, 60.0)));
        assert_eq!(before[0].pos, Point::new(0.0, 0.0));
        assert_eq!(store.get(id).unwrap().pos, Point::new(50.0, 60.0));
    }

    #[test]
    fn update_after_removal_reports_failure() {
        let mut store = BoardStore::new();
        let id = add(&mut store, 0.0, 0.0);
        store.remove(id);
        assert!(!store.update(id, NotePatch::z(3)));
    }

    #[test]
    fn only_one_note_edits_at_a_time() {
        let mut store = BoardStore::new();
        let a = add(&mut store, 0.0, 0.0);
        let b = add(&mut store, 10.0, 0.0);
        assert!(store.begin_edit(a));
        assert!(store.begin_edit(a));
        assert!(!store.begin_edit(b));
        store.end_edit(a);
        assert!(store.begin_edit(b));
    }

    #[test]
    fn removing_the_edited_note_clears_the_edit_slot() {
        let mut store = BoardStore::new();
        let a = add(&mut store, 0.0, 0.0);
        assert!(store.begin_edit(a));
        store.remove(a);
        assert_eq!(store.editing(), None);
    }

    #[test]
    fn max_z_tracks_patches() {
        let mut store = BoardStore::new();
        let a = add(&mut store, 0.0, 0.0);
        let b = add(&mut store, 10.0, 0.0);
        assert_eq!(store.max_z(), 0);
        store.update(a, NotePatch::z(5));
        store.update(b, NotePatch::z(2));
        assert_eq!(store.max_z(), 5);
    }
}

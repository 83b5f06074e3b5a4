//! Application state and event routing.
//!
//! `BoardApp` wires the engine together: pointer events become drags, hover
//! sessions, and badge clicks; key events go to the compose box or the
//! active edit session; the periodic tick drives every deadline. All note
//! mutations funnel through the board store.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::actions::Action;
use crate::board::{BoardStore, NotePatch};
use crate::compose::ComposeEditor;
use crate::drag::DragController;
use crate::geometry::{self, BoardBounds, Point, rect_contains};
use crate::hover::{HoverEvent, HoverSession, OverlapNotice};
use crate::keybindings::{InputContext, action_for};
use crate::note::{Note, NoteColor, NoteId, NoteStyle};
use crate::overlap::coverage;
use crate::richtext::{EditSession, FormatCommand, RichText};
use crate::spawn::{SpawnRng, draw_shadow_depth, draw_tilt, plan_spawn};

pub struct BoardApp {
    store: BoardStore,
    /// Screen region of the board surface, refreshed every frame; `None`
    /// until the first layout.
    board_area: Option<Rect>,
    board_name: String,
    board_code: String,
    /// Palette selection applied to the next posted note.
    color: NoteColor,
    style: NoteStyle,
    compose: ComposeEditor,
    drag: DragController,
    drag_note: Option<NoteId>,
    hover: Option<HoverSession>,
    edit: Option<EditSession>,
    notice: Option<OverlapNotice>,
    rng: Box<dyn SpawnRng>,
}

impl BoardApp {
    pub fn new(
        board_name: impl Into<String>,
        board_code: impl Into<String>,
        rng: Box<dyn SpawnRng>,
    ) -> Self {
        Self {
            store: BoardStore::new(),
            board_area: None,
            board_name: board_name.into(),
            board_code: board_code.into(),
            color: NoteColor::default(),
            style: NoteStyle::default(),
            compose: ComposeEditor::new(),
            drag: DragController::default(),
            drag_note: None,
            hover: None,
            edit: None,
            notice: None,
            rng,
        }
    }

    // ---- render-side accessors -------------------------------------------

    pub fn board_name(&self) -> &str {
        &self.board_name
    }

    pub fn board_code(&self) -> &str {
        &self.board_code
    }

    pub fn color(&self) -> NoteColor {
        self.color
    }

    pub fn style(&self) -> NoteStyle {
        self.style
    }

    pub fn compose(&self) -> &ComposeEditor {
        &self.compose
    }

    pub fn notice(&self) -> Option<&OverlapNotice> {
        self.notice.as_ref()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// The note currently showing its edit badge, if any.
    pub fn badged_note(&self) -> Option<NoteId> {
        self.hover
            .as_ref()
            .filter(|h| h.badge_shown())
            .map(|h| h.note())
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Notes in draw order: ascending `z`, insertion order breaking ties, so
    /// the most recently promoted note paints last (on top).
    pub fn notes_in_draw_order(&self) -> Vec<Note> {
        let snapshot = self.store.notes();
        let mut order: Vec<usize> = (0..snapshot.len()).collect();
        order.sort_by_key(|&i| (snapshot[i].z, i));
        order.into_iter().map(|i| snapshot[i].clone()).collect()
    }

    /// Called by the renderer every frame before notes are drawn, so spawn
    /// and drag always see the latest surface size.
    pub fn set_board_area(&mut self, area: Rect) {
        self.board_area = Some(area);
    }

    fn bounds(&self) -> Option<BoardBounds> {
        self.board_area
            .map(|a| BoardBounds::from_cells(a.width, a.height))
    }

    // ---- note lifecycle --------------------------------------------------

    /// Post the compose box content as a new note. Blank content posts
    /// nothing; a missing board surface falls back to a fixed position.
    pub fn post_note(&mut self) {
        let Some(content) = self.compose.take() else {
            return;
        };
        let snapshot = self.store.notes();
        let pos = plan_spawn(self.bounds(), &snapshot, self.rng.as_mut());
        let tilt = draw_tilt(self.rng.as_mut());
        let shadow = draw_shadow_depth(self.rng.as_mut());
        self.store
            .add_note(content, self.color, self.style, pos, tilt, shadow);
    }

    /// Preload the compose box and post immediately (used for seeding notes
    /// from the command line).
    pub fn seed_note(&mut self, content: RichText) {
        self.compose.seed(content);
        self.post_note();
    }

    pub fn update_note(&mut self, id: NoteId, patch: NotePatch) -> bool {
        self.store.update(id, patch)
    }

    /// Delete a note. Refused while that note is being edited (the delete
    /// control is hidden during an edit); otherwise tears down any hover
    /// session aimed at it so no timer fires against a missing note.
    pub fn remove_note(&mut self, id: NoteId) {
        if self.store.is_editing(id) {
            return;
        }
        if !self.store.remove(id) {
            return;
        }
        if self.hover.as_ref().is_some_and(|h| h.note() == id) {
            self.hover = None;
            self.notice = None;
        }
    }

    // ---- edit session ----------------------------------------------------

    /// Open the in-place editor on a note. The store enforces that only one
    /// note edits at a time; a refused claim is a silent no-op.
    pub fn enter_edit(&mut self, id: NoteId, now: Instant) {
        if !self.store.begin_edit(id) {
            return;
        }
        if let Some(hover) = &mut self.hover
            && hover.note() == id
        {
            hover.cancel_timers();
        }
        let content = self
            .store
            .get(id)
            .map(|n| n.content.clone())
            .unwrap_or_default();
        tracing::debug!(%id, "edit session opened");
        self.edit = Some(EditSession::open(id, content, now));
    }

    /// Commit the active edit session back into the store.
    pub fn exit_edit(&mut self) {
        let Some(session) = self.edit.take() else {
            return;
        };
        let (id, content) = session.commit();
        self.store.update(id, NotePatch::content(content));
        self.store.end_edit(id);
        tracing::debug!(%id, "edit session committed");
    }

    pub fn apply_format(&mut self, cmd: FormatCommand) {
        if let Some(session) = &mut self.edit {
            session.apply(cmd);
        }
    }

    // ---- event routing ---------------------------------------------------

    /// Route one input event. Returns `true` when the event was consumed.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Key(key) => self.handle_key(key),
            _ => false,
        }
    }

    /// Advance every cooperative timer: hover deadlines, the deferred edit
    /// focus, and notice expiry.
    pub fn tick(&mut self, now: Instant) {
        let fired = match &mut self.hover {
            Some(hover) => hover.tick(now),
            None => Vec::new(),
        };
        for event in fired {
            match event {
                HoverEvent::ShowBadge => {}
                HoverEvent::Resolve => self.resolve_hover(now),
            }
        }
        if let Some(session) = &mut self.edit {
            session.tick(now);
        }
        if let Some(notice) = &mut self.notice
            && notice.expired(now)
        {
            self.notice = None;
        }
    }

    /// The 5-second decision: promote the hovered note above the stack, or
    /// report how buried it is.
    fn resolve_hover(&mut self, now: Instant) {
        let Some(hover) = &self.hover else {
            return;
        };
        let id = hover.note();
        let anchor = hover.anchor();
        let snapshot = self.store.notes();
        let Some(note) = snapshot.iter().find(|n| n.id == id) else {
            return;
        };
        let cov = coverage(note, &snapshot);
        if !cov.mostly_covered() {
            let z = self.store.max_z() + 1;
            self.store.update(id, NotePatch::z(z));
            tracing::debug!(%id, z, "note promoted");
        } else {
            tracing::debug!(%id, neighbors = cov.neighbors, "overlap notice shown");
            self.notice = Some(OverlapNotice::new(cov.neighbors, anchor, now));
        }
    }

    // ---- mouse -----------------------------------------------------------

    /// Topmost note under a pointer cell: highest `z` wins, insertion order
    /// breaks ties. Hit testing happens in cell space so clicks land exactly
    /// on the rectangles the renderer painted.
    fn note_at_cell(&self, column: u16, row: u16) -> Option<NoteId> {
        let area = self.board_area?;
        if !rect_contains(area, column, row) {
            return None;
        }
        let snapshot = self.store.notes();
        snapshot
            .iter()
            .enumerate()
            .filter(|(_, n)| rect_contains(geometry::note_cell_rect(n.pos, area), column, row))
            .max_by_key(|(i, n)| (n.z, *i))
            .map(|(_, n)| n.id)
    }

    /// Board-local pointer position in units, when inside the board.
    fn pointer_units(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.board_area?;
        if !rect_contains(area, column, row) {
            return None;
        }
        Some(geometry::cell_to_units(column - area.x, row - area.y))
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_down(mouse.column, mouse.row, now)
            }
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag.end();
                self.drag_note = None;
                true
            }
            MouseEventKind::Moved => self.pointer_moved(mouse.column, mouse.row, now),
            _ => false,
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let Some(area) = self.board_area else {
            return false;
        };
        let Some(id) = self.note_at_cell(column, row) else {
            return false;
        };
        let p = geometry::cell_to_units(column - area.x, row - area.y);
        let Some(note) = self.store.get(id) else {
            return false;
        };
        let cell_rect = geometry::note_cell_rect(note.pos, area);
        let note_pos = note.pos;
        let editing = self.store.is_editing(id);

        // note chrome first: the delete corner, then the revealed edit badge
        if !editing && (column, row) == badge::delete_cell(cell_rect) {
            self.remove_note(id);
            return true;
        }
        if self.badged_note() == Some(id) && (column, row) == badge::edit_cell(cell_rect) {
            self.enter_edit(id, now);
            return true;
        }
        if editing {
            // clicks land in the editable surface; nothing to route yet
            return true;
        }

        // grabbing a note beats any pending hover intent
        if let Some(hover) = &mut self.hover {
            hover.cancel_timers();
        }
        if self.drag.begin(p, note_pos, editing) {
            self.drag_note = Some(id);
        }
        true
    }

    fn pointer_drag(&mut self, column: u16, row: u16) -> bool {
        let Some(area) = self.board_area else {
            return false;
        };
        let Some(id) = self.drag_note else {
            return false;
        };
        // pointer may leave the board mid-drag; keep dragging and let the
        // clamp pull the note back
        let p = geometry::cell_to_units(
            column.saturating_sub(area.x),
            row.saturating_sub(area.y),
        );
        let bounds = BoardBounds::from_cells(area.width, area.height);
        let editing = self.store.is_editing(id);
        // movement implies no stable hover intent
        if let Some(hover) = &mut self.hover {
            hover.cancel_timers();
        }
        if let Some(pos) = self.drag.motion(p, bounds, editing) {
            self.store.update(id, NotePatch::pos(pos));
            return true;
        }
        false
    }

    fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) -> bool {
        if self.drag.dragging() {
            return false;
        }
        let hit = self
            .note_at_cell(column, row)
            .and_then(|id| self.pointer_units(column, row).map(|p| (id, p)));

        match (&mut self.hover, hit) {
            (Some(hover), Some((id, p))) if hover.note() == id => {
                // dwelling on the same note: follow the pointer, keep the
                // deadlines running
                hover.motion(p);
                true
            }
            (hover_slot, hit) => {
                // leaving one note (or empty space) for another
                if hover_slot.is_some() {
                    *hover_slot = None;
                    self.notice = None;
                }
                if let Some((id, _)) = hit
                    && !self.store.is_editing(id)
                    && let Some(note) = self.store.get(id)
                {
                    *hover_slot = Some(HoverSession::enter(id, note.center(), now));
                }
                hit.is_some()
            }
        }
    }

    // ---- keyboard --------------------------------------------------------

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let context = if self.edit.is_some() {
            InputContext::EditSession
        } else {
            InputContext::Compose
        };
        let Some(action) = action_for(key, context) else {
            return false;
        };
        match context {
            InputContext::EditSession => self.edit_action(action),
            InputContext::Compose => self.compose_action(action),
        }
        true
    }

    fn compose_action(&mut self, action: Action) {
        match action {
            Action::PostNote => self.post_note(),
            Action::CycleColor => self.color = self.color.next(),
            Action::CycleStyle => self.style = self.style.next(),
            Action::ToggleBold => self.compose.toggle(FormatCommand::Bold),
            Action::ToggleItalic => self.compose.toggle(FormatCommand::Italic),
            Action::ToggleUnderline => self.compose.toggle(FormatCommand::Underline),
            Action::CaretLeft => self.compose.move_left(),
            Action::CaretRight => self.compose.move_right(),
            Action::Backspace => self.compose.backspace(),
            Action::Newline => self.compose.insert_char('\n'),
            Action::Insert(c) => self.compose.insert_char(c),
            _ => {}
        }
    }

    fn edit_action(&mut self, action: Action) {
        use crate::richtext::CaretMove;
        match action {
            Action::FinishEdit => self.exit_edit(),
            Action::ToggleBold => self.apply_format(FormatCommand::Bold),
            Action::ToggleItalic => self.apply_format(FormatCommand::Italic),
            Action::ToggleUnderline => self.apply_format(FormatCommand::Underline),
            other => {
                let Some(session) = &mut self.edit else {
                    return;
                };
                match other {
                    Action::SelectAll => session.select_all(),
                    Action::CaretLeft => session.move_caret(CaretMove::Left, false),
                    Action::CaretRight => session.move_caret(CaretMove::Right, false),
                    Action::CaretHome => session.move_caret(CaretMove::Home, false),
                    Action::CaretEnd => session.move_caret(CaretMove::End, false),
                    Action::ExtendLeft => session.move_caret(CaretMove::Left, true),
                    Action::ExtendRight => session.move_caret(CaretMove::Right, true),
                    Action::Backspace => session.backspace(),
                    Action::Newline => session.insert_char('\n'),
                    Action::Insert(c) => session.insert_char(c),
                    _ => {}
                }
            }
        }
    }
}

/// Note-chrome cells, shared between hit testing here and the renderer so
/// clicks land exactly where the glyphs are painted.
pub mod badge {
    use ratatui::layout::Rect;

    /// Edit pencil: the note's top-left cell, live only while revealed.
    pub fn edit_cell(note: Rect) -> (u16, u16) {
        (note.x, note.y)
    }

    /// Delete corner: the note's top-right cell.
    pub fn delete_cell(note: Rect) -> (u16, u16) {
        (
            note.x.saturating_add(note.width.saturating_sub(1)),
            note.y,
        )
    }
}

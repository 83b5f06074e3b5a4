use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use corkboard::app::BoardApp;
use corkboard::constants::{EDIT_BADGE_DELAY, HOVER_RESOLVE_DELAY, NOTICE_TTL};
use corkboard::geometry::{self, Point};
use corkboard::note::NoteId;
use corkboard::richtext::{EditSession, RichText, Selection};
use corkboard::spawn::SpawnRng;

const AREA: Rect = Rect {
    x: 0,
    y: 1,
    width: 100,
    height: 30,
};

/// Replays a scripted list of draws, then repeats the last one.
struct ScriptedRng {
    draws: Vec<f64>,
    at: usize,
}

impl ScriptedRng {
    fn new(draws: Vec<f64>) -> Self {
        Self { draws, at: 0 }
    }
}

impl SpawnRng for ScriptedRng {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let raw = self.draws[self.at.min(self.draws.len() - 1)];
        self.at += 1;
        raw.clamp(lo, hi)
    }
}

fn app() -> BoardApp {
    let mut app = BoardApp::new("My Board", "ABC123", Box::new(ScriptedRng::new(vec![0.0])));
    app.set_board_area(AREA);
    app
}

fn moved(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn press(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

/// Center cell of a note's on-screen footprint.
fn center_cell(app: &BoardApp, id: NoteId) -> (u16, u16) {
    let note = app.store().get(id).unwrap();
    let rect = geometry::note_cell_rect(note.pos, AREA);
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

fn place_note(app: &mut BoardApp, x: f64, y: f64, text: &str) -> NoteId {
    app.seed_note(RichText::plain(text));
    let snapshot = app.store().notes();
    let id = snapshot[snapshot.len() - 1].id;
    app.update_note(id, corkboard::board::NotePatch::pos(Point::new(x, y)));
    id
}

#[test]
fn buried_note_reports_its_neighbors_then_the_notice_fades() {
    let mut app = app();
    // two covers first, then the target on top (same z, later insertion)
    place_note(&mut app, 340.0, 140.0, "cover one");
    place_note(&mut app, 260.0, 60.0, "cover two");
    let target = place_note(&mut app, 300.0, 100.0, "buried");

    let (col, row) = center_cell(&app, target);
    let t0 = Instant::now();
    app.handle_event(&moved(col, row), t0);

    app.tick(t0 + HOVER_RESOLVE_DELAY);
    let notice = app.notice().expect("a mostly covered note must report");
    assert!(notice.text.contains('2'), "got: {}", notice.text);
    assert_eq!(app.store().get(target).unwrap().z, 0, "no promotion");

    // dismissed three seconds later
    app.tick(t0 + HOVER_RESOLVE_DELAY + NOTICE_TTL);
    assert!(app.notice().is_none());
}

#[test]
fn uncovered_note_promotes_instead() {
    let mut app = app();
    let a = place_note(&mut app, 0.0, 0.0, "low");
    let b = place_note(&mut app, 600.0, 300.0, "hovered");
    app.update_note(a, corkboard::board::NotePatch::z(4));

    let (col, row) = center_cell(&app, b);
    let t0 = Instant::now();
    app.handle_event(&moved(col, row), t0);
    app.tick(t0 + HOVER_RESOLVE_DELAY);
    assert_eq!(app.store().get(b).unwrap().z, 5);
    assert!(app.notice().is_none());
}

#[test]
fn leaving_early_cancels_both_hover_timers() {
    let mut app = app();
    let id = place_note(&mut app, 300.0, 100.0, "note");
    let (col, row) = center_cell(&app, id);
    let t0 = Instant::now();
    app.handle_event(&moved(col, row), t0);

    // leave for empty space before the 3s badge
    app.handle_event(&moved(95, 29), t0 + Duration::from_millis(2900));
    app.tick(t0 + EDIT_BADGE_DELAY);
    assert_eq!(app.badged_note(), None);
    app.tick(t0 + HOVER_RESOLVE_DELAY);
    assert_eq!(app.store().get(id).unwrap().z, 0);
}

#[test]
fn leaving_after_the_badge_still_blocks_promotion() {
    let mut app = app();
    let id = place_note(&mut app, 300.0, 100.0, "note");
    let (col, row) = center_cell(&app, id);
    let t0 = Instant::now();
    app.handle_event(&moved(col, row), t0);

    app.tick(t0 + Duration::from_millis(3100));
    assert_eq!(app.badged_note(), Some(id));

    app.handle_event(&moved(95, 29), t0 + Duration::from_millis(3500));
    app.tick(t0 + HOVER_RESOLVE_DELAY);
    assert_eq!(app.store().get(id).unwrap().z, 0);
}

#[test]
fn badge_click_opens_an_edit_session_and_commits_on_finish() {
    let mut app = app();
    let id = place_note(&mut app, 300.0, 100.0, "note");
    let (col, row) = center_cell(&app, id);
    let t0 = Instant::now();
    app.handle_event(&moved(col, row), t0);
    app.tick(t0 + EDIT_BADGE_DELAY);
    assert_eq!(app.badged_note(), Some(id));

    // the badge sits on the note's top-left cell
    let rect = geometry::note_cell_rect(app.store().get(id).unwrap().pos, AREA);
    app.handle_event(&press(rect.x, rect.y), t0 + EDIT_BADGE_DELAY);
    assert!(app.edit_session().is_some());

    // deferred focus lands, then typing and finishing
    app.tick(t0 + EDIT_BADGE_DELAY + Duration::from_millis(30));
    app.handle_event(&key(KeyCode::Char('!'), KeyModifiers::NONE), t0);
    app.handle_event(&key(KeyCode::Char('d'), KeyModifiers::CONTROL), t0);
    assert!(app.edit_session().is_none());
    assert_eq!(app.store().get(id).unwrap().content.plain_text(), "note!");
}

#[test]
fn drag_keeps_every_position_inside_the_board() {
    let mut app = app();
    let id = place_note(&mut app, 300.0, 100.0, "note");
    let (col, row) = center_cell(&app, id);
    let t0 = Instant::now();
    app.handle_event(&press(col, row), t0);
    for (c, r) in [(0u16, 1u16), (99, 1), (99, 30), (0, 30), (50, 15)] {
        app.handle_event(
            &Event::Mouse(MouseEvent {
                kind: MouseEventKind::Drag(MouseButton::Left),
                column: c,
                row: r,
                modifiers: KeyModifiers::NONE,
            }),
            t0,
        );
        let bounds = geometry::BoardBounds::from_cells(AREA.width, AREA.height);
        let pos = app.store().get(id).unwrap().pos;
        assert!(pos.x >= 0.0 && pos.x <= bounds.width - corkboard::constants::NOTE_SIZE);
        assert!(pos.y >= 0.0 && pos.y <= bounds.height - corkboard::constants::NOTE_SIZE);
    }
}

#[test]
fn restore_selection_is_idempotent() {
    let t0 = Instant::now();
    let mut session = EditSession::open(NoteId::new(1), RichText::plain("hello world"), t0);
    session.tick(t0 + Duration::from_millis(30));
    session.select_all();
    session.save_selection();

    let first = session.restore_selection();
    let second = session.restore_selection();
    let third = session.restore_selection();
    assert_eq!(first, Some(Selection::new(0, 11)));
    assert_eq!(first, second);
    assert_eq!(second, third);
}

//! Rendering.
//!
//! The screen is three bands: a title row, the board surface, and the
//! compose box. Notes paint in ascending z order so promoted notes land on
//! top; all drawing goes through [`UiFrame`], which clips to the visible
//! area so chrome near an edge (badges, the pointer-anchored notice) can
//! never write outside the buffer.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Widget};

use crate::app::{BoardApp, badge};
use crate::constants::MAX_CHARS;
use crate::geometry::{self, units_to_cell};
use crate::note::{Note, NoteStyle};
use crate::richtext::RichText;
use crate::theme;

/// Thin wrapper over the frame buffer that clamps drawing to the visible
/// area, so widgets computed from board coordinates never panic on a small
/// terminal.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        (clipped.width > 0 && clipped.height > 0).then_some(clipped)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }
}

/// Screen bands for one frame.
struct Bands {
    title: Rect,
    board: Rect,
    compose: Rect,
}

fn split_bands(area: Rect) -> Bands {
    let [title, board, compose] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(5)])
            .areas(area);
    Bands {
        title,
        board,
        compose,
    }
}

/// Draw one frame. Also publishes the board band back to the app so spawn
/// and drag math always run against the current surface size.
pub fn draw(frame: &mut Frame, app: &mut BoardApp) {
    let bands = split_bands(frame.area());
    app.set_board_area(bands.board);

    let mut ui = UiFrame::new(frame);
    draw_title(&mut ui, bands.title, app);
    draw_board(&mut ui, bands.board, app);
    draw_compose(&mut ui, bands.compose, app);
    draw_notice(&mut ui, bands.board, app);
}

fn draw_title(ui: &mut UiFrame<'_>, area: Rect, app: &BoardApp) {
    let style = Style::default().bg(theme::title_bg()).fg(theme::title_fg());
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.board_name()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{}] ", app.board_code()), style),
        Span::styled(
            " hover a note to edit or raise it · drag to move · Ctrl+Q quits ",
            style.add_modifier(Modifier::DIM),
        ),
    ]);
    ui.render_widget(Paragraph::new(line).style(style), area);
}

fn draw_board(ui: &mut UiFrame<'_>, area: Rect, app: &BoardApp) {
    let editing = app.store().editing();
    let badged = app.badged_note();
    for note in app.notes_in_draw_order() {
        let rect = geometry::note_cell_rect(note.pos, area);
        draw_shadow(ui, rect, note.shadow_depth);
        draw_note(ui, rect, &note, app, editing == Some(note.id), badged == Some(note.id));
    }
}

fn draw_shadow(ui: &mut UiFrame<'_>, rect: Rect, depth: u8) {
    let shade = if depth >= 4 {
        Color::Black
    } else {
        Color::DarkGray
    };
    let shadow = Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        ..rect
    };
    ui.render_widget(Block::new().style(Style::default().bg(shade)), shadow);
}

fn border_for(style: NoteStyle) -> BorderType {
    match style {
        NoteStyle::Plain => BorderType::Rounded,
        NoteStyle::Lined => BorderType::Plain,
        NoteStyle::Grid => BorderType::Double,
        NoteStyle::Blank => BorderType::QuadrantOutside,
    }
}

fn draw_note(
    ui: &mut UiFrame<'_>,
    rect: Rect,
    note: &Note,
    app: &BoardApp,
    is_editing: bool,
    is_badged: bool,
) {
    let paper = Style::default()
        .bg(theme::note_paper(note.color))
        .fg(theme::note_ink());
    let border_style = if is_editing {
        Style::default()
            .bg(theme::note_paper(note.color))
            .fg(theme::note_edit_border())
    } else {
        paper
    };
    let block = Block::bordered()
        .border_type(border_for(note.style))
        .border_style(border_style)
        .style(paper);
    let inner = block.inner(rect);

    ui.render_widget(Clear, rect);
    ui.render_widget(block, rect);

    // while editing, the working copy renders instead of the committed
    // content
    let session = app.edit_session().filter(|s| s.note() == note.id);
    let content = session.map(|s| s.content()).unwrap_or(&note.content);
    ui.render_widget(
        Paragraph::new(content.to_lines()).style(paper),
        inner,
    );
    if let Some(session) = session {
        draw_caret(ui, inner, content, session.caret());
    }

    let badge_style = Style::default().bg(theme::badge_bg()).fg(theme::badge_fg());
    if is_badged && !is_editing {
        let (x, y) = badge::edit_cell(rect);
        set_symbol(ui, x, y, "✎", badge_style);
    }
    if !is_editing {
        let (x, y) = badge::delete_cell(rect);
        set_symbol(ui, x, y, "×", badge_style);
    }
}

/// Invert the cell at the caret's line/column inside the editable surface.
fn draw_caret(ui: &mut UiFrame<'_>, inner: Rect, content: &RichText, caret: usize) {
    let text = content.plain_text();
    let before: String = text.chars().take(caret).collect();
    let line = before.matches('\n').count() as u16;
    let col = before
        .rsplit('\n')
        .next()
        .map(|tail| tail.chars().count())
        .unwrap_or(0) as u16;
    let x = inner.x.saturating_add(col);
    let y = inner.y.saturating_add(line);
    if geometry::rect_contains(inner, x, y)
        && let Some(cell) = ui.buffer_mut().cell_mut((x, y))
    {
        cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
    }
}

fn set_symbol(ui: &mut UiFrame<'_>, x: u16, y: u16, symbol: &str, style: Style) {
    if geometry::rect_contains(ui.area(), x, y)
        && let Some(cell) = ui.buffer_mut().cell_mut((x, y))
    {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn draw_compose(ui: &mut UiFrame<'_>, area: Rect, app: &BoardApp) {
    let compose = app.compose();
    let format = compose.format();
    let toggle = |label: &'static str, on: bool| {
        if on {
            Span::styled(
                label,
                Style::default()
                    .fg(theme::compose_active_toggle())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().add_modifier(Modifier::DIM))
        }
    };
    let status = Line::from(vec![
        toggle(" B", format.bold),
        toggle(" I", format.italic),
        toggle(" U ", format.underline),
        Span::raw(format!(
            "· {} · {} · {}/{} ",
            app.color().label(),
            app.style().label(),
            compose.char_count(),
            MAX_CHARS
        )),
    ]);
    let block = Block::bordered()
        .border_style(Style::default().fg(theme::compose_border()))
        .title(" post a note (Ctrl+P) ")
        .title_bottom(status.right_aligned());
    let inner = block.inner(area);
    ui.render_widget(block, area);
    ui.render_widget(Paragraph::new(compose.content().to_lines()), inner);
    draw_caret(ui, inner, compose.content(), compose.caret());
}

fn draw_notice(ui: &mut UiFrame<'_>, board: Rect, app: &BoardApp) {
    let Some(notice) = app.notice() else {
        return;
    };
    let (col, row) = units_to_cell(notice.anchor);
    // one cell below-right of the pointer, clipped at the board edge
    let rect = Rect {
        x: board.x.saturating_add(col).saturating_add(1),
        y: board.y.saturating_add(row).saturating_add(1),
        width: notice.text.chars().count() as u16 + 2,
        height: 1,
    };
    let style = Style::default().bg(theme::notice_bg()).fg(theme::notice_fg());
    ui.render_widget(Clear, rect);
    ui.render_widget(
        Paragraph::new(Line::from(format!(" {} ", notice.text))).style(style),
        rect,
    );
}

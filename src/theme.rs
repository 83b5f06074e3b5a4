use ratatui::style::Color;

use crate::note::NoteColor;

// Centralized colors. Notes use true-color paper tones; terminals without
// RGB support will approximate.

pub fn note_paper(color: NoteColor) -> Color {
    match color {
        NoteColor::Yellow => Color::Rgb(0xff, 0xf5, 0x9d),
        NoteColor::Pink => Color::Rgb(0xff, 0xd1, 0xdc),
        NoteColor::Blue => Color::Rgb(0xcc, 0xe5, 0xff),
        NoteColor::Green => Color::Rgb(0xd4, 0xf8, 0xd4),
    }
}

pub fn note_ink() -> Color {
    Color::Black
}

/// Border of the note that is currently being edited.
pub fn note_edit_border() -> Color {
    Color::LightCyan
}

pub fn badge_fg() -> Color {
    Color::Black
}

pub fn badge_bg() -> Color {
    Color::Gray
}

// Title row
pub fn title_bg() -> Color {
    Color::DarkGray
}
pub fn title_fg() -> Color {
    Color::White
}

// Transient overlap notice
pub fn notice_bg() -> Color {
    Color::Black
}
pub fn notice_fg() -> Color {
    Color::White
}

// Compose box
pub fn compose_border() -> Color {
    Color::DarkGray
}
pub fn compose_active_toggle() -> Color {
    Color::Yellow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_paper_tone_is_rgb() {
        for color in [
            NoteColor::Yellow,
            NoteColor::Pink,
            NoteColor::Blue,
            NoteColor::Green,
        ] {
            assert!(matches!(note_paper(color), Color::Rgb(_, _, _)));
        }
    }
}

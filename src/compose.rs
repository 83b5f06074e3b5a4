//! The compose box under the board.
//!
//! Text typed here accumulates styled runs according to the live
//! bold/italic/underline toggles, the way a toolbar with sticky buttons
//! behaves. Posting drains the buffer; whitespace-only content posts
//! nothing.

use crate::constants::{MAX_CHARS, MAX_LINES};
use crate::richtext::{FormatCommand, RichText, SpanFormat};

#[derive(Debug, Default)]
pub struct ComposeEditor {
    text: RichText,
    /// Caret as a character offset; the compose box keeps no selection.
    caret: usize,
    format: SpanFormat,
}

impl ComposeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &RichText {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The formatting that the next typed character will carry.
    pub fn format(&self) -> SpanFormat {
        self.format
    }

    pub fn char_count(&self) -> usize {
        self.text.char_len()
    }

    /// Flip a sticky toggle for subsequently typed text.
    pub fn toggle(&mut self, cmd: FormatCommand) {
        self.format.toggle(cmd);
    }

    /// Insert at the caret. Characters beyond [`MAX_CHARS`] are dropped, and
    /// a newline that would start line [`MAX_LINES`]` + 1` is dropped.
    pub fn insert_char(&mut self, ch: char) {
        if self.text.char_len() >= MAX_CHARS {
            return;
        }
        if ch == '\n' && self.text.line_count() >= MAX_LINES {
            return;
        }
        self.text
            .insert(self.caret, ch.to_string().as_str(), self.format);
        self.caret += 1;
    }

    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.text.delete(self.caret - 1..self.caret);
        self.caret -= 1;
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.text.char_len());
    }

    /// Preload content (e.g. a seeded note) ready to post.
    pub fn seed(&mut self, content: RichText) {
        self.caret = content.char_len();
        self.text = content;
    }

    /// Drain the buffer for posting. Whitespace-only content yields `None`
    /// and is discarded; the sticky format toggles reset either way.
    pub fn take(&mut self) -> Option<RichText> {
        let text = std::mem::take(&mut self.text);
        self.caret = 0;
        self.format = SpanFormat::default();
        if text.is_blank() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut ComposeEditor, s: &str) {
        for ch in s.chars() {
            editor.insert_char(ch);
        }
    }

    #[test]
    fn sticky_toggles_style_typed_text() {
        let mut editor = ComposeEditor::new();
        type_str(&mut editor, "plain ");
        editor.toggle(FormatCommand::Bold);
        type_str(&mut editor, "loud");
        editor.toggle(FormatCommand::Bold);
        type_str(&mut editor, " plain");
        let runs = editor.content().runs();
        assert_eq!(runs.len(), 3);
        assert!(runs[1].format.bold);
        assert!(!runs[2].format.bold);
    }

    #[test]
    fn char_cap_drops_overflow() {
        let mut editor = ComposeEditor::new();
        type_str(&mut editor, &"x".repeat(MAX_CHARS + 25));
        assert_eq!(editor.char_count(), MAX_CHARS);
    }

    #[test]
    fn line_cap_drops_extra_newlines_but_not_text() {
        let mut editor = ComposeEditor::new();
        for _ in 0..MAX_LINES + 3 {
            editor.insert_char('a');
            editor.insert_char('\n');
        }
        assert_eq!(editor.content().line_count(), MAX_LINES);
    }

    #[test]
    fn blank_content_does_not_post() {
        let mut editor = ComposeEditor::new();
        type_str(&mut editor, "  \n ");
        assert!(editor.take().is_none());
        assert_eq!(editor.char_count(), 0);
    }

    #[test]
    fn take_drains_and_resets_toggles() {
        let mut editor = ComposeEditor::new();
        editor.toggle(FormatCommand::Italic);
        type_str(&mut editor, "hi");
        let posted = editor.take().expect("content should post");
        assert!(posted.runs()[0].format.italic);
        assert_eq!(editor.char_count(), 0);
        assert!(!editor.format().italic);
    }

    #[test]
    fn caret_editing_in_the_middle() {
        let mut editor = ComposeEditor::new();
        type_str(&mut editor, "ad");
        editor.move_left();
        editor.insert_char('c');
        editor.move_left();
        editor.insert_char('b');
        assert_eq!(editor.content().plain_text(), "abcd");
        editor.backspace();
        assert_eq!(editor.content().plain_text(), "acd");
        editor.move_right();
        editor.move_right();
        assert_eq!(editor.caret(), 3);
    }
}

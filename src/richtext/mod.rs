//! Styled note content.
//!
//! A [`RichText`] is an ordered list of runs over one logical text, each run
//! carrying inline formatting (bold / italic / underline). Offsets into the
//! text are always *character* offsets, never bytes, so selections survive
//! multi-byte input. Runs are kept normalized: no empty runs, and no two
//! adjacent runs with identical formatting.

mod edit;

pub use edit::{CaretMove, EditSession, Selection};

use std::ops::Range;

use pulldown_cmark::{Event as MdEvent, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Inline formatting toggles carried by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// The three inline-style commands a toolbar or key binding can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
}

impl SpanFormat {
    pub fn has(&self, cmd: FormatCommand) -> bool {
        match cmd {
            FormatCommand::Bold => self.bold,
            FormatCommand::Italic => self.italic,
            FormatCommand::Underline => self.underline,
        }
    }

    pub fn set(&mut self, cmd: FormatCommand, on: bool) {
        match cmd {
            FormatCommand::Bold => self.bold = on,
            FormatCommand::Italic => self.italic = on,
            FormatCommand::Underline => self.underline = on,
        }
    }

    pub fn toggle(&mut self, cmd: FormatCommand) {
        let on = self.has(cmd);
        self.set(cmd, !on);
    }

    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

/// One maximal stretch of identically formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub format: SpanFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            runs: vec![TextRun {
                text,
                format: SpanFormat::default(),
            }],
        }
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Length in characters, newlines included.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(|r| r.text.chars().count()).sum()
    }

    /// Whitespace-only content does not count as a postable note.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    pub fn line_count(&self) -> usize {
        self.plain_text().split('\n').count()
    }

    /// Formatting in effect just before `at`, used so typed text inherits the
    /// style of its surroundings. Falls back to the format at `at` (start of
    /// text), then to plain.
    pub fn format_at(&self, at: usize) -> SpanFormat {
        if self.runs.is_empty() {
            return SpanFormat::default();
        }
        let probe = at.saturating_sub(1).min(self.char_len().saturating_sub(1));
        let mut seen = 0usize;
        for run in &self.runs {
            let len = run.text.chars().count();
            if probe < seen + len {
                return run.format;
            }
            seen += len;
        }
        self.runs[self.runs.len() - 1].format
    }

    /// Splits the text at a character offset, keeping `[0, at)` and
    /// returning `[at, len)`.
    fn split_off(&mut self, at: usize) -> RichText {
        let mut remaining = at;
        let mut tail_runs = Vec::new();
        let mut idx = 0;
        while idx < self.runs.len() {
            let len = self.runs[idx].text.chars().count();
            if remaining >= len {
                remaining -= len;
                idx += 1;
                continue;
            }
            if remaining > 0 {
                // split inside this run at a char boundary
                let byte = self.runs[idx]
                    .text
                    .char_indices()
                    .nth(remaining)
                    .map(|(b, _)| b)
                    .unwrap_or(self.runs[idx].text.len());
                let rest = self.runs[idx].text.split_off(byte);
                tail_runs.push(TextRun {
                    text: rest,
                    format: self.runs[idx].format,
                });
                idx += 1;
            }
            break;
        }
        tail_runs.extend(self.runs.split_off(idx));
        RichText { runs: tail_runs }
    }

    fn append(&mut self, other: RichText) {
        self.runs.extend(other.runs);
    }

    /// Drop empty runs and merge adjacent runs with identical formatting.
    fn normalize(&mut self) {
        let mut merged: Vec<TextRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.format == run.format => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Insert `text` at a character offset with an explicit format.
    pub fn insert(&mut self, at: usize, text: &str, format: SpanFormat) {
        if text.is_empty() {
            return;
        }
        let tail = self.split_off(at.min(self.char_len()));
        self.runs.push(TextRun {
            text: text.to_string(),
            format,
        });
        self.append(tail);
        self.normalize();
    }

    /// Remove a character range.
    pub fn delete(&mut self, range: Range<usize>) {
        let len = self.char_len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }
        let tail = self.split_off(end);
        let _ = self.split_off(start);
        self.append(tail);
        self.normalize();
    }

    /// Toggle one inline style over a character range with the usual
    /// editor semantics: if every character in the range already carries the
    /// style it is removed, otherwise it is applied to the whole range.
    pub fn toggle(&mut self, range: Range<usize>, cmd: FormatCommand) {
        let len = self.char_len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }
        let tail = self.split_off(end);
        let mut mid = self.split_off(start);
        let on = !mid.runs.iter().all(|r| r.format.has(cmd));
        for run in &mut mid.runs {
            run.format.set(cmd, on);
        }
        self.append(mid);
        self.append(tail);
        self.normalize();
    }

    /// Parse markdown into styled runs: strong → bold, emphasis → italic,
    /// headings render bold, breaks and paragraph boundaries become newlines.
    /// Anything fancier is flattened to its text.
    pub fn from_markdown(raw: &str) -> Self {
        let parser = Parser::new_ext(raw, Options::all());
        let mut out = RichText::default();
        let mut format = SpanFormat::default();
        let mut bold_depth = 0usize;
        let mut italic_depth = 0usize;
        let mut pending_break = false;

        let mut push = |out: &mut RichText, text: &str, format: SpanFormat| {
            out.runs.push(TextRun {
                text: text.to_string(),
                format,
            });
        };

        for ev in parser {
            match ev {
                MdEvent::Start(tag) => match tag {
                    Tag::Strong | Tag::Heading { .. } => {
                        bold_depth += 1;
                        format.bold = true;
                    }
                    Tag::Emphasis => {
                        italic_depth += 1;
                        format.italic = true;
                    }
                    _ => {}
                },
                MdEvent::End(tag) => match tag {
                    TagEnd::Strong => {
                        bold_depth = bold_depth.saturating_sub(1);
                        format.bold = bold_depth > 0;
                    }
                    TagEnd::Heading(_) => {
                        bold_depth = bold_depth.saturating_sub(1);
                        format.bold = bold_depth > 0;
                        pending_break = true;
                    }
                    TagEnd::Emphasis => {
                        italic_depth = italic_depth.saturating_sub(1);
                        format.italic = italic_depth > 0;
                    }
                    TagEnd::Paragraph | TagEnd::Item => {
                        pending_break = true;
                    }
                    _ => {}
                },
                MdEvent::Text(text) | MdEvent::Code(text) => {
                    if pending_break && !out.runs.is_empty() {
                        push(&mut out, "\n", SpanFormat::default());
                    }
                    pending_break = false;
                    push(&mut out, &text, format);
                }
                MdEvent::SoftBreak | MdEvent::HardBreak => {
                    push(&mut out, "\n", SpanFormat::default());
                }
                _ => {}
            }
        }
        out.normalize();
        out
    }

    /// Render to ratatui lines, one per logical line of text.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut current: Vec<Span<'static>> = Vec::new();
        for run in &self.runs {
            let style = run.format.style();
            for (i, piece) in run.text.split('\n').enumerate() {
                if i > 0 {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
                if !piece.is_empty() {
                    current.push(Span::styled(piece.to_string(), style));
                }
            }
        }
        lines.push(Line::from(current));
        lines
    }
}

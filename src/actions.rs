use std::fmt;

/// Keyboard-reachable operations, resolved from raw key events by
/// `crate::keybindings`. Mouse gestures (drag, badge clicks) never go
/// through here; they are routed positionally by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Compose box
    PostNote,
    CycleColor,
    CycleStyle,
    // Inline formatting, valid both in the compose box and in an edit
    // session
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    // Edit session
    FinishEdit,
    SelectAll,
    // Caret movement
    CaretLeft,
    CaretRight,
    CaretHome,
    CaretEnd,
    ExtendLeft,
    ExtendRight,
    // Text input
    Backspace,
    Newline,
    Insert(char),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::PostNote => "Post note",
            Action::CycleColor => "Next note color",
            Action::CycleStyle => "Next note style",
            Action::ToggleBold => "Toggle bold",
            Action::ToggleItalic => "Toggle italic",
            Action::ToggleUnderline => "Toggle underline",
            Action::FinishEdit => "Finish editing",
            Action::SelectAll => "Select all",
            Action::CaretLeft => "Caret left",
            Action::CaretRight => "Caret right",
            Action::CaretHome => "Caret to start",
            Action::CaretEnd => "Caret to end",
            Action::ExtendLeft => "Extend selection left",
            Action::ExtendRight => "Extend selection right",
            Action::Backspace => "Delete backwards",
            Action::Newline => "New line",
            Action::Insert(_) => "Insert character",
        };
        write!(f, "{}", s)
    }
}

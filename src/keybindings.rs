//! Key → action resolution.
//!
//! Two contexts share most bindings: the compose box (no note editing) and
//! an in-place edit session. The formatting chords work in both; posting
//! and palette cycling only make sense in the compose box, finishing an
//! edit only inside a session.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::actions::Action;

/// Where keyboard input is currently directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Compose,
    EditSession,
}

/// Resolve a key event to an action, or `None` for keys that mean nothing
/// in the given context. Release events never resolve, so terminals that
/// report them do not double-fire toggles.
pub fn action_for(key: &KeyEvent, context: InputContext) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        let action = match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('b') => Some(Action::ToggleBold),
            KeyCode::Char('i') => Some(Action::ToggleItalic),
            KeyCode::Char('u') => Some(Action::ToggleUnderline),
            KeyCode::Char('p') if context == InputContext::Compose => Some(Action::PostNote),
            KeyCode::Char('y') if context == InputContext::Compose => Some(Action::CycleColor),
            KeyCode::Char('t') if context == InputContext::Compose => Some(Action::CycleStyle),
            KeyCode::Char('d') if context == InputContext::EditSession => {
                Some(Action::FinishEdit)
            }
            KeyCode::Char('a') if context == InputContext::EditSession => {
                Some(Action::SelectAll)
            }
            _ => None,
        };
        return action;
    }

    match key.code {
        KeyCode::Esc if context == InputContext::EditSession => Some(Action::FinishEdit),
        KeyCode::Left if shift && context == InputContext::EditSession => {
            Some(Action::ExtendLeft)
        }
        KeyCode::Right if shift && context == InputContext::EditSession => {
            Some(Action::ExtendRight)
        }
        KeyCode::Left => Some(Action::CaretLeft),
        KeyCode::Right => Some(Action::CaretRight),
        KeyCode::Home => Some(Action::CaretHome),
        KeyCode::End => Some(Action::CaretEnd),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Enter => Some(Action::Newline),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}

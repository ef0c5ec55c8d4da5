//! Key bindings for the console
//!
//! Maps keyboard events to [`ConsoleAction`]s without touching component
//! state, so the bindings can be unit tested.

use std::time::Instant;

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::console::ConsoleAction;
use crate::console::model::{ConsoleState, Modal};

/// Which part of the console receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Prompt,
    ConfirmDelete,
    EditForm,
    Reassign,
}

impl InputMode {
    pub fn of(state: &ConsoleState) -> Self {
        if state.prompt.is_some() {
            return InputMode::Prompt;
        }
        match &state.modal {
            Some(Modal::Delete(_)) => InputMode::ConfirmDelete,
            Some(Modal::Edit(_)) => InputMode::EditForm,
            Some(Modal::Reassign(_)) => InputMode::Reassign,
            None => InputMode::Normal,
        }
    }
}

/// Convert a key event to a ConsoleAction (pure function)
///
/// `now` stamps text input so the search debouncer can measure quiet time.
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    mode: InputMode,
    now: Instant,
) -> Option<ConsoleAction> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(ConsoleAction::Quit);
    }

    match mode {
        InputMode::Prompt => match code {
            KeyCode::Enter => Some(ConsoleAction::PromptSubmit),
            KeyCode::Esc => Some(ConsoleAction::PromptCancel),
            KeyCode::Backspace => Some(ConsoleAction::PromptBackspace(now)),
            KeyCode::Char(c) => Some(ConsoleAction::PromptChar(c, now)),
            _ => None,
        },
        InputMode::ConfirmDelete => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(ConsoleAction::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(ConsoleAction::CancelModal)
            }
            _ => None,
        },
        InputMode::EditForm => match code {
            KeyCode::Tab => Some(ConsoleAction::ModalCycle),
            KeyCode::Enter => Some(ConsoleAction::ModalSubmit),
            KeyCode::Esc => Some(ConsoleAction::CancelModal),
            KeyCode::Backspace => Some(ConsoleAction::ModalBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(ConsoleAction::ModalChar(c)),
            _ => None,
        },
        InputMode::Reassign => match code {
            KeyCode::Enter => Some(ConsoleAction::ModalSubmit),
            KeyCode::Esc => Some(ConsoleAction::CancelModal),
            KeyCode::Backspace => Some(ConsoleAction::ModalBackspace),
            KeyCode::Char(c) => Some(ConsoleAction::ModalChar(c)),
            _ => None,
        },
        InputMode::Normal => normal_key_to_action(code),
    }
}

fn normal_key_to_action(code: KeyCode) -> Option<ConsoleAction> {
    match code {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => Some(ConsoleAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(ConsoleAction::MoveUp),
        KeyCode::Home => Some(ConsoleAction::GoToTop),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
            Some(ConsoleAction::NextPage)
        }
        KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
            Some(ConsoleAction::PrevPage)
        }
        KeyCode::Char('g') => Some(ConsoleAction::OpenJump),

        // Filters and view
        KeyCode::Char('v') => Some(ConsoleAction::CycleView),
        KeyCode::Char('s') => Some(ConsoleAction::CycleStatusFilter),
        KeyCode::Char('o') => Some(ConsoleAction::CycleOperatorFilter),
        KeyCode::Char('/') => Some(ConsoleAction::OpenSearch),
        KeyCode::Char('D') => Some(ConsoleAction::OpenDeadline),
        KeyCode::Char('c') => Some(ConsoleAction::ClearFilters),
        KeyCode::Char('r') => Some(ConsoleAction::Refresh),
        KeyCode::Char('[') => Some(ConsoleAction::PrevMonth),
        KeyCode::Char(']') => Some(ConsoleAction::NextMonth),
        KeyCode::Char('t') => Some(ConsoleAction::ThisMonth),

        // Record actions
        KeyCode::Char('e') | KeyCode::Enter => Some(ConsoleAction::OpenEdit),
        KeyCode::Char('R') => Some(ConsoleAction::OpenReassign),
        KeyCode::Char('x') | KeyCode::Delete => Some(ConsoleAction::RequestDelete),

        KeyCode::Esc => Some(ConsoleAction::DismissToast),
        KeyCode::Char('q') => Some(ConsoleAction::Quit),
        _ => None,
    }
}

//! Key event handlers for different UI modes

use cexdeck_core::types::Section;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::Modal => handle_key_modal(state, key),
        UiMode::ConfirmDialog => handle_key_confirm_dialog(state, key),
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // Sections
        InputKey::Char(c @ '1'..='4') => {
            let idx = c.to_digit(10).map(|d| d as usize - 1)?;
            Section::from_index(idx).map(Message::SelectSection)
        }
        InputKey::Tab => Some(Message::NextSection),
        InputKey::BackTab => Some(Message::PrevSection),
        InputKey::Char('b') => Some(Message::ToggleSidebar),

        // Hub module tabs
        InputKey::Char('[') | InputKey::Left => Some(Message::PrevModule),
        InputKey::Char(']') | InputKey::Right => Some(Message::NextModule),

        // Rows
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectionUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectionDown),
        InputKey::Enter => Some(Message::ActivateSelected),
        InputKey::Char('n') => Some(Message::OpenCreate),
        InputKey::Char('e') => Some(Message::OpenEdit),
        InputKey::Char('x') | InputKey::Delete => Some(Message::RequestDelete),
        InputKey::Char('r') => Some(Message::Refresh),

        // Session
        InputKey::Char('c') => Some(Message::OpenConnect),
        InputKey::Char('D') => Some(Message::RequestDisconnect),

        InputKey::Esc => Some(Message::DismissLatestNotification),
        _ => None,
    }
}

fn handle_key_modal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Esc => Some(Message::CloseModal),
        InputKey::Tab => Some(Message::ModalFocusNext),
        InputKey::BackTab => Some(Message::ModalFocusPrev),
        InputKey::CharCtrl('s') => Some(Message::SubmitModal),
        InputKey::Enter => {
            let newline = state
                .modal
                .as_ref()
                .is_some_and(|m| m.enter_inserts_newline());
            if newline {
                Some(Message::ModalInput(key))
            } else {
                Some(Message::SubmitModal)
            }
        }
        other => Some(Message::ModalInput(other)),
    }
}

fn handle_key_confirm_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    let dialog = state.confirm_dialog_state.as_ref();
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => {
            dialog.and_then(|d| d.confirm_message()).cloned()
        }
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(
            dialog
                .and_then(|d| d.cancel_message())
                .cloned()
                .unwrap_or(Message::CancelConfirm),
        ),
        // Force quit with Ctrl+C even in dialog
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use cexdeck_core::prelude::*;
use cexdeck_core::types::Section;

use crate::data::Collection;
use crate::message::Message;
use crate::state::AppState;

use super::keys::handle_key;
use super::workflows::{self, fetch_action};
use super::UpdateResult;

/// Process a message and update state
/// Returns an optional action for the event loop to perform
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            let pruned = state.notifications.prune_expired(Instant::now());
            if pruned > 0 {
                trace!("Expired {} notification(s)", pruned);
            }
            UpdateResult::none()
        }

        Message::Quit => {
            state.quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SelectSection(section) => handle_select_section(state, section),
        Message::NextSection => UpdateResult::message(Message::SelectSection(state.section.next())),
        Message::PrevSection => UpdateResult::message(Message::SelectSection(state.section.prev())),

        Message::ToggleSidebar => {
            state.show_sidebar = !state.show_sidebar;
            UpdateResult::none()
        }

        Message::NextModule | Message::PrevModule => {
            if state.section == Section::Home {
                state.module = if matches!(message, Message::NextModule) {
                    state.module.next()
                } else {
                    state.module.prev()
                };
                state.reset_selection();
            }
            UpdateResult::none()
        }

        Message::SelectionUp => {
            state.select_prev();
            UpdateResult::none()
        }
        Message::SelectionDown => {
            state.select_next();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Notifications
        // ─────────────────────────────────────────────────────────
        Message::DismissNotification(id) => {
            state.notifications.dismiss(id);
            UpdateResult::none()
        }
        Message::DismissLatestNotification => {
            state.notifications.dismiss_latest();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        Message::OpenConnect => workflows::handle_open_connect(state),
        Message::RequestDisconnect => workflows::handle_request_disconnect(state),
        Message::ConfirmDisconnect => workflows::handle_confirm_disconnect(state),
        Message::ConnectCompleted { address, result } => {
            workflows::handle_connect_completed(state, address, result)
        }

        // ─────────────────────────────────────────────────────────
        // Data loading
        // ─────────────────────────────────────────────────────────
        Message::Refresh => {
            let collection = Collection::for_section(state.section);
            if state.data.begin_refresh(collection) {
                info!("Refreshing {:?}", collection);
                UpdateResult::action(fetch_action(collection))
            } else {
                UpdateResult::none()
            }
        }

        Message::TemplatesLoaded(result) => {
            let applied = state.data.apply_templates(result);
            handle_loaded(state, Collection::Templates, applied)
        }
        Message::TenantsLoaded(result) => {
            let applied = state.data.apply_tenants(result);
            handle_loaded(state, Collection::Tenants, applied)
        }
        Message::CredentialsLoaded(result) => {
            let applied = state.data.apply_credentials(result);
            handle_loaded(state, Collection::Credentials, applied)
        }
        Message::ConfigureTenantsLoaded(result) => {
            workflows::handle_configure_tenants_loaded(state, result)
        }

        // ─────────────────────────────────────────────────────────
        // Entry workflows
        // ─────────────────────────────────────────────────────────
        Message::OpenCreate => workflows::handle_open_create(state),
        Message::OpenEdit => workflows::handle_open_edit(state),
        Message::OpenConfigure => workflows::handle_open_configure(state),
        Message::ActivateSelected => {
            if state.section == Section::Home {
                UpdateResult::message(Message::OpenConfigure)
            } else {
                UpdateResult::message(Message::OpenEdit)
            }
        }
        Message::RequestDelete => workflows::handle_request_delete(state),
        Message::ConfirmDelete(mutation) => workflows::handle_confirm_delete(state, mutation),
        Message::CancelConfirm => {
            state.hide_confirm_dialog();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Modal
        // ─────────────────────────────────────────────────────────
        Message::ModalInput(key) => {
            if let Some(modal) = state.modal.as_mut() {
                if !modal.is_submitting() {
                    modal.handle_input(key);
                }
            }
            UpdateResult::none()
        }
        Message::ModalFocusNext => {
            if let Some(modal) = state.modal.as_mut() {
                modal.focus_next();
            }
            UpdateResult::none()
        }
        Message::ModalFocusPrev => {
            if let Some(modal) = state.modal.as_mut() {
                modal.focus_prev();
            }
            UpdateResult::none()
        }
        Message::SubmitModal => workflows::handle_submit_modal(state),
        Message::CloseModal => {
            // A submit in flight owns the modal until its completion lands
            if state.modal.as_ref().is_some_and(|m| m.is_submitting()) {
                debug!("Ignoring close while submitting");
            } else {
                state.close_modal();
            }
            UpdateResult::none()
        }

        Message::MutationCompleted { summary, result } => {
            workflows::handle_mutation_completed(state, summary, result)
        }
        Message::ConfigureCompleted { name, result } => {
            workflows::handle_configure_completed(state, name, result)
        }
    }
}

/// Report a failed fetch and issue any refetch queued by a mutation.
fn handle_loaded(
    state: &mut AppState,
    collection: Collection,
    applied: std::result::Result<(), String>,
) -> UpdateResult {
    if let Err(text) = applied {
        state.notifications.error(text);
    }
    if state.data.take_pending_refresh(collection) {
        debug!("Issuing queued refetch of {:?}", collection);
        UpdateResult::action(fetch_action(collection))
    } else {
        UpdateResult::none()
    }
}

/// Switch sections and fetch the section's collection on first entry.
fn handle_select_section(state: &mut AppState, section: Section) -> UpdateResult {
    state.section = section;
    let collection = Collection::for_section(section);
    if state.data.begin_fetch(collection) {
        debug!("First entry into {:?}, fetching {:?}", section, collection);
        UpdateResult::action(fetch_action(collection))
    } else {
        UpdateResult::none()
    }
}

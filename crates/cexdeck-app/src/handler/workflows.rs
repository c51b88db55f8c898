//! Entry workflows: connect, create/edit/delete and configure
//!
//! Validation failures never leave this module as actions; they surface as a
//! notification and the state is left as it was.

use cexdeck_api::ApiError;
use cexdeck_core::prelude::*;
use cexdeck_core::shaping::shape_tenants;
use cexdeck_core::types::Section;
use cexdeck_core::wire::{ConnectResponse, PluginConfigResponse, TenantTemplatesResponse};

use crate::confirm_dialog::ConfirmDialogState;
use crate::data::{Collection, Mutation, MutationSummary};
use crate::modals::{ConfigureModal, ConnectModal, CreateModal, EditModal, EditTarget, Modal};
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// The fetch action that loads `collection` into the data store.
pub(crate) fn fetch_action(collection: Collection) -> UpdateAction {
    match collection {
        Collection::Templates => UpdateAction::FetchTemplates,
        Collection::Tenants => UpdateAction::FetchTenants,
        Collection::Credentials => UpdateAction::FetchCredentials,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_connect(state: &mut AppState) -> UpdateResult {
    if let Some(address) = &state.session.target_address {
        state
            .notifications
            .warning(format!("Already connected to {}", address));
        return UpdateResult::none();
    }
    let modal = ConnectModal::new(
        &state.settings.connection.default_address,
        state.settings.connection.use_https,
    );
    state.open_modal(Modal::Connect(modal));
    UpdateResult::none()
}

fn submit_connect(state: &mut AppState) -> UpdateResult {
    // Submit is ignored while an attempt is in flight
    if state.session.connecting {
        return UpdateResult::none();
    }
    let Some(Modal::Connect(modal)) = &state.modal else {
        return UpdateResult::none();
    };
    match modal.begin(&mut state.session) {
        Ok(request) => {
            info!("Connecting to {}", request.vm_ip);
            UpdateResult::action(UpdateAction::Connect(request))
        }
        Err(e) => {
            state.notifications.warning(e.to_string());
            UpdateResult::none()
        }
    }
}

pub fn handle_connect_completed(
    state: &mut AppState,
    address: String,
    result: std::result::Result<ConnectResponse, ApiError>,
) -> UpdateResult {
    let announcement = result.as_ref().ok().and_then(|r| r.message.clone());
    if !state.session.complete_connect(address.clone(), result) {
        return UpdateResult::none();
    }

    if state.session.connected {
        if matches!(state.modal, Some(Modal::Connect(_))) {
            state.close_modal();
        }
        state.notifications.success(
            announcement.unwrap_or_else(|| format!("Connected to {}", address)),
        );
    } else {
        let detail = state
            .session
            .last_error
            .clone()
            .unwrap_or_else(|| "unknown error".to_string());
        state
            .notifications
            .error(format!("Connection failed: {}", detail));
    }
    UpdateResult::none()
}

pub fn handle_request_disconnect(state: &mut AppState) -> UpdateResult {
    match state.session.target_address.clone() {
        Some(address) if state.session.connected => {
            state.show_confirm_dialog(ConfirmDialogState::disconnect(&address));
        }
        _ => {
            state.notifications.info("Not connected");
        }
    }
    UpdateResult::none()
}

pub fn handle_confirm_disconnect(state: &mut AppState) -> UpdateResult {
    state.hide_confirm_dialog();
    if state.session.disconnect() {
        state.notifications.info("Disconnected");
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Create / edit / delete
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_create(state: &mut AppState) -> UpdateResult {
    let collection = Collection::for_section(state.section);
    state.open_modal(Modal::Create(CreateModal::new(collection, state.module)));
    UpdateResult::none()
}

fn selected_edit_target(state: &AppState) -> Option<EditTarget> {
    match state.section {
        Section::Home => None,
        Section::Templates => state.selected_template().cloned().map(EditTarget::Template),
        Section::Tenants => state.selected_tenant().cloned().map(EditTarget::Tenant),
        Section::Credentials => state
            .selected_credential()
            .cloned()
            .map(EditTarget::Credential),
    }
}

pub fn handle_open_edit(state: &mut AppState) -> UpdateResult {
    if let Some(target) = selected_edit_target(state) {
        state.open_modal(Modal::Edit(EditModal::new(target)));
    }
    UpdateResult::none()
}

pub fn handle_request_delete(state: &mut AppState) -> UpdateResult {
    let mutation = match selected_edit_target(state) {
        Some(EditTarget::Template(t)) => Mutation::DeleteTemplate {
            module: t.module,
            plugin_name: t.name,
        },
        Some(EditTarget::Tenant(t)) => Mutation::DeleteTenant { key: t.id },
        Some(EditTarget::Credential(c)) => Mutation::DeleteCredential { key: c.id },
        None => return UpdateResult::none(),
    };
    state.show_confirm_dialog(ConfirmDialogState::delete(mutation));
    UpdateResult::none()
}

pub fn handle_confirm_delete(state: &mut AppState, mutation: Mutation) -> UpdateResult {
    state.hide_confirm_dialog();
    debug!("Deleting {:?} '{}'", mutation.collection(), mutation.subject());
    UpdateResult::action(UpdateAction::Mutate(mutation))
}

pub fn handle_mutation_completed(
    state: &mut AppState,
    summary: MutationSummary,
    result: std::result::Result<(), ApiError>,
) -> UpdateResult {
    let in_modal = state.modal.as_ref().is_some_and(|m| {
        m.is_submitting() && matches!(m, Modal::Create(_) | Modal::Edit(_))
    });

    match result {
        Ok(()) => {
            state.notifications.success(summary.success_message());
            if in_modal {
                state.close_modal();
            }
            if state.data.refresh_after_mutation(summary.collection) {
                UpdateResult::action(fetch_action(summary.collection))
            } else {
                UpdateResult::none()
            }
        }
        Err(e) => {
            let detail = e.user_message();
            warn!("{}", summary.failure_message(&detail));
            state.notifications.error(summary.failure_message(&detail));
            if let (true, Some(modal)) = (in_modal, state.modal.as_mut()) {
                modal.set_submitting(false);
                modal.set_error(Some(detail));
            }
            UpdateResult::none()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configure
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_configure(state: &mut AppState) -> UpdateResult {
    if !state.session.connected {
        state
            .notifications
            .warning("Connect to a CloudExchange instance before configuring plugins");
        return UpdateResult::none();
    }
    let Some(plugin) = state.selected_plugin().cloned() else {
        return UpdateResult::none();
    };
    let modal = ConfigureModal::new(plugin);
    let needs_tenant = modal.needs_tenant();
    state.open_modal(Modal::Configure(modal));

    if needs_tenant {
        UpdateResult::action(UpdateAction::FetchConfigureTenants)
    } else {
        UpdateResult::none()
    }
}

pub fn handle_configure_tenants_loaded(
    state: &mut AppState,
    result: std::result::Result<TenantTemplatesResponse, ApiError>,
) -> UpdateResult {
    let Some(Modal::Configure(modal)) = state.modal.as_mut() else {
        return UpdateResult::none();
    };
    match result {
        Ok(response) => modal.set_tenants(&shape_tenants(&response)),
        Err(e) => {
            warn!("Failed to load tenants for configure: {}", e);
            modal.set_tenants(&[]);
            state.notifications.error("Failed to load tenants");
        }
    }
    UpdateResult::none()
}

pub fn handle_configure_completed(
    state: &mut AppState,
    name: String,
    result: std::result::Result<PluginConfigResponse, ApiError>,
) -> UpdateResult {
    let configuring = matches!(&state.modal, Some(Modal::Configure(m)) if m.submitting);

    match result {
        Ok(response) if response.success => {
            state.notifications.success(
                response
                    .message
                    .unwrap_or_else(|| format!("Configuration '{}' pushed", name)),
            );
            if configuring {
                state.close_modal();
            }
        }
        other => {
            let detail = match other {
                Ok(response) => response
                    .message
                    .unwrap_or_else(|| "The instance rejected the configuration".to_string()),
                Err(e) => e.user_message(),
            };
            state
                .notifications
                .error(format!("Failed to configure '{}': {}", name, detail));
            if let (true, Some(modal)) = (configuring, state.modal.as_mut()) {
                modal.set_submitting(false);
                modal.set_error(Some(detail));
            }
        }
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Modal submit
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_submit_modal(state: &mut AppState) -> UpdateResult {
    let Some(modal) = state.modal.as_ref() else {
        return UpdateResult::none();
    };
    if modal.is_submitting() {
        return UpdateResult::none();
    }

    let built = match modal {
        Modal::Connect(_) => return submit_connect(state),
        Modal::Create(m) => m.build().map(UpdateAction::Mutate),
        Modal::Edit(m) => m.build().map(UpdateAction::Mutate),
        Modal::Configure(m) => m.build(&state.session).map(|(connection_id, request)| {
            UpdateAction::ConfigurePlugin {
                connection_id,
                request,
            }
        }),
    };

    match built {
        Ok(action) => {
            if let Some(modal) = state.modal.as_mut() {
                modal.set_submitting(true);
                modal.set_error(None);
            }
            UpdateResult::action(action)
        }
        Err(e) => {
            debug!("Modal submit rejected: {}", e);
            state.notifications.error(e.to_string());
            UpdateResult::none()
        }
    }
}

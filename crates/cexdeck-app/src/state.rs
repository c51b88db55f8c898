//! Application state (Model in TEA pattern)

use cexdeck_core::types::{
    CredentialSet, ModuleCode, PluginDescriptor, Section, TemplateRecord, TenantRegistration,
};

use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::data::DataStore;
use crate::modals::Modal;
use crate::notifications::NotificationQueue;
use crate::session::Session;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Section browsing
    #[default]
    Normal,

    /// A form or editor modal has focus
    Modal,

    /// Confirmation dialog (delete, disconnect)
    ConfirmDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub phase: AppPhase,

    /// Settings resolved at startup
    pub settings: Settings,

    pub session: Session,
    pub notifications: NotificationQueue,
    pub data: DataStore,

    pub section: Section,
    /// Module tab shown in the hub
    pub module: ModuleCode,
    pub show_sidebar: bool,
    /// Selected row per section, indexed by [`Section::index`]
    selection: [usize; 4],

    pub modal: Option<Modal>,
    pub confirm_dialog_state: Option<ConfirmDialogState>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            ui_mode: UiMode::Normal,
            phase: AppPhase::Running,
            show_sidebar: settings.ui.show_sidebar,
            settings,
            session: Session::new(),
            notifications: NotificationQueue::new(),
            data: DataStore::new(),
            section: Section::Home,
            module: ModuleCode::Cls,
            selection: [0; 4],
            modal: None,
            confirm_dialog_state: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────

    pub fn row_count(&self) -> usize {
        self.data.row_count(self.section, self.module)
    }

    /// Selected row in the current section, clamped to the list length.
    pub fn selected_index(&self) -> usize {
        let rows = self.row_count();
        self.selection[self.section.index()].min(rows.saturating_sub(1))
    }

    pub fn select_next(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let current = self.selected_index();
        self.selection[self.section.index()] = (current + 1).min(rows - 1);
    }

    pub fn select_prev(&mut self) {
        let current = self.selected_index();
        self.selection[self.section.index()] = current.saturating_sub(1);
    }

    pub fn reset_selection(&mut self) {
        self.selection[self.section.index()] = 0;
    }

    pub fn selected_plugin(&self) -> Option<&PluginDescriptor> {
        if self.section != Section::Home {
            return None;
        }
        self.data
            .templates
            .plugins_for(self.module)
            .get(self.selected_index())
    }

    pub fn selected_template(&self) -> Option<&TemplateRecord> {
        if self.section != Section::Templates {
            return None;
        }
        self.data.templates.templates.get(self.selected_index())
    }

    pub fn selected_tenant(&self) -> Option<&TenantRegistration> {
        if self.section != Section::Tenants {
            return None;
        }
        self.data.tenants.get(self.selected_index())
    }

    pub fn selected_credential(&self) -> Option<&CredentialSet> {
        if self.section != Section::Credentials {
            return None;
        }
        self.data.credentials.get(self.selected_index())
    }

    // ─────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
        self.ui_mode = UiMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn show_confirm_dialog(&mut self, dialog: ConfirmDialogState) {
        self.confirm_dialog_state = Some(dialog);
        self.ui_mode = UiMode::ConfirmDialog;
    }

    /// Hide the dialog, returning to the modal underneath if there is one.
    pub fn hide_confirm_dialog(&mut self) {
        self.confirm_dialog_state = None;
        self.ui_mode = if self.modal.is_some() {
            UiMode::Modal
        } else {
            UiMode::Normal
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cexdeck_core::wire::TenantTemplatesResponse;
    use serde_json::json;

    fn state_with_tenants(n: usize) -> AppState {
        let mut state = AppState::new(Settings::default());
        let mut tenants = serde_json::Map::new();
        for i in 0..n {
            tenants.insert(
                format!("t{}", i),
                json!({"name": "n", "url": "u", "token": "k"}),
            );
        }
        let response: TenantTemplatesResponse =
            serde_json::from_value(json!({ "tenants": tenants })).unwrap();
        state.data.apply_tenants(Ok(response)).unwrap();
        state.section = Section::Tenants;
        state
    }

    #[test]
    fn test_new_state_defaults() {
        let state = AppState::new(Settings::default());
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert_eq!(state.section, Section::Home);
        assert!(state.show_sidebar);
        assert!(!state.should_quit());
    }

    #[test]
    fn test_selection_clamps() {
        let mut state = state_with_tenants(3);
        state.select_prev();
        assert_eq!(state.selected_index(), 0);

        for _ in 0..5 {
            state.select_next();
        }
        assert_eq!(state.selected_index(), 2);
        assert_eq!(state.selected_tenant().map(|t| t.id.as_str()), Some("t2"));
    }

    #[test]
    fn test_selection_clamped_after_list_shrinks() {
        let mut state = state_with_tenants(3);
        state.select_next();
        state.select_next();

        let response: TenantTemplatesResponse = serde_json::from_value(json!({
            "tenants": {"only": {"name": "n", "url": "u", "token": "k"}}
        }))
        .unwrap();
        state.data.apply_tenants(Ok(response)).unwrap();
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.selected_tenant().map(|t| t.id.as_str()), Some("only"));
    }

    #[test]
    fn test_selection_is_per_section() {
        let mut state = state_with_tenants(2);
        state.select_next();
        assert!(state.selected_credential().is_none());
        state.section = Section::Credentials;
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_confirm_dialog_returns_to_modal() {
        let mut state = AppState::new(Settings::default());
        state.open_modal(Modal::Connect(crate::modals::ConnectModal::new("", true)));
        state.show_confirm_dialog(ConfirmDialogState::disconnect("a"));
        assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

        state.hide_confirm_dialog();
        assert_eq!(state.ui_mode, UiMode::Modal);
    }
}

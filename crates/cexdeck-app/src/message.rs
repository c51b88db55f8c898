//! Message types for the application (TEA pattern)

use cexdeck_api::ApiError;
use cexdeck_core::types::Section;
use cexdeck_core::wire::{
    ConnectResponse, CredentialsResponse, PluginConfigResponse, TemplatesResponse,
    TenantTemplatesResponse,
};

use crate::data::{Mutation, MutationSummary};
use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Periodic tick (drives notification expiry)
    Tick,

    /// Quit immediately
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Switch to a section, fetching its data on first entry
    SelectSection(Section),
    NextSection,
    PrevSection,
    ToggleSidebar,
    /// Hub module tabs
    NextModule,
    PrevModule,
    SelectionUp,
    SelectionDown,

    // ─────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────
    DismissNotification(u64),
    DismissLatestNotification,

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    OpenConnect,
    /// Ask for confirmation before dropping the session
    RequestDisconnect,
    ConfirmDisconnect,
    ConnectCompleted {
        address: String,
        result: Result<ConnectResponse, ApiError>,
    },

    // ─────────────────────────────────────────────────────────
    // Data loading
    // ─────────────────────────────────────────────────────────
    /// Refetch the current section
    Refresh,
    TemplatesLoaded(Result<TemplatesResponse, ApiError>),
    TenantsLoaded(Result<TenantTemplatesResponse, ApiError>),
    CredentialsLoaded(Result<CredentialsResponse, ApiError>),
    /// Tenant list for the configure modal picker
    ConfigureTenantsLoaded(Result<TenantTemplatesResponse, ApiError>),

    // ─────────────────────────────────────────────────────────
    // Entry workflows
    // ─────────────────────────────────────────────────────────
    OpenCreate,
    OpenEdit,
    OpenConfigure,
    /// Enter on a row: configure in the hub, edit elsewhere
    ActivateSelected,
    RequestDelete,
    ConfirmDelete(Mutation),
    CancelConfirm,

    // ─────────────────────────────────────────────────────────
    // Modal
    // ─────────────────────────────────────────────────────────
    ModalInput(InputKey),
    ModalFocusNext,
    ModalFocusPrev,
    SubmitModal,
    CloseModal,

    MutationCompleted {
        summary: MutationSummary,
        result: Result<(), ApiError>,
    },
    ConfigureCompleted {
        name: String,
        result: Result<PluginConfigResponse, ApiError>,
    },
}

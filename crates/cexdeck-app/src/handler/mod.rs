//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `workflows`: Connect, create/edit/delete and configure flows

pub(crate) mod keys;
pub(crate) mod update;
pub(crate) mod workflows;


use cexdeck_core::wire::{ConnectRequest, PluginConfigRequest};

use crate::data::Mutation;
use crate::message::Message;

pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// `POST /api/connect`
    Connect(ConnectRequest),

    /// Fetch a collection into the data store
    FetchTemplates,
    FetchTenants,
    FetchCredentials,

    /// Fetch tenants for the configure modal picker only
    FetchConfigureTenants,

    /// Create, update or delete an entry
    Mutate(Mutation),

    /// Push a plugin configuration to the connected instance
    ConfigurePlugin {
        connection_id: String,
        request: PluginConfigRequest,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}

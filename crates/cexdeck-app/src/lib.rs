//! cexdeck-app - Application state and orchestration for cexdeck
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: the session store, notification queue, per-section data stores,
//! modal workflows, configuration loading and the action dispatcher that
//! spawns gateway calls.

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod data;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod modals;
pub mod notifications;
pub mod process;
pub mod session;
pub mod state;

// Re-export primary types
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use session::{Session, SessionPhase};
pub use state::{AppPhase, AppState, UiMode};

//! Connection session to a CloudExchange instance
//!
//! There is exactly one [`Session`] per running console. It moves through
//! `Disconnected -> Connecting -> Connected`; a failed attempt falls back to
//! `Disconnected` with `last_error` set.

use cexdeck_api::ApiError;
use cexdeck_core::prelude::*;
use cexdeck_core::wire::{ConnectRequest, ConnectResponse};
use chrono::{DateTime, Local};

/// Coarse session state derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Opaque token issued by the backend on connect
    pub connection_id: Option<String>,
    pub target_address: Option<String>,
    pub connected: bool,
    pub connecting: bool,
    pub last_error: Option<String>,
    pub connected_at: Option<DateTime<Local>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.connected {
            SessionPhase::Connected
        } else if self.connecting {
            SessionPhase::Connecting
        } else {
            SessionPhase::Disconnected
        }
    }

    /// Connection token when connected.
    pub fn active_connection(&self) -> Option<&str> {
        if self.connected {
            self.connection_id.as_deref()
        } else {
            None
        }
    }

    /// Start a connect attempt and build the request to send.
    ///
    /// Only valid while disconnected with both fields filled in; otherwise
    /// the session is left untouched.
    pub fn begin_connect(
        &mut self,
        address: &str,
        password: &str,
        use_https: bool,
    ) -> Result<ConnectRequest> {
        match self.phase() {
            SessionPhase::Connected => {
                return Err(Error::validation("Already connected; disconnect first"))
            }
            SessionPhase::Connecting => {
                return Err(Error::validation("A connection attempt is already in progress"))
            }
            SessionPhase::Disconnected => {}
        }

        let address = address.trim();
        if address.is_empty() {
            return Err(Error::missing_field("VM address"));
        }
        if password.is_empty() {
            return Err(Error::missing_field("Admin password"));
        }

        self.connecting = true;
        self.last_error = None;

        Ok(ConnectRequest {
            vm_ip: address.to_string(),
            admin_password: password.to_string(),
            use_https,
        })
    }

    /// Apply the outcome of the attempt started by [`begin_connect`](Self::begin_connect).
    ///
    /// Returns `false` and changes nothing if no attempt was in flight.
    pub fn complete_connect(
        &mut self,
        address: String,
        result: std::result::Result<ConnectResponse, ApiError>,
    ) -> bool {
        if !self.connecting {
            debug!("Ignoring connect result for {} with no attempt in flight", address);
            return false;
        }

        match result {
            Ok(response) => {
                info!("Connected to {}", address);
                *self = Session {
                    connection_id: Some(response.connection_id),
                    target_address: Some(address),
                    connected: true,
                    connecting: false,
                    last_error: None,
                    connected_at: Some(Local::now()),
                };
            }
            Err(e) => {
                warn!("Connect to {} failed: {}", address, e);
                self.connecting = false;
                self.last_error = Some(e.user_message());
            }
        }
        true
    }

    /// Drop the connection. Only valid while connected; no network call.
    pub fn disconnect(&mut self) -> bool {
        if !self.connected {
            return false;
        }
        info!("Disconnected from {:?}", self.target_address);
        *self = Session::default();
        true
    }
}

//! # cexdeck-api - CloudExchange Backend Gateway
//!
//! HTTP+JSON client for the CloudExchange backend service.
//!
//! Depends on [`cexdeck_core`] for wire types.
//!
//! ## Public API
//!
//! - [`GatewayClient`] - reqwest-backed client with one generic
//!   [`request`](GatewayClient::request) operation
//! - [`Gateway`] - Named backend operations (templates, tenants, credentials,
//!   connect, plugin configuration)
//! - [`ApiError`] - Transport, status and decode failures with a
//!   notification-ready [`user_message`](ApiError::user_message)

pub mod client;
pub mod error;
pub mod gateway;
pub mod paths;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{GatewayClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use gateway::{Gateway, LocalGateway};

//! # cexdeck-core - Core Domain Types
//!
//! Foundation crate for cexdeck. Provides domain types, backend wire types,
//! response shaping, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ModuleCode`] - The six plugin module categories (CLS, CTO, CTE, CRE, EDM, CFC)
//! - [`PluginDescriptor`], [`PluginOrigin`] - Hub cards and their vendor/third-party tag
//! - [`TemplateRecord`], [`TenantRegistration`], [`CredentialSet`] - Section rows
//! - [`Section`], [`Severity`] - View sections and notification severity
//!
//! ### Wire Types (`wire`)
//! - Request/response bodies for every backend endpoint
//!
//! ### Shaping (`shaping`)
//! - [`shape_templates()`], [`shape_tenants()`], [`shape_credentials()`] - Pure
//!   projections of backend collections into flat lists
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with a `fatal` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use cexdeck_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod shaping;
pub mod types;
pub mod wire;

/// Prelude for common imports used throughout all cexdeck crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use shaping::{shape_credentials, shape_templates, shape_tenants, ShapedTemplates};
pub use types::{
    CredentialSet, ModuleCode, PluginDescriptor, PluginOrigin, Section, Severity, TemplateRecord,
    TenantRegistration, CREDENTIAL_SET_KIND, VENDOR_MARKER,
};

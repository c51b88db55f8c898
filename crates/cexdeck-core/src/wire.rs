//! JSON bodies exchanged with the CloudExchange backend
//!
//! Collection responses keep their entries as raw [`Value`]s so that one
//! malformed entry can be skipped by [`crate::shaping`] instead of failing
//! the whole response.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ModuleCode;

// ─────────────────────────────────────────────────────────────────────────────
// Connection
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/connect`.
#[derive(Clone, Serialize)]
pub struct ConnectRequest {
    pub vm_ip: String,
    pub admin_password: String,
    pub use_https: bool,
}

impl fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("vm_ip", &self.vm_ip)
            .field("admin_password", &"<redacted>")
            .field("use_https", &self.use_https)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectResponse {
    pub connection_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Templates
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /api/templates`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatesResponse {
    /// module code → plugin name → [`PluginTemplateData`]
    #[serde(default)]
    pub plugin_templates: Map<String, Value>,
    #[serde(default)]
    pub credential_templates: Value,
}

/// One plugin entry as stored by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginTemplateData {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub template: Value,
}

/// Body of `POST /api/templates/plugins` and the matching `PUT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginTemplateRequest {
    pub module: ModuleCode,
    pub plugin_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub template: Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tenants
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /api/tenant-templates`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantTemplatesResponse {
    /// tenant key → [`TenantTemplate`]
    #[serde(default)]
    pub tenants: Map<String, Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantTemplate {
    pub name: String,
    pub url: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /api/tenant-templates` and `PUT /api/tenant-templates/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantTemplateRequest {
    pub tenant_key: String,
    #[serde(flatten)]
    pub tenant: TenantTemplate,
}

// ─────────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /api/credentials`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsResponse {
    /// credential key → arbitrary payload
    #[serde(default)]
    pub plugin_credentials: Map<String, Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Body of `POST /api/credentials` and `PUT /api/credentials/{key}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialTemplateRequest {
    pub credential_key: String,
    pub credentials: Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/plugins/{connection_id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginConfigRequest {
    pub name: String,
    pub plugin_data: Value,
    pub tenant: Option<String>,
}

/// Only an explicit `"success": false` marks a 2xx answer as rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginConfigResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl Default for PluginConfigResponse {
    fn default() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Error body convention used by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The `detail` field when it is a non-empty string.
    pub fn detail_text(&self) -> Option<&str> {
        match &self.detail {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

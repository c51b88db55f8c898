//! Core domain types for the console

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Substring that marks a plugin as shipped by the platform vendor.
///
/// Matching is case-insensitive. This is a naming heuristic, not a backend
/// attribute: a third-party plugin whose name happens to contain the marker
/// is tagged as a vendor plugin.
pub const VENDOR_MARKER: &str = "netskope";

/// Kind label attached to every credential set.
pub const CREDENTIAL_SET_KIND: &str = "Credential Set";

// ─────────────────────────────────────────────────────────────────────────────
// Module codes
// ─────────────────────────────────────────────────────────────────────────────

/// One of the six fixed plugin module categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModuleCode {
    #[default]
    Cls,
    Cto,
    Cte,
    Cre,
    Edm,
    Cfc,
}

impl ModuleCode {
    /// All module codes in display order.
    pub const ALL: [ModuleCode; 6] = [
        ModuleCode::Cls,
        ModuleCode::Cto,
        ModuleCode::Cte,
        ModuleCode::Cre,
        ModuleCode::Edm,
        ModuleCode::Cfc,
    ];

    /// Wire/display code, e.g. `"CLS"`.
    pub fn code(&self) -> &'static str {
        match self {
            ModuleCode::Cls => "CLS",
            ModuleCode::Cto => "CTO",
            ModuleCode::Cte => "CTE",
            ModuleCode::Cre => "CRE",
            ModuleCode::Edm => "EDM",
            ModuleCode::Cfc => "CFC",
        }
    }

    /// Parse a module code, ignoring letter case. Unknown codes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|m| m.code() == upper)
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugins and templates
// ─────────────────────────────────────────────────────────────────────────────

/// Who ships a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginOrigin {
    /// Shipped by the platform vendor; configuring it requires a tenant.
    InternalVendor,
    ThirdParty,
}

impl PluginOrigin {
    /// Tag a plugin by name using [`VENDOR_MARKER`].
    pub fn from_plugin_name(name: &str) -> Self {
        if name.to_lowercase().contains(VENDOR_MARKER) {
            PluginOrigin::InternalVendor
        } else {
            PluginOrigin::ThirdParty
        }
    }

    pub fn requires_tenant(&self) -> bool {
        matches!(self, PluginOrigin::InternalVendor)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PluginOrigin::InternalVendor => "vendor",
            PluginOrigin::ThirdParty => "third-party",
        }
    }
}

/// A plugin card in the hub view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub module: ModuleCode,
    pub origin: PluginOrigin,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub config_template: Value,
}

/// A template row in the blueprints view (one per module + plugin name).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
    pub module: ModuleCode,
    pub config: Value,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tenants and credentials
// ─────────────────────────────────────────────────────────────────────────────

/// A remote tenant that vendor plugins can be deployed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantRegistration {
    /// Backend key of the tenant entry.
    pub id: String,
    pub name: String,
    pub url: String,
    pub api_key: String,
    pub description: Option<String>,
}

/// A stored set of plugin credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialSet {
    pub id: String,
    /// Always equal to `id`; the backend has no separate display name.
    pub name: String,
    pub kind: String,
    /// Compact serialized form of `credentials`, for raw display.
    pub value: String,
    pub credentials: Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// View sections and notifications
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level console section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Templates,
    Tenants,
    Credentials,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Templates,
        Section::Tenants,
        Section::Credentials,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Hub",
            Section::Templates => "Blueprints",
            Section::Tenants => "Tenants",
            Section::Credentials => "Keys",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Section::Home => 0,
            Section::Templates => 1,
            Section::Tenants => 2,
            Section::Credentials => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "OK",
            Severity::Error => "ERROR",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_code_parse_is_case_insensitive() {
        assert_eq!(ModuleCode::parse("cls"), Some(ModuleCode::Cls));
        assert_eq!(ModuleCode::parse("Edm"), Some(ModuleCode::Edm));
        assert_eq!(ModuleCode::parse("XYZ"), None);
        assert_eq!(ModuleCode::parse(""), None);
    }

    #[test]
    fn test_module_code_cycles() {
        assert_eq!(ModuleCode::Cls.next(), ModuleCode::Cto);
        assert_eq!(ModuleCode::Cfc.next(), ModuleCode::Cls);
        assert_eq!(ModuleCode::Cls.prev(), ModuleCode::Cfc);
    }

    #[test]
    fn test_module_code_serializes_uppercase() {
        let json = serde_json::to_string(&ModuleCode::Cte).unwrap();
        assert_eq!(json, "\"CTE\"");
    }

    #[test]
    fn test_origin_tagging() {
        assert_eq!(
            PluginOrigin::from_plugin_name("Netskope CLS"),
            PluginOrigin::InternalVendor
        );
        assert_eq!(
            PluginOrigin::from_plugin_name("NETSKOPE-cto"),
            PluginOrigin::InternalVendor
        );
        assert_eq!(
            PluginOrigin::from_plugin_name("Crowdstrike"),
            PluginOrigin::ThirdParty
        );
    }

    #[test]
    fn test_only_vendor_plugins_require_tenant() {
        assert!(PluginOrigin::InternalVendor.requires_tenant());
        assert!(!PluginOrigin::ThirdParty.requires_tenant());
    }

    #[test]
    fn test_section_cycling_wraps() {
        assert_eq!(Section::Credentials.next(), Section::Home);
        assert_eq!(Section::Home.prev(), Section::Credentials);
        assert_eq!(Section::from_index(2), Some(Section::Tenants));
        assert_eq!(Section::from_index(4), None);
    }
}

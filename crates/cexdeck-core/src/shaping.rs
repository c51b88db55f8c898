//! Conversion of backend collection responses into the flat lists the views
//! render.
//!
//! Every function here is pure: the same input always yields the same output
//! and entry order follows the backend map order.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::{
    CredentialSet, ModuleCode, PluginDescriptor, PluginOrigin, TemplateRecord, TenantRegistration,
    CREDENTIAL_SET_KIND,
};
use crate::wire::{
    CredentialsResponse, PluginTemplateData, TemplatesResponse, TenantTemplate,
    TenantTemplatesResponse,
};

/// Output of [`shape_templates`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedTemplates {
    /// Hub cards grouped by module. Every module code has an entry.
    pub plugins: HashMap<ModuleCode, Vec<PluginDescriptor>>,
    /// Flat blueprint rows across all modules.
    pub templates: Vec<TemplateRecord>,
}

impl ShapedTemplates {
    pub fn empty() -> Self {
        Self {
            plugins: ModuleCode::ALL.iter().map(|m| (*m, Vec::new())).collect(),
            templates: Vec::new(),
        }
    }

    /// Plugins for one module, empty when the backend listed none.
    pub fn plugins_for(&self, module: ModuleCode) -> &[PluginDescriptor] {
        self.plugins.get(&module).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Shape `GET /api/templates` into hub cards and blueprint rows.
///
/// Module keys are matched case-insensitively; unknown modules are dropped.
/// A plugin entry whose body does not decode is skipped.
pub fn shape_templates(response: &TemplatesResponse) -> ShapedTemplates {
    let mut shaped = ShapedTemplates::empty();

    for (module_key, module_plugins) in &response.plugin_templates {
        let Some(module) = ModuleCode::parse(module_key) else {
            tracing::debug!("Dropping templates for unknown module '{}'", module_key);
            continue;
        };

        let Some(entries) = module_plugins.as_object() else {
            tracing::warn!("Templates for module '{}' are not an object", module_key);
            continue;
        };

        for (index, (plugin_name, body)) in entries.iter().enumerate() {
            let data: PluginTemplateData = match serde_json::from_value(body.clone()) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(
                        "Skipping plugin '{}' in module '{}': {}",
                        plugin_name,
                        module_key,
                        e
                    );
                    continue;
                }
            };

            shaped
                .plugins
                .entry(module)
                .or_default()
                .push(PluginDescriptor {
                    id: format!("{module_key}-{index}"),
                    name: plugin_name.clone(),
                    module,
                    origin: PluginOrigin::from_plugin_name(plugin_name),
                    description: non_empty(&data.description),
                    icon: data.icon.clone(),
                    color: data.color.clone(),
                    config_template: data.template.clone(),
                });

            shaped.templates.push(TemplateRecord {
                id: format!("{module_key}-{plugin_name}"),
                name: plugin_name.clone(),
                module,
                config: data.template,
                description: non_empty(&data.description),
                icon: data.icon,
                color: data.color,
            });
        }
    }

    shaped
}

/// Shape `GET /api/tenant-templates`. Malformed entries are skipped.
pub fn shape_tenants(response: &TenantTemplatesResponse) -> Vec<TenantRegistration> {
    response
        .tenants
        .iter()
        .filter_map(|(key, body)| {
            match serde_json::from_value::<TenantTemplate>(body.clone()) {
                Ok(t) => Some(TenantRegistration {
                    id: key.clone(),
                    name: t.name,
                    url: t.url,
                    api_key: t.token,
                    description: t.description,
                }),
                Err(e) => {
                    tracing::warn!("Skipping tenant '{}': {}", key, e);
                    None
                }
            }
        })
        .collect()
}

/// Shape `GET /api/credentials`.
pub fn shape_credentials(response: &CredentialsResponse) -> Vec<CredentialSet> {
    response
        .plugin_credentials
        .iter()
        .map(|(key, payload)| CredentialSet {
            id: key.clone(),
            name: key.clone(),
            kind: CREDENTIAL_SET_KIND.to_string(),
            value: compact(payload),
            credentials: payload.clone(),
        })
        .collect()
}

fn compact(value: &Value) -> String {
    // Serializing a Value cannot fail: all map keys are strings.
    serde_json::to_string(value).unwrap_or_default()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

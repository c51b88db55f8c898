//! Modal workflows: connect, create, edit and configure
//!
//! Each modal owns its form state and knows how to turn that state into a
//! request. Validation happens here, before anything reaches the network.

use cexdeck_core::prelude::*;
use cexdeck_core::types::{
    CredentialSet, ModuleCode, PluginDescriptor, TemplateRecord, TenantRegistration,
};
use cexdeck_core::wire::{
    ConnectRequest, CredentialTemplateRequest, PluginConfigRequest, PluginTemplateRequest,
    TenantTemplate, TenantTemplateRequest,
};
use serde_json::{json, Value};

use crate::data::{Collection, Mutation};
use crate::form::{ChoiceField, Form, FormField, TextArea, TextField};
use crate::input_key::InputKey;
use crate::session::Session;

/// The modal currently on screen, if any.
#[derive(Debug, Clone)]
pub enum Modal {
    Connect(ConnectModal),
    Create(CreateModal),
    Edit(EditModal),
    Configure(ConfigureModal),
}

impl Modal {
    pub fn title(&self) -> String {
        match self {
            Modal::Connect(_) => "Connect to CloudExchange".to_string(),
            Modal::Create(m) => format!("New {}", m.collection.noun().to_lowercase()),
            Modal::Edit(m) => m.title(),
            Modal::Configure(m) => format!("Configure {}", m.plugin.name),
        }
    }

    pub fn is_submitting(&self) -> bool {
        match self {
            Modal::Connect(_) => false,
            Modal::Create(m) => m.submitting,
            Modal::Edit(m) => m.submitting,
            Modal::Configure(m) => m.submitting,
        }
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        match self {
            Modal::Connect(_) => {}
            Modal::Create(m) => m.submitting = submitting,
            Modal::Edit(m) => m.submitting = submitting,
            Modal::Configure(m) => m.submitting = submitting,
        }
    }

    /// Last backend error shown inside the modal.
    pub fn error(&self) -> Option<&str> {
        match self {
            Modal::Connect(_) => None,
            Modal::Create(m) => m.error.as_deref(),
            Modal::Edit(m) => m.error.as_deref(),
            Modal::Configure(m) => m.error.as_deref(),
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        match self {
            Modal::Connect(_) => {}
            Modal::Create(m) => m.error = error,
            Modal::Edit(m) => m.error = error,
            Modal::Configure(m) => m.error = error,
        }
    }

    /// Whether Enter edits text instead of submitting.
    pub fn enter_inserts_newline(&self) -> bool {
        match self {
            Modal::Edit(_) => true,
            Modal::Create(m) => m.form.focused().is_some_and(FormField::captures_enter),
            Modal::Connect(_) | Modal::Configure(_) => false,
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(form) = self.form_mut() {
            form.focus_next();
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(form) = self.form_mut() {
            form.focus_prev();
        }
    }

    /// Route an editing key to the focused input.
    pub fn handle_input(&mut self, key: InputKey) -> bool {
        match self {
            Modal::Edit(m) => m.editor.handle_key(key),
            other => other.form_mut().is_some_and(|f| f.handle_key(key)),
        }
    }

    pub fn form(&self) -> Option<&Form> {
        match self {
            Modal::Connect(m) => Some(&m.form),
            Modal::Create(m) => Some(&m.form),
            Modal::Edit(_) => None,
            Modal::Configure(m) => Some(&m.form),
        }
    }

    fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            Modal::Connect(m) => Some(&mut m.form),
            Modal::Create(m) => Some(&mut m.form),
            Modal::Edit(_) => None,
            Modal::Configure(m) => Some(&mut m.form),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared validation
// ─────────────────────────────────────────────────────────────────────────────

fn required(form: &Form, index: usize) -> Result<String> {
    let field = form
        .text(index)
        .ok_or_else(|| Error::validation(format!("Form field {} missing", index)))?;
    let value = field.trimmed();
    if value.is_empty() {
        return Err(Error::missing_field(field.label));
    }
    Ok(value.to_string())
}

fn optional(form: &Form, index: usize) -> Option<String> {
    form.text(index)
        .map(TextField::trimmed)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse `text` as a JSON object. Other JSON values are rejected.
pub fn parse_object(field: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::invalid_payload(field, e.to_string()))?;
    if !value.is_object() {
        return Err(Error::invalid_payload(field, "expected a JSON object"));
    }
    Ok(value)
}

fn area_text(form: &Form, index: usize) -> String {
    form.area(index).map(TextArea::text).unwrap_or_default()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Connect
// ─────────────────────────────────────────────────────────────────────────────

const CONNECT_ADDRESS: usize = 0;
const CONNECT_PASSWORD: usize = 1;
const CONNECT_HTTPS: usize = 2;

#[derive(Debug, Clone)]
pub struct ConnectModal {
    pub form: Form,
}

impl ConnectModal {
    pub fn new(default_address: &str, use_https: bool) -> Self {
        Self {
            form: Form::new(vec![
                FormField::Text(TextField::new("VM address").with_value(default_address)),
                FormField::Text(TextField::new("Admin password").masked()),
                FormField::Toggle {
                    label: "Use HTTPS",
                    value: use_https,
                },
            ]),
        }
    }

    pub fn address(&self) -> &str {
        self.form
            .text(CONNECT_ADDRESS)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.form
            .text(CONNECT_PASSWORD)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    pub fn use_https(&self) -> bool {
        self.form.toggle(CONNECT_HTTPS).unwrap_or(true)
    }

    /// Start the attempt on `session`, returning the request to send.
    pub fn begin(&self, session: &mut Session) -> Result<ConnectRequest> {
        session.begin_connect(self.address(), self.password(), self.use_https())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Create
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateModal {
    pub collection: Collection,
    pub form: Form,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CreateModal {
    /// Blank form for `collection`. Template forms start on `module`.
    pub fn new(collection: Collection, module: ModuleCode) -> Self {
        let fields = match collection {
            Collection::Templates => vec![
                FormField::Module {
                    label: "Module",
                    value: module,
                },
                FormField::Text(TextField::new("Plugin name")),
                FormField::Text(TextField::new("Description")),
                FormField::Text(TextField::new("Icon").optional()),
                FormField::Area(TextArea::with_text("Template (JSON)", "{}")),
            ],
            Collection::Tenants => vec![
                FormField::Text(TextField::new("Tenant key")),
                FormField::Text(TextField::new("Name")),
                FormField::Text(TextField::new("URL")),
                FormField::Text(TextField::new("API token").masked()),
                FormField::Text(TextField::new("Description").optional()),
            ],
            Collection::Credentials => vec![
                FormField::Text(TextField::new("Credential key")),
                FormField::Area(TextArea::with_text("Credentials (JSON)", "{}")),
            ],
        };
        Self {
            collection,
            form: Form::new(fields),
            submitting: false,
            error: None,
        }
    }

    /// Validate the form and build the create request.
    pub fn build(&self) -> Result<Mutation> {
        let form = &self.form;
        match self.collection {
            Collection::Templates => {
                let module = form.module(0).unwrap_or_default();
                let plugin_name = required(form, 1)?;
                let description = required(form, 2)?;
                let icon = optional(form, 3);
                let template = parse_object("Template", &area_text(form, 4))?;
                Ok(Mutation::CreateTemplate(PluginTemplateRequest {
                    module,
                    plugin_name,
                    icon,
                    description,
                    color: None,
                    template,
                }))
            }
            Collection::Tenants => {
                let tenant_key = required(form, 0)?;
                let name = required(form, 1)?;
                let url = required(form, 2)?;
                let token = required(form, 3)?;
                let description = optional(form, 4);
                Ok(Mutation::CreateTenant(TenantTemplateRequest {
                    tenant_key,
                    tenant: TenantTemplate {
                        name,
                        url,
                        token,
                        description,
                    },
                }))
            }
            Collection::Credentials => {
                let credential_key = required(form, 0)?;
                let credentials = parse_object("Credentials", &area_text(form, 1))?;
                Ok(Mutation::CreateCredential(CredentialTemplateRequest {
                    credential_key,
                    credentials,
                }))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Edit (raw payload)
// ─────────────────────────────────────────────────────────────────────────────

/// The entry a raw edit applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    Template(TemplateRecord),
    Tenant(TenantRegistration),
    Credential(CredentialSet),
}

impl EditTarget {
    pub fn name(&self) -> &str {
        match self {
            EditTarget::Template(t) => &t.name,
            EditTarget::Tenant(t) => &t.id,
            EditTarget::Credential(c) => &c.id,
        }
    }

    /// Payload the editor starts with.
    pub fn payload(&self) -> Value {
        match self {
            EditTarget::Template(t) => t.config.clone(),
            EditTarget::Tenant(t) => {
                let mut body = json!({
                    "name": t.name,
                    "url": t.url,
                    "token": t.api_key,
                });
                if let (Some(description), Some(map)) = (&t.description, body.as_object_mut()) {
                    map.insert("description".into(), Value::String(description.clone()));
                }
                body
            }
            EditTarget::Credential(c) => c.credentials.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditModal {
    pub target: EditTarget,
    pub editor: TextArea,
    pub submitting: bool,
    pub error: Option<String>,
}

impl EditModal {
    pub fn new(target: EditTarget) -> Self {
        let editor = TextArea::with_text("Payload (JSON)", &pretty(&target.payload()));
        Self {
            target,
            editor,
            submitting: false,
            error: None,
        }
    }

    pub fn title(&self) -> String {
        let kind = match self.target {
            EditTarget::Template(_) => "template",
            EditTarget::Tenant(_) => "tenant",
            EditTarget::Credential(_) => "credential set",
        };
        format!("Edit {} '{}'", kind, self.target.name())
    }

    /// Parse the edited text and build the update request.
    pub fn build(&self) -> Result<Mutation> {
        let text = self.editor.text();
        match &self.target {
            EditTarget::Template(record) => {
                let template = parse_object("Template", &text)?;
                Ok(Mutation::UpdateTemplate {
                    module: record.module,
                    plugin_name: record.name.clone(),
                    request: PluginTemplateRequest {
                        module: record.module,
                        plugin_name: record.name.clone(),
                        icon: record.icon.clone(),
                        description: record.description.clone().unwrap_or_default(),
                        color: record.color.clone(),
                        template,
                    },
                })
            }
            EditTarget::Tenant(tenant) => {
                let value = parse_object("Tenant", &text)?;
                let body: TenantTemplate = serde_json::from_value(value).map_err(|_| {
                    Error::validation("Tenant payload needs string fields name, url and token")
                })?;
                Ok(Mutation::UpdateTenant {
                    key: tenant.id.clone(),
                    request: TenantTemplateRequest {
                        tenant_key: tenant.id.clone(),
                        tenant: body,
                    },
                })
            }
            EditTarget::Credential(cred) => {
                let credentials = parse_object("Credentials", &text)?;
                Ok(Mutation::UpdateCredential {
                    key: cred.id.clone(),
                    request: CredentialTemplateRequest {
                        credential_key: cred.id.clone(),
                        credentials,
                    },
                })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configure
// ─────────────────────────────────────────────────────────────────────────────

const CONFIGURE_NAME: usize = 0;
const CONFIGURE_TENANT: usize = 1;

#[derive(Debug, Clone)]
pub struct ConfigureModal {
    pub plugin: PluginDescriptor,
    pub form: Form,
    /// Tenant list fetch in flight
    pub tenants_loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ConfigureModal {
    pub fn new(plugin: PluginDescriptor) -> Self {
        let mut fields = vec![FormField::Text(TextField::new("Configuration name"))];
        let needs_tenant = plugin.origin.requires_tenant();
        if needs_tenant {
            fields.push(FormField::Choice(ChoiceField::new("Tenant")));
        }
        Self {
            plugin,
            form: Form::new(fields),
            tenants_loading: needs_tenant,
            submitting: false,
            error: None,
        }
    }

    pub fn needs_tenant(&self) -> bool {
        self.plugin.origin.requires_tenant()
    }

    pub fn tenant_choice(&self) -> Option<&ChoiceField> {
        self.form.choice(CONFIGURE_TENANT)
    }

    /// Fill the tenant picker from a fresh fetch.
    pub fn set_tenants(&mut self, tenants: &[TenantRegistration]) {
        self.tenants_loading = false;
        if let Some(choice) = self.form.choice_mut(CONFIGURE_TENANT) {
            choice.set_options(
                tenants
                    .iter()
                    .map(|t| (t.id.clone(), t.name.clone()))
                    .collect(),
            );
        }
    }

    /// Validate against the current session and build the request.
    ///
    /// Returns the connection id to post to alongside the body.
    pub fn build(&self, session: &Session) -> Result<(String, PluginConfigRequest)> {
        let name = self
            .form
            .text(CONFIGURE_NAME)
            .map(|f| f.trimmed().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return Err(Error::missing_field("Configuration name"));
        }

        let tenant = if self.needs_tenant() {
            let selected = self
                .tenant_choice()
                .and_then(ChoiceField::selected_value)
                .map(str::to_string);
            match selected {
                Some(tenant) => Some(tenant),
                None => return Err(Error::validation("Select a tenant for this plugin")),
            }
        } else {
            None
        };

        let connection_id = session
            .active_connection()
            .ok_or_else(|| Error::validation("Connect to a CloudExchange instance first"))?;

        Ok((
            connection_id.to_string(),
            PluginConfigRequest {
                name,
                plugin_data: self.plugin.config_template.clone(),
                tenant,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cexdeck_core::types::PluginOrigin;
    use cexdeck_core::wire::ConnectResponse;

    fn type_into(form: &mut Form, index: usize, text: &str) {
        form.focus = index;
        for c in text.chars() {
            form.handle_key(InputKey::Char(c));
        }
    }

    fn plugin(name: &str) -> PluginDescriptor {
        PluginDescriptor {
            id: "CLS-0".into(),
            name: name.into(),
            module: ModuleCode::Cls,
            origin: PluginOrigin::from_plugin_name(name),
            description: None,
            icon: None,
            color: None,
            config_template: json!({"port": 514}),
        }
    }

    fn connected_session() -> Session {
        let mut session = Session::new();
        session.begin_connect("10.0.0.1", "pw", true).unwrap();
        session.complete_connect(
            "10.0.0.1".into(),
            Ok(ConnectResponse {
                connection_id: "conn-9".into(),
                message: None,
            }),
        );
        session
    }

    #[test]
    fn test_parse_object_rules() {
        assert!(parse_object("P", r#"{"a": 1}"#).is_ok());
        assert!(matches!(
            parse_object("P", "   "),
            Err(Error::MissingField { .. })
        ));
        assert!(matches!(
            parse_object("P", "{not json"),
            Err(Error::InvalidPayload { .. })
        ));
        assert!(matches!(
            parse_object("P", "[1, 2]"),
            Err(Error::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_create_tenant_requires_fields() {
        let mut modal = CreateModal::new(Collection::Tenants, ModuleCode::Cls);
        let err = modal.build().unwrap_err();
        assert_eq!(err.to_string(), "Tenant key is required");

        type_into(&mut modal.form, 0, "prod");
        type_into(&mut modal.form, 1, "Production");
        type_into(&mut modal.form, 2, "https://prod.example");
        type_into(&mut modal.form, 3, "tok");

        match modal.build().unwrap() {
            Mutation::CreateTenant(req) => {
                assert_eq!(req.tenant_key, "prod");
                assert_eq!(req.tenant.token, "tok");
                assert_eq!(req.tenant.description, None);
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_create_template_uses_selected_module() {
        let mut modal = CreateModal::new(Collection::Templates, ModuleCode::Edm);
        type_into(&mut modal.form, 1, "Syslog");
        type_into(&mut modal.form, 2, "Forwarder");

        match modal.build().unwrap() {
            Mutation::CreateTemplate(req) => {
                assert_eq!(req.module, ModuleCode::Edm);
                assert_eq!(req.plugin_name, "Syslog");
                assert_eq!(req.template, json!({}));
                assert_eq!(req.icon, None);
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_create_credential_rejects_non_object() {
        let mut modal = CreateModal::new(Collection::Credentials, ModuleCode::Cls);
        type_into(&mut modal.form, 0, "aws");
        if let Some(area) = modal.form.area_mut(1) {
            *area = TextArea::with_text("Credentials (JSON)", "\"just a string\"");
        }
        assert!(matches!(
            modal.build(),
            Err(Error::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_edit_tenant_seed_and_validation() {
        let tenant = TenantRegistration {
            id: "prod".into(),
            name: "Production".into(),
            url: "https://p".into(),
            api_key: "tok".into(),
            description: None,
        };
        let mut modal = EditModal::new(EditTarget::Tenant(tenant));
        let seeded: Value = serde_json::from_str(&modal.editor.text()).unwrap();
        assert_eq!(seeded, json!({"name": "Production", "url": "https://p", "token": "tok"}));
        assert!(modal.build().is_ok());

        modal.editor = TextArea::with_text("Payload", r#"{"name": "x"}"#);
        assert!(matches!(modal.build(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_edit_template_keeps_metadata() {
        let record = TemplateRecord {
            id: "CLS-Syslog".into(),
            name: "Syslog".into(),
            module: ModuleCode::Cls,
            config: json!({"a": 1}),
            description: Some("desc".into()),
            icon: Some("icon".into()),
            color: None,
        };
        let mut modal = EditModal::new(EditTarget::Template(record));
        modal.editor = TextArea::with_text("Payload", r#"{"a": 2}"#);

        match modal.build().unwrap() {
            Mutation::UpdateTemplate {
                module,
                plugin_name,
                request,
            } => {
                assert_eq!(module, ModuleCode::Cls);
                assert_eq!(plugin_name, "Syslog");
                assert_eq!(request.description, "desc");
                assert_eq!(request.template, json!({"a": 2}));
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_edit_credential_requires_object() {
        let cred = CredentialSet {
            id: "k".into(),
            name: "k".into(),
            kind: "Credential Set".into(),
            value: "{}".into(),
            credentials: json!({}),
        };
        let mut modal = EditModal::new(EditTarget::Credential(cred));
        modal.editor = TextArea::with_text("Payload", "[1, 2]");
        assert!(matches!(modal.build(), Err(Error::Validation { .. })));
        modal.editor = TextArea::with_text("Payload", "\"plain\"");
        assert!(matches!(modal.build(), Err(Error::Validation { .. })));

        modal.editor = TextArea::with_text("Payload", r#"{"user": "svc"}"#);
        match modal.build() {
            Ok(Mutation::UpdateCredential { key, request }) => {
                assert_eq!(key, "k");
                assert_eq!(request.credentials, json!({"user": "svc"}));
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_edit_enter_inserts_newline() {
        let cred = CredentialSet {
            id: "k".into(),
            name: "k".into(),
            kind: "Credential Set".into(),
            value: "{}".into(),
            credentials: json!({}),
        };
        let mut modal = Modal::Edit(EditModal::new(EditTarget::Credential(cred)));
        assert!(modal.enter_inserts_newline());
        modal.handle_input(InputKey::Enter);
        if let Modal::Edit(m) = &modal {
            assert_eq!(m.editor.lines().len(), 2);
        }
    }

    #[test]
    fn test_configure_rejections() {
        let session = connected_session();

        let vendor = ConfigureModal::new(plugin("Netskope CLS"));
        assert!(vendor.needs_tenant());
        assert!(matches!(
            vendor.build(&session),
            Err(Error::MissingField { .. })
        ));

        let mut vendor = vendor;
        type_into(&mut vendor.form, 0, "cfg");
        assert!(matches!(
            vendor.build(&session),
            Err(Error::Validation { .. })
        ));

        let mut third = ConfigureModal::new(plugin("Crowdstrike"));
        type_into(&mut third.form, 0, "cfg");
        assert!(third.build(&Session::new()).is_err());
    }

    #[test]
    fn test_configure_vendor_with_tenant() {
        let session = connected_session();
        let mut modal = ConfigureModal::new(plugin("Netskope CLS"));
        modal.set_tenants(&[TenantRegistration {
            id: "prod".into(),
            name: "Production".into(),
            url: "u".into(),
            api_key: "t".into(),
            description: None,
        }]);
        assert!(!modal.tenants_loading);

        type_into(&mut modal.form, 0, "cfg");
        modal.form.focus = 1;
        modal.form.handle_key(InputKey::Char(' '));

        let (conn, request) = modal.build(&session).unwrap();
        assert_eq!(conn, "conn-9");
        assert_eq!(request.name, "cfg");
        assert_eq!(request.tenant.as_deref(), Some("prod"));
        assert_eq!(request.plugin_data, json!({"port": 514}));
    }

    #[test]
    fn test_connect_modal_defaults() {
        let modal = ConnectModal::new("10.0.0.2", false);
        assert_eq!(modal.address(), "10.0.0.2");
        assert_eq!(modal.password(), "");
        assert!(!modal.use_https());
    }
}

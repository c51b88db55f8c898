//! Test doubles for the gateway
//!
//! [`FakeGateway`] records every call and answers from canned responses.

use std::sync::Mutex;

use cexdeck_core::types::ModuleCode;
use cexdeck_core::wire::{
    ConnectRequest, ConnectResponse, CredentialTemplateRequest, CredentialsResponse,
    PluginConfigRequest, PluginConfigResponse, PluginTemplateRequest, TemplatesResponse,
    TenantTemplateRequest, TenantTemplatesResponse,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::gateway::Gateway;

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Connect { address: String, use_https: bool },
    ListTemplates,
    CreateTemplate(PluginTemplateRequest),
    UpdateTemplate {
        module: ModuleCode,
        plugin_name: String,
        request: PluginTemplateRequest,
    },
    DeleteTemplate {
        module: ModuleCode,
        plugin_name: String,
    },
    ListTenants,
    CreateTenant(TenantTemplateRequest),
    UpdateTenant {
        key: String,
        request: TenantTemplateRequest,
    },
    DeleteTenant(String),
    ListCredentials,
    CreateCredential(CredentialTemplateRequest),
    UpdateCredential {
        key: String,
        request: CredentialTemplateRequest,
    },
    DeleteCredential(String),
    ConfigurePlugin {
        connection_id: String,
        request: PluginConfigRequest,
    },
}

/// Recording gateway with canned responses.
///
/// Every call succeeds unless [`FakeGateway::fail_with`] was set.
pub struct FakeGateway {
    calls: Mutex<Vec<GatewayCall>>,
    connection_id: String,
    templates: Value,
    tenants: Value,
    credentials: Value,
    failure: Mutex<Option<ApiError>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            connection_id: "conn-1".to_string(),
            templates: Value::Null,
            tenants: Value::Null,
            credentials: Value::Null,
            failure: Mutex::new(None),
        }
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body returned by `list_templates`.
    pub fn with_templates(mut self, body: Value) -> Self {
        self.templates = body;
        self
    }

    pub fn with_tenants(mut self, body: Value) -> Self {
        self.tenants = body;
        self
    }

    pub fn with_credentials(mut self, body: Value) -> Self {
        self.credentials = body;
        self
    }

    pub fn with_connection_id(mut self, id: impl Into<String>) -> Self {
        self.connection_id = id.into();
        self
    }

    /// Make every following call fail with `err`.
    pub fn fail_with(&self, err: ApiError) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(err);
        }
    }

    pub fn succeed(&self) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = None;
        }
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, pred: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: GatewayCall) -> ApiResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match self.failure.lock().ok().and_then(|f| (*f).clone()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn decode<T: serde::de::DeserializeOwned + Default>(body: &Value) -> ApiResult<T> {
        if body.is_null() {
            return Ok(T::default());
        }
        serde_json::from_value(body.clone()).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Gateway for FakeGateway {
    async fn connect(&self, request: &ConnectRequest) -> ApiResult<ConnectResponse> {
        self.record(GatewayCall::Connect {
            address: request.vm_ip.clone(),
            use_https: request.use_https,
        })?;
        Ok(ConnectResponse {
            connection_id: self.connection_id.clone(),
            message: None,
        })
    }

    async fn list_templates(&self) -> ApiResult<TemplatesResponse> {
        self.record(GatewayCall::ListTemplates)?;
        Self::decode(&self.templates)
    }

    async fn create_template(&self, request: &PluginTemplateRequest) -> ApiResult<Value> {
        self.record(GatewayCall::CreateTemplate(request.clone()))?;
        Ok(Value::Null)
    }

    async fn update_template(
        &self,
        module: ModuleCode,
        plugin_name: &str,
        request: &PluginTemplateRequest,
    ) -> ApiResult<Value> {
        self.record(GatewayCall::UpdateTemplate {
            module,
            plugin_name: plugin_name.to_string(),
            request: request.clone(),
        })?;
        Ok(Value::Null)
    }

    async fn delete_template(&self, module: ModuleCode, plugin_name: &str) -> ApiResult<Value> {
        self.record(GatewayCall::DeleteTemplate {
            module,
            plugin_name: plugin_name.to_string(),
        })?;
        Ok(Value::Null)
    }

    async fn list_tenants(&self) -> ApiResult<TenantTemplatesResponse> {
        self.record(GatewayCall::ListTenants)?;
        Self::decode(&self.tenants)
    }

    async fn create_tenant(&self, request: &TenantTemplateRequest) -> ApiResult<Value> {
        self.record(GatewayCall::CreateTenant(request.clone()))?;
        Ok(Value::Null)
    }

    async fn update_tenant(
        &self,
        key: &str,
        request: &TenantTemplateRequest,
    ) -> ApiResult<Value> {
        self.record(GatewayCall::UpdateTenant {
            key: key.to_string(),
            request: request.clone(),
        })?;
        Ok(Value::Null)
    }

    async fn delete_tenant(&self, key: &str) -> ApiResult<Value> {
        self.record(GatewayCall::DeleteTenant(key.to_string()))?;
        Ok(Value::Null)
    }

    async fn list_credentials(&self) -> ApiResult<CredentialsResponse> {
        self.record(GatewayCall::ListCredentials)?;
        Self::decode(&self.credentials)
    }

    async fn create_credential(&self, request: &CredentialTemplateRequest) -> ApiResult<Value> {
        self.record(GatewayCall::CreateCredential(request.clone()))?;
        Ok(Value::Null)
    }

    async fn update_credential(
        &self,
        key: &str,
        request: &CredentialTemplateRequest,
    ) -> ApiResult<Value> {
        self.record(GatewayCall::UpdateCredential {
            key: key.to_string(),
            request: request.clone(),
        })?;
        Ok(Value::Null)
    }

    async fn delete_credential(&self, key: &str) -> ApiResult<Value> {
        self.record(GatewayCall::DeleteCredential(key.to_string()))?;
        Ok(Value::Null)
    }

    async fn configure_plugin(
        &self,
        connection_id: &str,
        request: &PluginConfigRequest,
    ) -> ApiResult<PluginConfigResponse> {
        self.record(GatewayCall::ConfigurePlugin {
            connection_id: connection_id.to_string(),
            request: request.clone(),
        })?;
        Ok(PluginConfigResponse {
            success: true,
            message: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fake_records_calls_in_order() {
        let fake = FakeGateway::new();
        fake.list_templates().await.unwrap();
        fake.delete_tenant("prod").await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![
                GatewayCall::ListTemplates,
                GatewayCall::DeleteTenant("prod".into())
            ]
        );
    }

    #[tokio::test]
    async fn test_fake_failure_still_records() {
        let fake = FakeGateway::new();
        fake.fail_with(ApiError::status(500, "boom"));

        let err = fake.list_credentials().await.unwrap_err();
        assert_eq!(err.user_message(), "boom");
        assert_eq!(fake.count(|c| matches!(c, GatewayCall::ListCredentials)), 1);
    }

    #[tokio::test]
    async fn test_fake_decodes_canned_bodies() {
        let fake = FakeGateway::new().with_tenants(json!({
            "tenants": {"prod": {"name": "P", "url": "u", "token": "t"}}
        }));
        let resp = fake.list_tenants().await.unwrap();
        assert!(resp.tenants.contains_key("prod"));
    }
}

//! Named backend operations
//!
//! [`Gateway`] is the seam between the app layer and the network. The app
//! only ever talks to a `Gateway`; [`GatewayClient`] is the real one.

use cexdeck_core::types::ModuleCode;
use cexdeck_core::wire::{
    ConnectRequest, ConnectResponse, CredentialTemplateRequest, CredentialsResponse,
    PluginConfigRequest, PluginConfigResponse, PluginTemplateRequest, TemplatesResponse,
    TenantTemplateRequest, TenantTemplatesResponse,
};
use reqwest::Method;
use serde_json::Value;

use crate::client::GatewayClient;
use crate::error::ApiResult;
use crate::paths;

/// Backend operations used by the console.
///
/// Mutating operations return the raw response body; the console only cares
/// whether they succeeded.
#[trait_variant::make(Gateway: Send)]
pub trait LocalGateway {
    /// `POST /api/connect`
    async fn connect(&self, request: &ConnectRequest) -> ApiResult<ConnectResponse>;

    /// `GET /api/templates`
    async fn list_templates(&self) -> ApiResult<TemplatesResponse>;

    async fn create_template(&self, request: &PluginTemplateRequest) -> ApiResult<Value>;

    async fn update_template(
        &self,
        module: ModuleCode,
        plugin_name: &str,
        request: &PluginTemplateRequest,
    ) -> ApiResult<Value>;

    async fn delete_template(&self, module: ModuleCode, plugin_name: &str) -> ApiResult<Value>;

    /// `GET /api/tenant-templates`
    async fn list_tenants(&self) -> ApiResult<TenantTemplatesResponse>;

    async fn create_tenant(&self, request: &TenantTemplateRequest) -> ApiResult<Value>;

    async fn update_tenant(&self, key: &str, request: &TenantTemplateRequest)
        -> ApiResult<Value>;

    async fn delete_tenant(&self, key: &str) -> ApiResult<Value>;

    /// `GET /api/credentials`
    async fn list_credentials(&self) -> ApiResult<CredentialsResponse>;

    async fn create_credential(&self, request: &CredentialTemplateRequest) -> ApiResult<Value>;

    async fn update_credential(
        &self,
        key: &str,
        request: &CredentialTemplateRequest,
    ) -> ApiResult<Value>;

    async fn delete_credential(&self, key: &str) -> ApiResult<Value>;

    /// `POST /api/plugins/{connection_id}`
    async fn configure_plugin(
        &self,
        connection_id: &str,
        request: &PluginConfigRequest,
    ) -> ApiResult<PluginConfigResponse>;
}

impl Gateway for GatewayClient {
    async fn connect(&self, request: &ConnectRequest) -> ApiResult<ConnectResponse> {
        tracing::info!("Connecting to {}", request.vm_ip);
        self.request_json(Method::POST, paths::CONNECT, Some(request))
            .await
    }

    async fn list_templates(&self) -> ApiResult<TemplatesResponse> {
        self.request_json(Method::GET, paths::TEMPLATES, None::<&Value>)
            .await
    }

    async fn create_template(&self, request: &PluginTemplateRequest) -> ApiResult<Value> {
        self.request_json(Method::POST, paths::PLUGIN_TEMPLATES, Some(request))
            .await
    }

    async fn update_template(
        &self,
        module: ModuleCode,
        plugin_name: &str,
        request: &PluginTemplateRequest,
    ) -> ApiResult<Value> {
        let path = paths::plugin_template(module, plugin_name);
        self.request_json(Method::PUT, &path, Some(request)).await
    }

    async fn delete_template(&self, module: ModuleCode, plugin_name: &str) -> ApiResult<Value> {
        let path = paths::plugin_template(module, plugin_name);
        self.request(Method::DELETE, &path, None).await
    }

    async fn list_tenants(&self) -> ApiResult<TenantTemplatesResponse> {
        self.request_json(Method::GET, paths::TENANT_TEMPLATES, None::<&Value>)
            .await
    }

    async fn create_tenant(&self, request: &TenantTemplateRequest) -> ApiResult<Value> {
        self.request_json(Method::POST, paths::TENANT_TEMPLATES, Some(request))
            .await
    }

    async fn update_tenant(
        &self,
        key: &str,
        request: &TenantTemplateRequest,
    ) -> ApiResult<Value> {
        let path = paths::tenant_template(key);
        self.request_json(Method::PUT, &path, Some(request)).await
    }

    async fn delete_tenant(&self, key: &str) -> ApiResult<Value> {
        let path = paths::tenant_template(key);
        self.request(Method::DELETE, &path, None).await
    }

    async fn list_credentials(&self) -> ApiResult<CredentialsResponse> {
        self.request_json(Method::GET, paths::CREDENTIALS, None::<&Value>)
            .await
    }

    async fn create_credential(&self, request: &CredentialTemplateRequest) -> ApiResult<Value> {
        self.request_json(Method::POST, paths::CREDENTIALS, Some(request))
            .await
    }

    async fn update_credential(
        &self,
        key: &str,
        request: &CredentialTemplateRequest,
    ) -> ApiResult<Value> {
        let path = paths::credential(key);
        self.request_json(Method::PUT, &path, Some(request)).await
    }

    async fn delete_credential(&self, key: &str) -> ApiResult<Value> {
        let path = paths::credential(key);
        self.request(Method::DELETE, &path, None).await
    }

    async fn configure_plugin(
        &self,
        connection_id: &str,
        request: &PluginConfigRequest,
    ) -> ApiResult<PluginConfigResponse> {
        tracing::info!("Configuring plugin '{}'", request.name);
        let path = paths::plugin_config(connection_id);
        let body: Value = self.request_json(Method::POST, &path, Some(request)).await?;
        // Some backends answer with an empty body on success.
        Ok(serde_json::from_value(body).unwrap_or_default())
    }
}

//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every gateway call runs in its own tokio task and reports back with a
//! single completion message. Nothing is cancelled or retried.

use std::sync::Arc;

use cexdeck_api::{ApiResult, Gateway};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::data::Mutation;
use crate::message::Message;
use crate::UpdateAction;

/// Execute an action by spawning a background task
pub fn handle_action<G>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, gateway: Arc<G>)
where
    G: Gateway + Sync + 'static,
{
    match action {
        UpdateAction::Connect(request) => {
            tokio::spawn(async move {
                let address = request.vm_ip.clone();
                let result = gateway.connect(&request).await;
                send(&msg_tx, Message::ConnectCompleted { address, result }).await;
            });
        }

        UpdateAction::FetchTemplates => {
            tokio::spawn(async move {
                let result = gateway.list_templates().await;
                send(&msg_tx, Message::TemplatesLoaded(result)).await;
            });
        }

        UpdateAction::FetchTenants => {
            tokio::spawn(async move {
                let result = gateway.list_tenants().await;
                send(&msg_tx, Message::TenantsLoaded(result)).await;
            });
        }

        UpdateAction::FetchCredentials => {
            tokio::spawn(async move {
                let result = gateway.list_credentials().await;
                send(&msg_tx, Message::CredentialsLoaded(result)).await;
            });
        }

        UpdateAction::FetchConfigureTenants => {
            tokio::spawn(async move {
                let result = gateway.list_tenants().await;
                send(&msg_tx, Message::ConfigureTenantsLoaded(result)).await;
            });
        }

        UpdateAction::Mutate(mutation) => {
            tokio::spawn(async move {
                let summary = mutation.summary();
                let result = run_mutation(gateway.as_ref(), &mutation).await;
                send(&msg_tx, Message::MutationCompleted { summary, result }).await;
            });
        }

        UpdateAction::ConfigurePlugin {
            connection_id,
            request,
        } => {
            tokio::spawn(async move {
                let result = gateway.configure_plugin(&connection_id, &request).await;
                send(
                    &msg_tx,
                    Message::ConfigureCompleted {
                        name: request.name,
                        result,
                    },
                )
                .await;
            });
        }
    }
}

/// Issue the request for one mutation. The response body is discarded.
async fn run_mutation<G: Gateway + Sync>(gateway: &G, mutation: &Mutation) -> ApiResult<()> {
    debug!(
        "{} {:?} '{}'",
        mutation.kind().verb(),
        mutation.collection(),
        mutation.subject()
    );
    let response = match mutation {
        Mutation::CreateTemplate(request) => gateway.create_template(request).await,
        Mutation::UpdateTemplate {
            module,
            plugin_name,
            request,
        } => gateway.update_template(*module, plugin_name, request).await,
        Mutation::DeleteTemplate {
            module,
            plugin_name,
        } => gateway.delete_template(*module, plugin_name).await,
        Mutation::CreateTenant(request) => gateway.create_tenant(request).await,
        Mutation::UpdateTenant { key, request } => gateway.update_tenant(key, request).await,
        Mutation::DeleteTenant { key } => gateway.delete_tenant(key).await,
        Mutation::CreateCredential(request) => gateway.create_credential(request).await,
        Mutation::UpdateCredential { key, request } => {
            gateway.update_credential(key, request).await
        }
        Mutation::DeleteCredential { key } => gateway.delete_credential(key).await,
    };
    response.map(|_| ())
}

async fn send(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        warn!("Message channel closed; dropping gateway result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cexdeck_api::test_utils::{FakeGateway, GatewayCall};
    use cexdeck_core::types::ModuleCode;

    #[test]
    fn test_run_mutation_routes_to_matching_operation() {
        let gateway = FakeGateway::new();
        let mutations = vec![
            Mutation::DeleteTemplate {
                module: ModuleCode::Edm,
                plugin_name: "Syslog".into(),
            },
            Mutation::DeleteTenant { key: "prod".into() },
            Mutation::DeleteCredential { key: "aws".into() },
        ];
        for mutation in &mutations {
            tokio_test::block_on(run_mutation(&gateway, mutation)).unwrap();
        }

        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::DeleteTemplate {
                    module: ModuleCode::Edm,
                    plugin_name: "Syslog".into(),
                },
                GatewayCall::DeleteTenant("prod".into()),
                GatewayCall::DeleteCredential("aws".into()),
            ]
        );
    }

    #[test]
    fn test_run_mutation_surfaces_failure() {
        let gateway = FakeGateway::new();
        gateway.fail_with(cexdeck_api::ApiError::status(404, "Not found"));
        let result = tokio_test::block_on(run_mutation(
            &gateway,
            &Mutation::DeleteTenant { key: "x".into() },
        ));
        assert_eq!(result, Err(cexdeck_api::ApiError::status(404, "Not found")));
    }

    #[tokio::test]
    async fn test_fetch_action_reports_back() {
        let gateway = Arc::new(FakeGateway::new());
        let (tx, mut rx) = mpsc::channel(4);

        handle_action(UpdateAction::FetchTenants, tx, gateway.clone());

        let msg = rx.recv().await;
        assert!(matches!(msg, Some(Message::TenantsLoaded(Ok(_)))));
        assert_eq!(gateway.calls(), vec![GatewayCall::ListTenants]);
    }
}

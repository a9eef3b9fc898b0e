//! HTTP surface for frame clients and the mention webhook
//!
//! - **Frame** - `GET|POST /api[/{cast}]` renders the frame for a cast
//! - **Launch** - `POST /api/launch/{cast}` returns the wallet transaction
//! - **Webhook** - `POST /api/webhook/mention` answers launch mentions
//! - **Health** - `GET /health`

mod handlers;
mod routes;

pub use handlers::ApiError;
pub use routes::*;

use crate::auth::AddressAuthorizer;
use crate::chain::{RegistryClient, TokenRegistry};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::notifier::MentionNotifier;
use crate::social::{CastPublisher, CastSource, NeynarClient};
use crate::workflow::{LaunchWorkflow, WorkflowSettings};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<LaunchWorkflow>,
    pub notifier: Arc<MentionNotifier>,
    pub public_url: String,
}

impl AppState {
    pub fn new(workflow: Arc<LaunchWorkflow>, notifier: Arc<MentionNotifier>, public_url: String) -> Self {
        Self {
            workflow,
            notifier,
            public_url,
        }
    }

    /// Wire the production clients from configuration
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let registry: Arc<dyn TokenRegistry> = Arc::new(RegistryClient::new(&config.chain)?);
        let neynar = Arc::new(NeynarClient::new(&config.social)?);
        let authorizer = Arc::new(AddressAuthorizer::from_private_key(
            &config.signing.private_key,
        )?);

        info!(
            "Launch signer {} for registry {} on {}",
            authorizer.signer_address(),
            registry.registry_address(),
            config.chain.caip2_chain_id()
        );

        let casts: Arc<dyn CastSource> = neynar.clone();
        let publisher: Arc<dyn CastPublisher> = neynar;
        let workflow = LaunchWorkflow::new(
            registry,
            casts,
            authorizer,
            WorkflowSettings::from_config(config),
        );
        let notifier = MentionNotifier::new(publisher, config.server.public_url.clone());

        Ok(Self::new(
            Arc::new(workflow),
            Arc::new(notifier),
            config.server.public_url.clone(),
        ))
    }
}

/// Build the router with request tracing
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_frame_routes())
        .merge(create_launch_routes())
        .merge(create_webhook_routes())
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Serve until the process receives Ctrl-C
pub async fn start_server(state: AppState, bind_address: &str) -> AppResult<()> {
    let app = create_app(state);
    let listener = TcpListener::bind(bind_address).await?;
    info!("Launcher listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

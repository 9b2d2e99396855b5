//! Axum-based HTTP server.

use crate::config::ServerConfig;
use crate::error::RpcError;
use crate::handlers;
use agora_auth::SessionIssuer;
use agora_governance::{ProposalEngine, VoteLedger};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionIssuer>,
    pub proposals: Arc<ProposalEngine>,
    pub ledger: Arc<VoteLedger>,
    pub default_proposal_duration_secs: u64,
}

impl AppState {
    pub fn new(
        sessions: Arc<SessionIssuer>,
        proposals: Arc<ProposalEngine>,
        ledger: Arc<VoteLedger>,
        default_proposal_duration_secs: u64,
    ) -> Self {
        Self {
            sessions,
            proposals,
            ledger,
            default_proposal_duration_secs,
        }
    }
}

/// The HTTP server, configured with a port and shared state.
pub struct RpcServer {
    pub config: ServerConfig,
    pub state: AppState,
}

impl RpcServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router with all routes mounted.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::ping))
            .route("/auth/request-nonce", post(handlers::request_nonce))
            .route("/auth/login", post(handlers::login))
            .route(
                "/proposals",
                get(handlers::list_proposals).post(handlers::create_proposal),
            )
            .route("/proposals/:proposal_id", get(handlers::get_proposal))
            .route("/proposals/:proposal_id/vote", post(handlers::cast_vote))
            .route("/proposals/:proposal_id/votes", get(handlers::list_votes))
            .route("/proposals/:proposal_id/results", get(handlers::get_results))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start serving. Runs until ctrl-c.
    pub async fn start(&self) -> Result<(), RpcError> {
        let app = Self::router(self.state.clone());
        let addr = format!("0.0.0.0:{}", self.config.listen_port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("HTTP server listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}

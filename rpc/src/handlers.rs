//! Request handlers and their JSON payloads.

use crate::error::RpcError;
use crate::server::AppState;
use agora_auth::AuthError;
use agora_governance::{ProposalDraft, Tally};
use agora_store::{Proposal, ProposalKind, Vote};
use agora_types::{ProposalId, Timestamp, VoteOption, WalletAddress};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ── Payloads ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NonceResponse {
    pub nonce: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Address of the wallet claiming to log in.
    pub wallet_address: String,
    /// The signed message; should be a nonce from `/auth/request-nonce`.
    pub signed_message: String,
    /// Hex-encoded signature over the message.
    pub signature: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize)]
pub struct CreateProposalRequest {
    pub title: String,
    pub description: String,
    /// Unix seconds when voting opens; defaults to creation time.
    pub start_timestamp: Option<u64>,
    /// Voting window in seconds; defaults to the configured duration.
    pub duration: Option<u64>,
    /// Present for token-weighted proposals.
    pub token_address: Option<String>,
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub option: VoteOption,
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// Wallet bound to the bearer credential of the request, or 401.
fn bearer_wallet(state: &AppState, headers: &HeaderMap) -> Result<WalletAddress, RpcError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(RpcError::Auth(AuthError::Unauthorized))?;
    Ok(state.sessions.authenticate(token, Timestamp::now())?)
}

fn parse_address(raw: &str) -> Result<WalletAddress, RpcError> {
    WalletAddress::parse(raw).map_err(|e| RpcError::InvalidRequest(e.to_string()))
}

// ── Handlers ─────────────────────────────────────────────────────────────

pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "OK" }))
}

pub async fn request_nonce() -> Json<NonceResponse> {
    Json(NonceResponse {
        nonce: agora_crypto::issue_nonce(),
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RpcError> {
    let wallet = parse_address(&req.wallet_address)?;
    let token = state
        .sessions
        .login(&wallet, &req.signed_message, &req.signature, Timestamp::now())?;
    Ok(Json(LoginResponse { token }))
}

pub async fn create_proposal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateProposalRequest>,
) -> Result<Json<Proposal>, RpcError> {
    let proposer = bearer_wallet(&state, &headers)?;

    let kind = match req.token_address {
        Some(raw) => ProposalKind::TokenWeighted {
            token_address: parse_address(&raw)?,
        },
        None => ProposalKind::Simple,
    };
    let draft = ProposalDraft {
        title: req.title,
        description: req.description,
        proposer,
        start_at: req.start_timestamp.map(Timestamp::new),
        duration_secs: Some(req.duration.unwrap_or(state.default_proposal_duration_secs)),
        kind,
    };

    let proposal = state.proposals.create(draft, Timestamp::now())?;
    Ok(Json(proposal))
}

pub async fn list_proposals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Proposal>>, RpcError> {
    Ok(Json(state.proposals.list(Timestamp::now())?))
}

pub async fn get_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> Result<Json<Proposal>, RpcError> {
    let id = ProposalId::new(proposal_id);
    Ok(Json(state.proposals.get(&id, Timestamp::now())?))
}

pub async fn cast_vote(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<VoteRequest>,
) -> Result<Json<Vote>, RpcError> {
    let voter = bearer_wallet(&state, &headers)?;
    let id = ProposalId::new(proposal_id);
    let vote = state.ledger.cast(&id, &voter, req.option, Timestamp::now())?;
    Ok(Json(vote))
}

pub async fn list_votes(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> Result<Json<Vec<Vote>>, RpcError> {
    let id = ProposalId::new(proposal_id);
    Ok(Json(state.ledger.list_votes(&id, Timestamp::now())?))
}

pub async fn get_results(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> Result<Json<Tally>, RpcError> {
    let id = ProposalId::new(proposal_id);
    Ok(Json(state.ledger.tally(&id, Timestamp::now())?))
}

//! End-to-end HTTP tests: login with a signed nonce, create proposals,
//! cast votes and read tallies through the router.

use agora_auth::SessionIssuer;
use agora_crypto::{address_of, generate_signing_key, sign_personal};
use agora_governance::{FixedOracle, ProposalEngine, VoteLedger, VotingPowerOracle};
use agora_rpc::{AppState, RpcServer};
use agora_store_mem::MemStore;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use k256::ecdsa::SigningKey;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with_oracle(oracle: impl VotingPowerOracle + 'static) -> Router {
    let store = Arc::new(MemStore::new());
    let sessions = SessionIssuer::new("http-test-secret", 3600, store.clone()).unwrap();
    let engine = ProposalEngine::new(store.clone());
    let ledger = VoteLedger::new(store.clone(), store, Arc::new(oracle));
    let state = AppState::new(
        Arc::new(sessions),
        Arc::new(engine),
        Arc::new(ledger),
        86_400,
    );
    RpcServer::router(state)
}

fn app() -> Router {
    app_with_oracle(FixedOracle(5.0))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Run the nonce + signed-login flow for `key`, returning the bearer token.
async fn login(app: &Router, key: &SigningKey) -> String {
    let (status, body) = send(app, post_json("/auth/request-nonce", json!({}), None)).await;
    assert_eq!(status, StatusCode::OK);
    let nonce = body["nonce"].as_str().unwrap().to_string();

    let signature = hex::encode(sign_personal(&nonce, key).unwrap());
    let (status, body) = send(
        app,
        post_json(
            "/auth/login",
            json!({
                "wallet_address": address_of(key).as_str(),
                "signed_message": nonce,
                "signature": signature,
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_proposal(app: &Router, token: &str, extra: Value) -> Value {
    let mut body = json!({
        "title": "test proposal",
        "description": "test description",
    });
    body.as_object_mut()
        .unwrap()
        .extend(extra.as_object().unwrap().clone());
    let (status, body) = send(app, post_json("/proposals", body, Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn ping_is_open() {
    let (status, body) = send(&app(), get_req("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn login_rejects_foreign_signature() {
    let app = app();
    let key = generate_signing_key();
    let other = generate_signing_key();
    let signature = hex::encode(sign_personal("some-nonce", &other).unwrap());

    let (status, _) = send(
        &app,
        post_json(
            "/auth/login",
            json!({
                "wallet_address": address_of(&key).as_str(),
                "signed_message": "some-nonce",
                "signature": signature,
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_malformed_address() {
    let (status, _) = send(
        &app(),
        post_json(
            "/auth/login",
            json!({
                "wallet_address": "not-an-address",
                "signed_message": "n",
                "signature": "00",
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn writes_require_bearer_token() {
    let app = app();
    let (status, _) = send(
        &app,
        post_json(
            "/proposals",
            json!({"title": "t", "description": "d"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        post_json(
            "/proposals",
            json!({"title": "t", "description": "d"}),
            Some("garbage-token"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn proposal_crud_and_voting_flow() {
    let app = app();
    let alice = generate_signing_key();
    let bob = generate_signing_key();
    let alice_token = login(&app, &alice).await;
    let bob_token = login(&app, &bob).await;

    let proposal = create_proposal(&app, &alice_token, json!({})).await;
    let id = proposal["id"].as_str().unwrap().to_string();
    assert_eq!(proposal["status"], "active");
    assert_eq!(proposal["kind"], "simple");
    assert_eq!(
        proposal["proposer"].as_str().unwrap().to_lowercase(),
        address_of(&alice).as_str().to_lowercase()
    );

    // Visible in list and by id without auth.
    let (status, listed) = send(&app, get_req("/proposals")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (status, fetched) = send(&app, get_req(&format!("/proposals/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());

    // Alice votes yes, Bob votes no; Alice cannot vote twice.
    let vote_uri = format!("/proposals/{id}/vote");
    let (status, vote) = send(
        &app,
        post_json(&vote_uri, json!({"option": "yes"}), Some(&alice_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(vote["weight"].is_null());

    let (status, _) = send(
        &app,
        post_json(&vote_uri, json!({"option": "no"}), Some(&alice_token)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        post_json(&vote_uri, json!({"option": "no"}), Some(&bob_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, votes) = send(&app, get_req(&format!("/proposals/{id}/votes"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(votes.as_array().unwrap().len(), 2);

    let (status, tally) = send(&app, get_req(&format!("/proposals/{id}/results"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tally["yes"], 1.0);
    assert_eq!(tally["no"], 1.0);
    assert_eq!(tally["winner"], "draw");
}

#[tokio::test]
async fn past_start_timestamp_is_rejected() {
    let app = app();
    let token = login(&app, &generate_signing_key()).await;

    let (status, _) = send(
        &app,
        post_json(
            "/proposals",
            json!({
                "title": "t",
                "description": "d",
                "start_timestamp": 1,
            }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_proposal_is_404() {
    let app = app();
    let (status, _) = send(&app, get_req("/proposals/deadbeef")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get_req("/proposals/deadbeef/results")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn weighted_proposal_tallies_oracle_weight() {
    let app = app();
    let token = login(&app, &generate_signing_key()).await;

    let proposal = create_proposal(
        &app,
        &token,
        json!({"token_address": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"}),
    )
    .await;
    assert_eq!(proposal["kind"], "token_weighted");
    let id = proposal["id"].as_str().unwrap();

    let (status, vote) = send(
        &app,
        post_json(
            &format!("/proposals/{id}/vote"),
            json!({"option": "yes"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vote["weight"], 5.0);

    let (_, tally) = send(&app, get_req(&format!("/proposals/{id}/results"))).await;
    assert_eq!(tally["yes"], 5.0);
    assert_eq!(tally["winner"], "yes");
}

#[tokio::test]
async fn zero_voting_power_is_rejected() {
    let app = app_with_oracle(FixedOracle(0.0));
    let token = login(&app, &generate_signing_key()).await;

    let proposal = create_proposal(
        &app,
        &token,
        json!({"token_address": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"}),
    )
    .await;
    let id = proposal["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        post_json(
            &format!("/proposals/{id}/vote"),
            json!({"option": "yes"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, votes) = send(&app, get_req(&format!("/proposals/{id}/votes"))).await;
    assert!(votes.as_array().unwrap().is_empty());
}

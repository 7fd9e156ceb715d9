//! End-to-end store flow over an in-memory backend.
//!
//! Exercises the full stack — store, typed interests wrapper, client
//! pipeline, envelope decoding — against a scripted transport that behaves
//! like the real server: bearer-token auth, uniqueness on the
//! `(liker, target)` pair, and the unified response envelope on every
//! route.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use cfomatch_client::{
    ApiClient, HttpTransport, InterestsClient, Method, RequestBody, SessionBridge, TransportError,
    TransportRequest, TransportResponse,
};
use cfomatch_core::{Interest, Session, TargetType};
use cfomatch_store::{InterestStore, SyncState};

const GOOD_TOKEN: &str = "tok-valid";

/// In-memory interests backend speaking the envelope contract.
struct ScriptedBackend {
    interests: Mutex<Vec<Interest>>,
}

impl ScriptedBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            interests: Mutex::new(Vec::new()),
        })
    }

    fn seed(&self, interest: Interest) {
        self.interests.lock().unwrap().push(interest);
    }

    fn count(&self) -> usize {
        self.interests.lock().unwrap().len()
    }
}

fn json_response(status: u16, body: Value) -> TransportResponse {
    TransportResponse {
        status,
        status_text: String::new(),
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

fn success(data: Value) -> TransportResponse {
    json_response(200, json!({"success": true, "data": data}))
}

fn failure(status: u16, code: &str, message: &str) -> TransportResponse {
    json_response(
        status,
        json!({"success": false, "error": {"message": message, "code": code}}),
    )
}

#[async_trait]
impl HttpTransport for ScriptedBackend {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let authorized = request
            .headers
            .iter()
            .any(|(n, v)| n.eq_ignore_ascii_case("authorization") && v == &format!("Bearer {GOOD_TOKEN}"));
        if !authorized {
            return Ok(failure(401, "UNAUTHORIZED", "Authentication required"));
        }
        assert_eq!(request.url.path(), "/api/interests");

        match request.method {
            Method::Get => {
                let interests = self.interests.lock().unwrap().clone();
                Ok(success(serde_json::to_value(interests).unwrap()))
            }
            Method::Post => {
                let body = match request.body {
                    RequestBody::Json(value) => value,
                    other => panic!("unexpected body: {other:?}"),
                };
                let target_id = body["targetUserId"].as_str().unwrap().to_string();
                let target_type = match body["targetType"].as_str().unwrap() {
                    "cfo" => TargetType::Cfo,
                    _ => TargetType::Company,
                };

                let mut interests = self.interests.lock().unwrap();
                if interests.iter().any(|i| i.target_id == target_id) {
                    return Ok(failure(409, "CONFLICT", "Interest already exists"));
                }
                let interest = Interest::new("u1", target_id, target_type);
                interests.push(interest.clone());
                Ok(success(serde_json::to_value(interest).unwrap()))
            }
            Method::Delete => {
                let target_id = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "targetUserId")
                    .map(|(_, v)| v.into_owned())
                    .unwrap();
                self.interests
                    .lock()
                    .unwrap()
                    .retain(|i| i.target_id != target_id);
                Ok(success(Value::Null))
            }
            other => panic!("unexpected method: {other}"),
        }
    }
}

fn build_stack(backend: Arc<ScriptedBackend>) -> (SessionBridge, InterestStore<InterestsClient>) {
    let bridge = SessionBridge::new();
    let client = ApiClient::builder()
        .base_url("http://test.local")
        .transport(backend)
        .session(bridge.subscribe())
        .build()
        .unwrap();
    let api = Arc::new(InterestsClient::new(Arc::new(client)));
    let store = InterestStore::new(api, bridge.subscribe());
    (bridge, store)
}

#[tokio::test]
async fn test_full_favorite_flow() {
    let backend = ScriptedBackend::new();
    let (bridge, store) = build_stack(Arc::clone(&backend));
    bridge.on_session_change(Some(Session::new("u1", GOOD_TOKEN)));

    assert!(store.ensure_loaded().await);
    assert_eq!(store.state().await, SyncState::Ready);
    assert!(store.interests().await.is_empty());

    assert!(store.add_interest("cfo-1", TargetType::Cfo).await);
    assert!(store.add_interest("co-1", TargetType::Company).await);
    assert_eq!(backend.count(), 2);

    let stats = store.stats().await;
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.cfo_count, 1);
    assert_eq!(stats.company_count, 1);

    // Toggle removes an existing favorite, server-side included.
    assert!(store.toggle_interest("cfo-1", TargetType::Cfo).await);
    assert!(!store.is_interested("cfo-1").await);
    assert_eq!(backend.count(), 1);

    // A fresh fetch agrees with the local set.
    assert!(store.refetch().await);
    let ids: Vec<_> = store
        .interests()
        .await
        .into_iter()
        .map(|i| i.target_id)
        .collect();
    assert_eq!(ids, vec!["co-1"]);
}

#[tokio::test]
async fn test_expired_token_clears_set_with_distinct_message() {
    let backend = ScriptedBackend::new();
    backend.seed(Interest::new("u1", "cfo-1", TargetType::Cfo));
    let (bridge, store) = build_stack(backend);

    bridge.on_session_change(Some(Session::new("u1", GOOD_TOKEN)));
    assert!(store.refetch().await);
    assert_eq!(store.interests().await.len(), 1);

    // The token goes stale; the backend now rejects it.
    bridge.on_session_change(Some(Session::new("u1", "tok-expired")));
    assert!(!store.refetch().await);
    assert_eq!(store.state().await, SyncState::Error);
    assert!(store.interests().await.is_empty());
    assert_eq!(
        store.error().await.as_deref(),
        Some("Session expired, please sign in again")
    );
}

#[tokio::test]
async fn test_server_side_duplicate_is_treated_as_success() {
    let backend = ScriptedBackend::new();
    backend.seed(Interest::new("u1", "cfo-1", TargetType::Cfo));
    let (bridge, store) = build_stack(Arc::clone(&backend));
    bridge.on_session_change(Some(Session::new("u1", GOOD_TOKEN)));

    // The store never fetched, so it does not know about the seeded row;
    // the server answers 409 and the store reflects membership anyway.
    assert!(store.add_interest("cfo-1", TargetType::Cfo).await);
    assert!(store.is_interested("cfo-1").await);
    assert!(store.error().await.is_none());
    assert_eq!(backend.count(), 1);
}

#[tokio::test]
async fn test_unauthenticated_store_never_reaches_backend() {
    let backend = ScriptedBackend::new();
    let (_bridge, store) = build_stack(Arc::clone(&backend));

    assert!(!store.ensure_loaded().await);
    assert!(!store.add_interest("cfo-1", TargetType::Cfo).await);
    assert_eq!(backend.count(), 0);
    assert_eq!(store.state().await, SyncState::Uninitialized);
}

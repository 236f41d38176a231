// ABOUTME: Mock fitness API fixtures for integration tests
// ABOUTME: Builds contexts against a wiremock server and mounts the session endpoints

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use gymlog_client::client::RequestClient;
use gymlog_client::config::environment::ClientConfig;
use gymlog_client::context::ClientContext;
use gymlog_client::models::{Session, TokenPair, User};
use gymlog_client::storage::SessionStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::stores::CountingStore;

pub const STALE_TOKEN: &str = "stale-access";
pub const FRESH_TOKEN: &str = "fresh-access";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const NEXT_REFRESH_TOKEN: &str = "refresh-2";

pub fn ana() -> User {
    User {
        id: "1".into(),
        name: "Ana Souza".into(),
        email: "ana@example.com".into(),
        avatar: None,
    }
}

pub fn ana_json() -> Value {
    json!({"id": 1, "name": "Ana Souza", "email": "ana@example.com", "avatar": null})
}

pub const BOB_TOKEN: &str = "bob-access";
pub const BOB_REFRESH_TOKEN: &str = "bob-refresh";

pub fn bob() -> User {
    User {
        id: "2".into(),
        name: "Bob Lima".into(),
        email: "bob@example.com".into(),
        avatar: None,
    }
}

/// `POST /sessions` signing Bob in
pub async fn mount_bob_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(body_json(json!({"email": "bob@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 2, "name": "Bob Lima", "email": "bob@example.com", "avatar": null},
            "token": BOB_TOKEN,
            "refresh_token": BOB_REFRESH_TOKEN
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub fn session_with(access_token: &str) -> Session {
    Session {
        user: ana(),
        tokens: TokenPair::new(access_token, REFRESH_TOKEN),
    }
}

/// Configuration pointing at the mock server with test-sized timeouts
pub fn test_config(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::for_api(&server.uri()).unwrap();
    config.request_timeout = Duration::from_secs(5);
    config.connect_timeout = Duration::from_secs(2);
    config.refresh_retry_backoff = Duration::from_millis(10);
    config
}

pub fn context_with(config: ClientConfig, store: Arc<dyn SessionStore>) -> ClientContext {
    ClientContext::with_store(config, store).unwrap()
}

/// Context restored from a stored session using `access_token`
pub async fn signed_in_context(
    server: &MockServer,
    access_token: &str,
) -> (ClientContext, Arc<CountingStore>) {
    signed_in_context_with(test_config(server), access_token).await
}

pub async fn signed_in_context_with(
    config: ClientConfig,
    access_token: &str,
) -> (ClientContext, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::with_session(&session_with(access_token)));
    let context = context_with(config, store.clone());
    context.session().restore().await.unwrap();
    (context, store)
}

pub fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "status": "error",
        "message": "token.expired"
    }))
}

/// `POST /sessions/refresh` answering with the fresh pair after `delay`
pub async fn mount_refresh(server: &MockServer, delay: Duration, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/sessions/refresh"))
        .and(body_json(json!({"refresh_token": REFRESH_TOKEN})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "token": FRESH_TOKEN,
                    "refresh_token": NEXT_REFRESH_TOKEN
                }))
                .set_delay(delay),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// `GET {route}`: unauthorized with the stale token, `body` with the fresh one
pub async fn mount_guarded_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", format!("Bearer {STALE_TOKEN}").as_str()))
        .respond_with(unauthorized())
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", format!("Bearer {FRESH_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn exercise_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "series": 3,
        "repetitions": 12,
        "group": "costas",
        "demo": format!("{id}.gif"),
        "thumb": format!("{id}.png"),
        "created_at": "2025-01-01 10:00:00",
        "updated_at": "2025-01-01 10:00:00"
    })
}

/// Paths of the requests the mock server received with `token`, in arrival order
pub async fn paths_sent_with(server: &MockServer, token: &str) -> Vec<String> {
    let expected = format!("Bearer {token}");
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| {
            request
                .headers
                .get("authorization")
                .is_some_and(|value| value.as_bytes() == expected.as_bytes())
        })
        .map(|request| request.url.path().to_owned())
        .collect()
}

/// Wait until `count` requests are queued behind the renewal
pub async fn wait_for_pending(client: &RequestClient, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while client.pending_replays() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("requests were not queued in time");
}

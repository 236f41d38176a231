// ABOUTME: Integration tests for AccountService flows
// ABOUTME: Covers sign-up, profile edits, avatar uploads, and their local session merges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use gymlog_client::client::AvatarUpload;
use gymlog_client::errors::{ErrorCode, ErrorKind};
use gymlog_client::models::{NewAccount, ProfileChange};
use gymlog_client::session::SessionEvent;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::fixtures::{ana_json, context_with, signed_in_context, test_config, FRESH_TOKEN};
use helpers::stores::CountingStore;

fn new_account() -> NewAccount {
    NewAccount {
        name: "Ana Souza".into(),
        email: "ana@example.com".into(),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn test_sign_up_registers_then_signs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": ana_json(),
            "token": "access-1",
            "refresh_token": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(CountingStore::new());
    let context = context_with(test_config(&server), store.clone());
    let mut events = context.session().subscribe();

    let user = context.account().sign_up(new_account()).await.unwrap();

    assert_eq!(user.name, "Ana Souza");
    assert!(matches!(events.recv().await.unwrap(), SessionEvent::Available(_)));
    assert!(store.persisted().await.is_some());

    let register = &server.received_requests().await.unwrap()[0];
    assert!(register.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_sign_up_rejected_email_is_domain_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Este e-mail já está em uso."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let context = context_with(test_config(&server), Arc::new(CountingStore::new()));

    let error = context.account().sign_up(new_account()).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Domain);
    assert_eq!(error.message, "Este e-mail já está em uso.");
    assert!(!context.session().is_authenticated().await);
}

#[tokio::test]
async fn test_invalid_sign_up_makes_no_request() {
    let server = MockServer::start().await;
    let context = context_with(test_config(&server), Arc::new(CountingStore::new()));

    let short_password = NewAccount {
        password: "12345".into(),
        ..new_account()
    };
    let error = context.account().sign_up(short_password).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_profile_sends_change_and_merges_name() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users"))
        .and(header("authorization", format!("Bearer {FRESH_TOKEN}").as_str()))
        .and(body_json(json!({
            "name": "Ana Lima",
            "password": "new-secret",
            "old_password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (context, store) = signed_in_context(&server, FRESH_TOKEN).await;
    let mut events = context.session().subscribe();

    let user = context
        .account()
        .update_profile(ProfileChange {
            name: "Ana Lima".into(),
            password: Some("new-secret".into()),
            old_password: Some("secret".into()),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Ana Lima");
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Updated(user.clone()));
    assert_eq!(store.persisted().await.unwrap().user, user);
}

#[tokio::test]
async fn test_wrong_current_password_keeps_profile() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "A senha antiga não confere."
        })))
        .mount(&server)
        .await;

    let (context, store) = signed_in_context(&server, FRESH_TOKEN).await;

    let error = context
        .account()
        .update_profile(ProfileChange {
            name: "Ana Lima".into(),
            password: Some("new-secret".into()),
            old_password: Some("wrong".into()),
        })
        .await
        .unwrap_err();

    assert_eq!(error.user_message("fallback"), "A senha antiga não confere.");
    assert_eq!(
        context.session().current_user().await.unwrap().name,
        "Ana Souza"
    );
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn test_avatar_upload_merges_avatar() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/avatar"))
        .and(header("authorization", format!("Bearer {FRESH_TOKEN}").as_str()))
        .and(body_string_contains("name=\"avatar\""))
        .and(body_string_contains("filename=\"ana souza.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Ana Souza",
            "email": "ana@example.com",
            "avatar": "7c1e-ana souza.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (context, store) = signed_in_context(&server, FRESH_TOKEN).await;

    let user = context
        .account()
        .update_avatar(AvatarUpload::for_user("Ana Souza", "png", b"png-bytes".to_vec()))
        .await
        .unwrap();

    assert_eq!(user.avatar.as_deref(), Some("7c1e-ana souza.png"));
    assert_eq!(store.persisted().await.unwrap().user, user);
    assert_eq!(
        context.account().avatar_url(&user).unwrap(),
        format!("{}/avatar/7c1e-ana%20souza.png", server.uri())
    );
}

#[tokio::test]
async fn test_account_changes_require_session() {
    let server = MockServer::start().await;
    let context = context_with(test_config(&server), Arc::new(CountingStore::new()));

    let error = context
        .account()
        .update_profile(ProfileChange {
            name: "Ana".into(),
            ..ProfileChange::default()
        })
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::NotSignedIn);

    let error = context
        .account()
        .update_avatar(AvatarUpload::new("a.png", "image/png", vec![1_u8]))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::NotSignedIn);

    assert!(server.received_requests().await.unwrap().is_empty());
}

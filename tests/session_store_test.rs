// ABOUTME: Integration tests for durable session storage
// ABOUTME: Covers the file store round trip, missing and corrupt records, and atomic replacement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use gymlog_client::errors::ErrorCode;
use gymlog_client::models::{Session, TokenPair, User};
use gymlog_client::storage::{FileSessionStore, MemorySessionStore, SessionStore};
use std::sync::Arc;

use helpers::fixtures::{session_with, FRESH_TOKEN, STALE_TOKEN};

fn sessions() -> Vec<Session> {
    vec![
        session_with(STALE_TOKEN),
        Session {
            user: User {
                id: "42".into(),
                name: "João Pé-de-Feijão".into(),
                email: "joao@example.com".into(),
                avatar: Some("f3a9c1e0-joao.png".into()),
            },
            tokens: TokenPair::new("a.b.c", "r/with+symbols="),
        },
        Session {
            user: User {
                id: String::new(),
                name: String::new(),
                email: String::new(),
                avatar: None,
            },
            tokens: TokenPair::new("", ""),
        },
    ]
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());

    for session in sessions() {
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));
    }
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    let store = MemorySessionStore::new();

    for session in sessions() {
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));
    }
    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_missing_file_means_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("not-created-yet"));

    assert_eq!(store.load().await.unwrap(), None);
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_save_creates_directory_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("app").join("data");
    let store = FileSessionStore::new(&nested);

    store.save(&session_with(STALE_TOKEN)).await.unwrap();

    let entries: Vec<String> = std::fs::read_dir(&nested)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, ["gymlog.session.json"]);
}

#[tokio::test]
async fn test_clear_removes_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());

    store.save(&session_with(STALE_TOKEN)).await.unwrap();
    store.clear().await.unwrap();

    assert!(!store.path().exists());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_record_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());
    std::fs::write(store.path(), b"{not json").unwrap();

    let error = store.load().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::StorageError);
}

#[tokio::test]
async fn test_custom_key_is_separate_record() {
    let dir = tempfile::tempdir().unwrap();
    let default_store = FileSessionStore::new(dir.path());
    let other_store = FileSessionStore::with_key(dir.path(), "gymlog.other");

    default_store.save(&session_with(STALE_TOKEN)).await.unwrap();

    assert_eq!(other_store.load().await.unwrap(), None);
    assert!(other_store.path().ends_with("gymlog.other.json"));
}

#[tokio::test]
async fn test_concurrent_saves_leave_one_complete_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path()));

    let writers = [STALE_TOKEN, FRESH_TOKEN].map(|token| {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.save(&session_with(token)).await })
    });
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let loaded = store.load().await.unwrap().unwrap();
    assert!([STALE_TOKEN, FRESH_TOKEN].contains(&loaded.tokens.access_token.as_str()));
}

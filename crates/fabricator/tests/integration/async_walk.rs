//! Integration tests for the async and callback walks.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fabricator::{Constructor, Error, Fabricator, Options, Stack};
use tempfile::TempDir;

use crate::common::{names, Fixtures, ScriptResolver};

fn fabricator() -> Fabricator<ScriptResolver> {
    Fabricator::new(ScriptResolver::new())
}

#[tokio::test]
async fn test_async_directory_walk() {
    let fx = Fixtures::new();
    let entities = fabricator()
        .fabricate_async(&Stack::location(fx.directory()))
        .await
        .expect("walk should succeed");

    assert_eq!(names(&entities), vec!["index", "other"]);
}

#[tokio::test]
async fn test_async_agrees_with_sync() {
    let fx = Fixtures::new();
    let fabricator = fabricator();
    let stack = Stack::mapping([
        ("Status", Stack::realized(Constructor::named("Status"))),
        ("plugins", Stack::location(fx.directory())),
        ("values", Stack::location(fx.join("values"))),
        ("latest", Stack::location(fx.string())),
        ("ignored", Stack::location(fx.join("sub/notes.log"))),
    ]);

    let blocking = fabricator.fabricate(&stack).unwrap();
    let concurrent = fabricator.fabricate_async(&stack).await.unwrap();

    assert_eq!(names(&concurrent), names(&blocking));
    assert_eq!(
        names(&concurrent),
        vec!["status", "index", "other", "thing", "latest"]
    );
}

#[tokio::test]
async fn test_async_relative_source() {
    let fx = Fixtures::new();
    let fabricator = fabricator().with_options(Options::new().with_source(fx.root()));

    let entities = fabricator
        .fabricate_async(&Stack::location("sub"))
        .await
        .unwrap();
    assert_eq!(entities.len(), 2);
}

#[tokio::test]
async fn test_async_missing_directory() {
    let fx = Fixtures::new();
    let err = fabricator()
        .fabricate_async(&Stack::location(fx.join("missing")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ReadDir { .. }));
}

#[tokio::test]
async fn test_callback_invoked_once_with_entities() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.js"), "class A\n").unwrap();
    fs::write(tmp.path().join("a.log"), "noise\n").unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let handle = {
        let calls = Arc::clone(&calls);
        let seen = Arc::clone(&seen);
        fabricator().fabricate_then(Stack::location(tmp.path()), move |result| {
            calls.fetch_add(1, Ordering::SeqCst);
            let entities = result.expect("walk should succeed");
            seen.lock().unwrap().extend(names(&entities));
        })
    };
    handle.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*seen.lock().unwrap(), vec!["a".to_string()]);
}

#[tokio::test]
async fn test_callback_receives_listing_error() {
    let fx = Fixtures::new();
    let (tx, rx) = tokio::sync::oneshot::channel();

    fabricator().fabricate_then(Stack::location(fx.join("missing")), move |result| {
        let _ = tx.send(result.map(|entities| entities.len()));
    });

    let result = rx.await.expect("callback should run");
    assert!(matches!(result, Err(Error::ReadDir { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_large_directory() {
    let tmp = TempDir::new().unwrap();
    for i in 0..50 {
        fs::write(tmp.path().join(format!("p{i:02}.js")), format!("class P{i}\n")).unwrap();
        fs::write(tmp.path().join(format!("p{i:02}.txt")), "skip\n").unwrap();
    }

    let entities = fabricator()
        .fabricate_async(&Stack::location(tmp.path()))
        .await
        .unwrap();

    assert_eq!(entities.len(), 50);
    let got = names(&entities);
    let mut sorted = got.clone();
    sorted.sort();
    assert_eq!(got, sorted);
}

mod common;

use chrono::Utc;
use common::TestApp;
use serde_json::Value;
use wellness_service::models::bucket;
use wellness_service::services::providers::MessageContent;
use wellness_service::services::Store;

#[tokio::test]
async fn daily_plan_generates_then_serves_from_cache() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();
    let url = format!("{}/daily-plan/alice", app.address);

    let first = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    let first_body: Value = first.json().await.expect("Failed to parse response");
    assert_eq!(first_body["source"], "api");

    let second = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), reqwest::StatusCode::OK);
    let second_body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(second_body["source"], "cache");
    assert_eq!(second_body["data"], first_body["data"]);

    // Only the first request consulted the provider
    assert_eq!(app.provider.calls().len(), 1);
}

#[tokio::test]
async fn daily_plan_prompt_references_the_user() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    client
        .get(format!("{}/daily-plan/maria", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let calls = app.provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    match &calls[0][0].content {
        MessageContent::Text(text) => {
            assert!(text.contains("maria"));
            assert!(text.contains("daily health plan"));
        }
        other => panic!("expected text content, got {:?}", other),
    }
}

#[tokio::test]
async fn weekly_summary_is_cached_under_the_weekly_bucket() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/weekly-summary/bob", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["source"], "api");

    let now = Utc::now();
    let cached = app
        .store
        .get_cached("bob", &bucket::weekly_key(now))
        .await
        .expect("store error")
        .expect("weekly entry missing");
    assert_eq!(cached.payload, body["data"].as_str().expect("data missing"));

    // The daily bucket for the same user stays untouched
    assert!(app
        .store
        .get_cached("bob", &bucket::daily_key(now))
        .await
        .expect("store error")
        .is_none());
}

#[tokio::test]
async fn plans_are_cached_per_user() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let alice: Value = client
        .get(format!("{}/daily-plan/alice", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let bob: Value = client
        .get(format!("{}/daily-plan/bob", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    // Bob's first request is a miss even though Alice already has an entry
    assert_eq!(alice["source"], "api");
    assert_eq!(bob["source"], "api");
    assert_eq!(app.provider.calls().len(), 2);
}

#[tokio::test]
async fn daily_plan_still_returns_generated_text_when_cache_write_fails() {
    let app = TestApp::spawn_failing_writes().await;
    let client = reqwest::Client::new();
    let url = format!("{}/daily-plan/frank", app.address);

    let first = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    let first_body: Value = first.json().await.expect("Failed to parse response");
    assert_eq!(first_body["source"], "api");
    assert!(!first_body["data"].as_str().expect("data missing").is_empty());

    // The write-back failed, so nothing landed in the store and the next
    // request generates again instead of hitting the cache
    assert!(app
        .store
        .get_cached("frank", &bucket::daily_key(Utc::now()))
        .await
        .expect("store error")
        .is_none());

    let second = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), reqwest::StatusCode::OK);
    let second_body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(second_body["source"], "api");
    assert_eq!(app.provider.calls().len(), 2);
}

#[tokio::test]
async fn daily_plan_failure_returns_500_and_caches_nothing() {
    let app = TestApp::spawn_failing().await;
    let client = reqwest::Client::new();
    let url = format!("{}/daily-plan/carol", app.address);

    let first = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = first.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Failed to generate daily plan");

    let second = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    // Both requests were misses that reached the provider; nothing was cached
    assert_eq!(app.provider.calls().len(), 2);
    assert!(app
        .store
        .get_cached("carol", &bucket::daily_key(Utc::now()))
        .await
        .expect("store error")
        .is_none());
}

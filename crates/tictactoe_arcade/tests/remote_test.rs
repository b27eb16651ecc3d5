//! Tests for the HTTP rating client and the leaderboard fallback logic,
//! against an in-process axum server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use tictactoe_arcade::{
    HttpRatingService, LeaderboardService, MatchRecord, MemoryStore, RatingService, RatingSource,
    RecordStore, StorageError,
};
use tictactoe_engine::Outcome;

type Shared = Arc<Mutex<Vec<MatchRecord>>>;

const TIMEOUT: Duration = Duration::from_secs(5);

struct FailingStore;

impl RecordStore for FailingStore {
    fn save(&self, _record: &MatchRecord) -> Result<(), StorageError> {
        Err(StorageError::new("Disk full"))
    }

    fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        Err(StorageError::new("Disk unreadable"))
    }
}

fn record(name: &str, winner: Outcome, second: u32) -> MatchRecord {
    let played_at = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, second)
        .single()
        .expect("Valid timestamp");
    MatchRecord::new(name, 10, winner, played_at)
}

async fn list(State(records): State<Shared>) -> Json<Vec<MatchRecord>> {
    Json(records.lock().expect("Lock poisoned").clone())
}

async fn add(State(records): State<Shared>, Json(record): Json<MatchRecord>) -> StatusCode {
    records.lock().expect("Lock poisoned").push(record);
    StatusCode::CREATED
}

/// Serves `app` on an ephemeral port and returns the rating endpoint URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    format!("http://{}/tic-tac-toe", addr)
}

async fn rating_server(initial: Vec<MatchRecord>) -> (String, Shared) {
    let records: Shared = Arc::new(Mutex::new(initial));
    let app = Router::new()
        .route("/tic-tac-toe", get(list).post(add))
        .with_state(records.clone());
    (serve(app).await, records)
}

async fn broken_server() -> String {
    let app = Router::new().route(
        "/tic-tac-toe",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
            .post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    serve(app).await
}

/// URL of a port nothing is listening on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}/tic-tac-toe", addr)
}

fn client(url: String) -> Arc<HttpRatingService> {
    Arc::new(HttpRatingService::new(url, TIMEOUT).expect("Failed to build client"))
}

#[tokio::test]
async fn test_submit_then_fetch() {
    let (url, received) = rating_server(Vec::new()).await;
    let service = client(url.clone());
    assert_eq!(service.url(), url);

    let first = record("Ann", Outcome::Human, 0);
    let second = record("", Outcome::Draw, 1);
    service.submit(&first).await.expect("Submit failed");
    service.submit(&second).await.expect("Submit failed");
    assert_eq!(received.lock().expect("Lock poisoned").len(), 2);

    let records = service.fetch().await.expect("Fetch failed");
    assert_eq!(records, vec![first, second]);
    assert_eq!(records[1].name(), "Guest");
}

#[tokio::test]
async fn test_fetched_blank_names_become_guest() {
    let body = serde_json::json!([
        {
            "id": "first",
            "name": "",
            "durationSeconds": 4,
            "winner": "human",
            "date": "2025-06-01T12:00:00Z",
        },
        {
            "id": "second",
            "name": "   ",
            "durationSeconds": 6,
            "winner": "opponent",
            "date": "2025-06-01T12:01:00Z",
        },
    ]);
    let app = Router::new().route("/tic-tac-toe", get(move || async move { Json(body) }));
    let url = serve(app).await;

    let records = client(url.clone()).fetch().await.expect("Fetch failed");
    assert!(records.iter().all(|r| r.name() == "Guest"));

    let service = LeaderboardService::new(Arc::new(MemoryStore::new())).with_remote(client(url));
    let view = service.leaderboard().await;
    assert_eq!(*view.source(), RatingSource::Remote);
    assert_eq!(view.entries().len(), 1);
    assert_eq!(view.entries()[0].name(), "Guest");
    assert_eq!(*view.entries()[0].games(), 2);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let service = client(broken_server().await);

    let fetch = service.fetch().await.expect_err("Fetch should fail");
    assert_eq!(fetch.status, Some(500));

    let submit = service
        .submit(&record("Ann", Outcome::Human, 0))
        .await
        .expect_err("Submit should fail");
    assert_eq!(submit.status, Some(503));
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let app = Router::new().route("/tic-tac-toe", get(|| async { "not json" }));
    let service = client(serve(app).await);

    let err = service.fetch().await.expect_err("Fetch should fail");
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_unreachable_service_is_an_error() {
    let service = client(dead_url().await);
    let err = service.fetch().await.expect_err("Fetch should fail");
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_leaderboard_prefers_remote() {
    let (url, _records) = rating_server(vec![
        record("Remote", Outcome::Human, 0),
        record("Remote", Outcome::Opponent, 1),
    ])
    .await;
    let store = Arc::new(MemoryStore::new());
    store
        .save(&record("Local", Outcome::Human, 2))
        .expect("Save failed");

    let service = LeaderboardService::new(store).with_remote(client(url));
    let view = service.leaderboard().await;

    assert_eq!(*view.source(), RatingSource::Remote);
    assert!(view.remote_error().is_none());
    assert_eq!(view.entries().len(), 1);
    assert_eq!(view.entries()[0].name(), "Remote");
    assert_eq!(*view.entries()[0].ratio(), 0.5);
}

#[tokio::test]
async fn test_leaderboard_falls_back_to_local() {
    let store = Arc::new(MemoryStore::new());
    store
        .save(&record("Local", Outcome::Human, 0))
        .expect("Save failed");

    for remote in [client(broken_server().await), client(dead_url().await)] {
        let service = LeaderboardService::new(store.clone()).with_remote(remote);
        let view = service.leaderboard().await;

        assert_eq!(*view.source(), RatingSource::Local);
        assert!(view.remote_error().is_some());
        assert!(view.storage_error().is_none());
        assert_eq!(view.entries().len(), 1);
        assert_eq!(view.entries()[0].name(), "Local");
    }
}

#[tokio::test]
async fn test_leaderboard_without_remote_is_local() {
    let store = Arc::new(MemoryStore::new());
    store
        .save(&record("Ann", Outcome::Human, 0))
        .expect("Save failed");
    let service = LeaderboardService::new(store);
    assert!(!service.has_remote());

    let view = service.leaderboard().await;
    assert_eq!(*view.source(), RatingSource::Local);
    assert!(view.remote_error().is_none());
    assert_eq!(view.entries().len(), 1);

    let published = service.publish(&record("Ann", Outcome::Draw, 1)).await;
    assert_eq!(published, None);
}

#[tokio::test]
async fn test_everything_failing_gives_empty_leaderboard() {
    let service =
        LeaderboardService::new(Arc::new(FailingStore)).with_remote(client(broken_server().await));
    let view = service.leaderboard().await;

    assert!(view.entries().is_empty());
    assert_eq!(*view.source(), RatingSource::Local);
    assert!(view.remote_error().is_some());
    assert!(view.storage_error().is_some());

    let stats = service.player_stats("Ann").await;
    assert_eq!(*stats.games(), 0);
}

#[tokio::test]
async fn test_publish_reports_status() {
    let (url, received) = rating_server(Vec::new()).await;
    let service = LeaderboardService::new(Arc::new(MemoryStore::new())).with_remote(client(url));
    let game = record("Ann", Outcome::Human, 0);

    let status = service.publish(&game).await.expect("Remote is configured");
    assert!(status.ok);
    assert_eq!(*received.lock().expect("Lock poisoned"), vec![game.clone()]);

    let failing = LeaderboardService::new(Arc::new(MemoryStore::new()))
        .with_remote(client(broken_server().await));
    let status = failing.publish(&game).await.expect("Remote is configured");
    assert!(!status.ok);
    assert!(status.error.is_some());
}

#[tokio::test]
async fn test_player_stats_use_local_records() {
    let store = Arc::new(MemoryStore::new());
    for (second, winner) in [(0, Outcome::Human), (1, Outcome::Opponent), (2, Outcome::Human)] {
        store
            .save(&record("Ann", winner, second))
            .expect("Save failed");
    }
    let service = LeaderboardService::new(store);

    let stats = service.player_stats("Ann").await;
    assert_eq!(*stats.wins(), 2);
    assert_eq!(*stats.losses(), 1);
    assert_eq!(*stats.total_duration(), 30);
}

// tests/http_clients.rs
// Live reqwest clients against an in-process axum server.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use homework_status_bot::notify::TelegramSink;
use homework_status_bot::review::PracticumClient;
use homework_status_bot::{BotError, CycleOutcome, HomeworkSource, LoopState, MessageSink, Poller};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn statuses(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().push(json!({
        "auth": headers.get("authorization").and_then(|v| v.to_str().ok()),
        "from_date": q.get("from_date"),
    }));
    Json(json!({
        "homeworks": [{"homework_name": "proj1", "status": "approved"}],
        "current_date": 1_700_000_100
    }))
}

async fn send_message(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body);
    Json(json!({"ok": true, "result": {"message_id": 1}}))
}

fn client(base: &str) -> PracticumClient {
    PracticumClient::new(format!("{base}/statuses/"), "y0_secret", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetch_sends_oauth_header_and_from_date() {
    let seen = Seen::default();
    let base = spawn(
        Router::new()
            .route("/statuses/", get(statuses))
            .with_state(seen.clone()),
    )
    .await;

    let body = client(&base).fetch(1_700_000_000).await.unwrap();
    assert_eq!(body["current_date"], json!(1_700_000_100));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["auth"], json!("OAuth y0_secret"));
    assert_eq!(seen[0]["from_date"], json!("1700000000"));
}

#[tokio::test]
async fn non_200_is_remote_status_error() {
    let base = spawn(Router::new().route(
        "/statuses/",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    ))
    .await;

    let err = client(&base).fetch(0).await.unwrap_err();
    assert_eq!(
        err,
        BotError::RemoteStatus {
            status: 503,
            body: "maintenance".into()
        }
    );
}

#[tokio::test]
async fn non_json_body_is_shape_error() {
    let base = spawn(Router::new().route("/statuses/", get(|| async { "<html>oops</html>" }))).await;
    let err = client(&base).fetch(0).await.unwrap_err();
    assert!(matches!(err, BotError::Shape(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}")).fetch(42).await.unwrap_err();
    match err {
        BotError::Transport {
            endpoint,
            from_date,
            ..
        } => {
            assert!(endpoint.ends_with("/statuses/"));
            assert_eq!(from_date, 42);
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn telegram_send_posts_chat_id_and_text() {
    let seen = Seen::default();
    let base = spawn(
        Router::new()
            .route("/botTESTTOKEN/sendMessage", post(send_message))
            .with_state(seen.clone()),
    )
    .await;

    let sink = TelegramSink::new(&base, "TESTTOKEN", "4242");
    sink.send("привет").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], json!({"chat_id": "4242", "text": "привет"}));
}

#[tokio::test]
async fn telegram_rejection_is_delivery_error() {
    let base = spawn(Router::new().route(
        "/botTESTTOKEN/sendMessage",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"})),
            )
        }),
    ))
    .await;

    let err = TelegramSink::new(&base, "TESTTOKEN", "1")
        .send("x")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BotError::Delivery("HTTP 400: Bad Request: chat not found".into())
    );
}

#[tokio::test]
async fn live_clients_complete_a_cycle() {
    let api_seen = Seen::default();
    let api = spawn(
        Router::new()
            .route("/statuses/", get(statuses))
            .with_state(api_seen.clone()),
    )
    .await;
    let tg_seen = Seen::default();
    let tg = spawn(
        Router::new()
            .route("/botTESTTOKEN/sendMessage", post(send_message))
            .with_state(tg_seen.clone()),
    )
    .await;

    let mut poller = Poller::new(
        client(&api),
        TelegramSink::new(&tg, "TESTTOKEN", "4242"),
        Duration::from_secs(600),
    );
    let (state, outcome) = poller.poll_once(LoopState::starting_at(1_700_000_000)).await;

    assert_eq!(outcome, CycleOutcome::Sent);
    assert_eq!(state.cursor, 1_700_000_100);
    let sent = tg_seen.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let text = sent[0]["text"].as_str().unwrap();
    assert!(text.contains("proj1"));
    assert!(text.contains("Ура!"));
}

use super::support::{test_config, RecordingRenderer};
use assert_matches::assert_matches;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use starkvideo::{
    error::{GenerationError, TransportError},
    models::generation::{GenerationRequest, SubmitPayload, SubmitResponse, VideoStyle},
    services::{GenerationController, HttpJobSubmitter, JobSubmitter},
    store::{LocalStore, MemoryStore},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(HeaderMap, Value)>>>);

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/generate", addr)
}

fn submitter_for(endpoint: &str) -> HttpJobSubmitter {
    let mut config = test_config().generation;
    config.endpoint_url = endpoint.to_string();
    HttpJobSubmitter::new(&config).unwrap()
}

fn payload() -> SubmitPayload {
    SubmitPayload::from(&GenerationRequest {
        prompt: "A panda eating bamboo".to_string(),
        style: VideoStyle::Anime,
        length_seconds: 5,
        aspect_ratio: "16:9".to_string(),
    })
}

async fn accept(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    seen.0.lock().unwrap().push((headers, body));
    Json(json!({
        "success": true,
        "job_id": "abc123",
        "queue_id": "q-42",
        "position": 3,
    }))
}

#[tokio::test]
async fn posts_json_with_expected_headers() {
    let seen = Seen::default();
    let router = Router::new()
        .route("/generate", post(accept))
        .with_state(seen.clone());
    let endpoint = spawn_server(router).await;

    let response = submitter_for(&endpoint).submit(&payload()).await.unwrap();

    match response {
        SubmitResponse::Accepted { job_id, metadata } => {
            assert_eq!(job_id, "abc123");
            assert_eq!(metadata.get("queue_id"), Some(&json!("q-42")));
        }
        other => panic!("unexpected response: {:?}", other),
    }

    let requests = seen.0.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (headers, body) = &requests[0];
    assert_eq!(
        body,
        &json!({
            "prompt": "A panda eating bamboo",
            "style": "anime",
            "length": 5,
            "aspect_ratio": "16:9",
        })
    );
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers["x-client-name"], "starkvideo-tests");
    assert_eq!(headers["x-client-version"], "0.1.0");
}

#[tokio::test]
async fn logical_failure_is_a_rejection() {
    let router = Router::new().route(
        "/generate",
        post(|| async { Json(json!({"success": false, "error": "Daily limit reached"})) }),
    );
    let endpoint = spawn_server(router).await;

    let response = submitter_for(&endpoint).submit(&payload()).await.unwrap();
    assert_eq!(
        response,
        SubmitResponse::Rejected {
            message: Some("Daily limit reached".to_string())
        }
    );
}

#[tokio::test]
async fn non_success_status_carries_body_as_detail() {
    let router = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "queue unavailable").into_response() }),
    );
    let endpoint = spawn_server(router).await;

    let err = submitter_for(&endpoint).submit(&payload()).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 503,
            detail: "queue unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let router = Router::new().route("/generate", post(|| async { "<html>oops</html>" }));
    let endpoint = spawn_server(router).await;

    let err = submitter_for(&endpoint).submit(&payload()).await.unwrap_err();
    assert_matches!(err, TransportError::Malformed(_));
}

#[tokio::test]
async fn success_without_job_id_is_malformed() {
    let router = Router::new().route(
        "/generate",
        post(|| async { Json(json!({"success": true, "queue_id": "q-1"})) }),
    );
    let endpoint = spawn_server(router).await;

    let err = submitter_for(&endpoint).submit(&payload()).await.unwrap_err();
    assert_matches!(err, TransportError::Malformed(_));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    // Bind and immediately release a port so nothing is listening on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = submitter_for(&format!("http://{}/generate", addr))
        .submit(&payload())
        .await
        .unwrap_err();
    assert_matches!(err, TransportError::Network(_));
}

#[tokio::test]
async fn controller_times_out_slow_endpoint() {
    let router = Router::new().route(
        "/generate",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"success": true, "job_id": "late"}))
        }),
    );
    let endpoint = spawn_server(router).await;

    let mut config = test_config();
    config.generation.endpoint_url = endpoint;
    config.generation.request_timeout_ms = 200;
    let store = Arc::new(MemoryStore::new(50));
    let controller = GenerationController::new(
        &config,
        Arc::new(HttpJobSubmitter::new(&config.generation).unwrap()),
        Arc::new(RecordingRenderer::default()),
        store.clone(),
    );

    let err = controller
        .submit(GenerationRequest::new("A panda eating bamboo"))
        .await
        .unwrap_err();

    assert_matches!(err, GenerationError::Timeout(_));
    assert!(!controller.is_generating());
    assert_eq!(store.load_history().await.unwrap()[0].job_id, None);
}

#[tokio::test]
async fn controller_round_trip_over_http() {
    let seen = Seen::default();
    let router = Router::new()
        .route("/generate", post(accept))
        .with_state(seen.clone());
    let endpoint = spawn_server(router).await;

    let mut config = test_config();
    config.generation.endpoint_url = endpoint;
    let renderer = Arc::new(RecordingRenderer::default());
    let controller = GenerationController::new(
        &config,
        Arc::new(HttpJobSubmitter::new(&config.generation).unwrap()),
        renderer.clone(),
        Arc::new(MemoryStore::new(50)),
    );

    let mut request = GenerationRequest::new("  Sunset beach with seagulls  ");
    request.style = VideoStyle::Cinematic;
    let job = controller.submit(request).await.unwrap();

    assert_eq!(job.job_id, "abc123");
    assert_eq!(job.preview_url, VideoStyle::Cinematic.preview_url());
    assert_eq!(renderer.successes()[0].style, "Cinematic");
    assert_eq!(seen.0.lock().unwrap()[0].1["prompt"], "Sunset beach with seagulls");
}

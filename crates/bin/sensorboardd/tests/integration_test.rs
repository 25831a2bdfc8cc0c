//! End-to-end smoke tests for the full sensorboardd stack.
//!
//! Each test starts a fake readings backend on a loopback port, wires the
//! real reqwest clients, services and axum router against it, and exercises
//! the HTTP layer via `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use http_body_util::BodyExt;
use sensorboard_adapter_http_axum::{AppState, DashboardSettings, router};
use sensorboard_adapter_http_reqwest::{FeedConfig, HttpFeedClient, SseClient, StreamConfig};
use sensorboard_app::aggregator::DuplicatePolicy;
use sensorboard_app::event_bus::InProcessEventBus;
use sensorboard_app::services::dashboard_service::DashboardService;
use sensorboard_app::services::live_service::LiveService;
use sensorboard_app::services::poller::IntervalPoller;
use sensorboard_app::services::stream_forwarder::StreamForwarder;
use sensorboard_domain::event::{DashboardEvent, PollTarget};
use tower::ServiceExt;

type Bus = Arc<InProcessEventBus>;

struct Stack {
    bus: Bus,
    live: Arc<LiveService<Bus>>,
    dashboard: Arc<DashboardService<Bus>>,
    poller: IntervalPoller<HttpFeedClient, Bus>,
}

impl Stack {
    fn new(base_url: &str) -> Self {
        let bus = Arc::new(InProcessEventBus::new(64));
        let live = Arc::new(LiveService::new(DuplicatePolicy::AcceptAll, Arc::clone(&bus)));
        let dashboard = Arc::new(DashboardService::new(Arc::clone(&bus)));
        let feed_config = FeedConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..FeedConfig::default()
        };
        let poller = IntervalPoller::new(
            HttpFeedClient::new(&feed_config).unwrap(),
            Arc::clone(&dashboard),
            feed_config.schedule(),
        );
        Self {
            bus,
            live,
            dashboard,
            poller,
        }
    }

    fn app(&self) -> Router {
        router::build(AppState::new(
            Arc::clone(&self.live),
            Arc::clone(&self.dashboard),
            Arc::clone(&self.bus),
            DashboardSettings::default(),
        ))
    }
}

/// Serve canned backend responses and return the base URL.
async fn fake_backend() -> String {
    let backend = Router::new()
        .route(
            "/api/latest-readings/",
            get(|| async {
                r#"{"results":[{"sensor":3,"name":"North bed","humidity_pct":"48.5","tilt":0,"vibration":0,"recorded_at":"2024-01-01T10:02:00Z"}]}"#
            }),
        )
        .route(
            "/api/history/",
            get(|| async {
                r#"{"results":[
                    {"recorded_at":"2024-01-01T10:02:00Z","humidity_pct":48.5,"tilt":0,"vibration":0},
                    {"recorded_at":"2024-01-01T10:01:00Z","humidity_pct":47,"tilt":1,"vibration":0},
                    {"recorded_at":"2024-01-01T10:00:00Z","humidity_pct":46,"tilt":0,"vibration":1}
                ]}"#
            }),
        )
        .route(
            "/realtime-redis/",
            get(|| async {
                r#"{"total_readings":30,"humidity_avg":47.2,"inclination_events":1,"hit_events":2,"last_timestamp":"2024-01-01 10:02:00","last_seq":30}"#
            }),
        )
        .route(
            "/api/realtime/",
            get(|| async {
                r#"{"humidity":48.5,"inclination":0,"vibration":0,"timestamp":"2024-01-01T10:02:00Z","stats":{"avg_humidity_today":47.2,"alert_percentage_today":10}}"#
            }),
        )
        .route(
            "/api/historical/",
            get(|| async {
                r#"{"data":[{"timestamp":"2024-01-01T09:00:00Z","humidity":45},{"timestamp":"2024-01-01T10:00:00Z","humidity":46}]}"#
            }),
        )
        .route(
            "/stream/",
            get(|| async {
                (
                    [(CONTENT_TYPE, "text/event-stream")],
                    "data: {\"ts\":\"2024-01-01 10:00:00\",\"seq\":1,\"samples\":[{\"soil\":{\"pct\":50},\"tilt\":0,\"vib\":{\"hit\":1}},{\"soil\":{\"pct\":70},\"tilt\":1,\"vib\":{\"hit\":0}}]}\n\n",
                )
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_body(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// ---------------------------------------------------------------------------
// Interval polling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_expose_polled_readings() {
    let stack = Stack::new(&fake_backend().await);
    for target in PollTarget::ALL {
        stack.poller.poll_once(target).await.unwrap();
    }

    let (status, json) = get_json(stack.app(), "/api/readings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["poll_status"], "connected");
    assert_eq!(json["results"][0]["sensor"], "3");
    assert_eq!(json["results"][0]["humidity_pct"], 48.5);
}

#[tokio::test]
async fn should_fall_back_to_remote_summary_without_stream() {
    let stack = Stack::new(&fake_backend().await);
    stack
        .poller
        .poll_once(PollTarget::RealtimeSummary)
        .await
        .unwrap();

    let (status, json) = get_json(stack.app(), "/api/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "remote");
    assert_eq!(json["total_samples"], 30);
    assert_eq!(json["hit_events"], 2);
}

#[tokio::test]
async fn should_chart_polled_history() {
    let stack = Stack::new(&fake_backend().await);
    stack
        .poller
        .poll_once(PollTarget::LatestReadings)
        .await
        .unwrap();

    let (status, svg) = get_body(stack.app(), "/charts/sensors/3/humidity").await;
    assert_eq!(status, StatusCode::OK);
    assert!(svg.contains("<polyline"));
    assert_eq!(svg.matches("<circle").count(), 3);

    let (_, svg) = get_body(stack.app(), "/charts/sensors/3/vibration").await;
    assert!(svg.contains("<rect"));
}

#[tokio::test]
async fn should_render_dashboard_page_from_polled_state() {
    let stack = Stack::new(&fake_backend().await);
    for target in PollTarget::ALL {
        stack.poller.poll_once(target).await.unwrap();
    }

    let (status, html) = get_body(stack.app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("North bed"));
    assert!(html.contains("48.5"));
    assert!(html.contains("/charts/sensors/3/tilt"));
}

#[tokio::test]
async fn should_keep_serving_when_backend_is_down() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let stack = Stack::new(&format!("http://{addr}"));

    assert!(
        stack
            .poller
            .poll_once(PollTarget::LatestReadings)
            .await
            .is_err()
    );

    let (status, json) = get_json(stack.app(), "/api/readings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "no_data");
    assert_eq!(json["poll_status"], "error");
}

// ---------------------------------------------------------------------------
// Push stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_aggregate_streamed_batches() {
    let base_url = fake_backend().await;
    let stack = Stack::new(&base_url);
    let mut events = stack.bus.subscribe();

    let client = SseClient::new(&StreamConfig {
        url: format!("{base_url}/stream/"),
        retry_ms: 60_000,
        ..StreamConfig::default()
    })
    .unwrap();
    let (rx, client_task) = client.spawn(8);
    let forwarder_task =
        StreamForwarder::new(Arc::clone(&stack.live), Arc::clone(&stack.dashboard)).spawn(rx);

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(DashboardEvent::SummaryUpdated { .. }) = events.recv().await {
                break;
            }
        }
    })
    .await
    .expect("summary should be updated from the stream");

    let (status, json) = get_json(stack.app(), "/api/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "live");
    assert_eq!(json["total_samples"], 2);
    assert_eq!(json["avg_humidity"], 60.0);
    assert_eq!(json["tilt_events"], 1);
    assert_eq!(json["hit_events"], 1);
    assert_eq!(json["last_sequence_number"], 1);

    client_task.abort();
    forwarder_task.abort();
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let stack = Stack::new("http://127.0.0.1:1/");

    let (status, body) = get_body(stack.app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

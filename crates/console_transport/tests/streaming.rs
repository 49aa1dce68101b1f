use std::sync::{Arc, Mutex};
use std::time::Duration;

use console_transport::{
    BackendClient, DropBehavior, EventSink, Job, StartRequest, StreamPolicy, StreamingTransport,
    Transport, TransportEvent, WireOutcome,
};
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<TransportEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<TransportEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, _job: Job, event: TransportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Serves one WebSocket connection: reads the start frame, sends `frames`,
/// then closes. Returns the base HTTP URL to hand to the client.
async fn spawn_server(frames: Vec<serde_json::Value>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream).await.expect("handshake");

        let first = ws.next().await.expect("start frame").expect("read");
        let params: serde_json::Value =
            serde_json::from_str(first.to_text().expect("text")).expect("json start frame");
        assert!(params.is_object());

        for frame in frames {
            ws.send(Message::Text(frame.to_string().into()))
                .await
                .expect("send frame");
        }
        let _ = ws.close(None).await;
    });

    format!("http://{addr}")
}

fn pipeline_params() -> StartRequest {
    StartRequest::Pipeline {
        country: Some("Nigeria".to_string()),
        city: Some("Lagos".to_string()),
        niche: None,
        send_emails: true,
    }
}

#[tokio::test]
async fn forwards_tagged_frames_in_order_until_result() {
    let base = spawn_server(vec![
        serde_json::json!({"type": "status", "status": "running", "message": "Pipeline starting…"}),
        serde_json::json!({"type": "log", "ts": "10:00:00", "level": "INFO", "message": "Scraping: Lagos restaurants"}),
        serde_json::json!({"type": "log", "ts": "10:00:05", "level": "ERROR", "message": "page timed out"}),
        serde_json::json!({"type": "result", "status": "completed", "data": {"scraped": 12, "qualified": 3}}),
    ])
    .await;

    let client = BackendClient::new(base).expect("client");
    let transport = StreamingTransport::new(client, StreamPolicy::default());
    let sink = TestSink::new();

    transport
        .run(
            Job::Pipeline,
            pipeline_params(),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .expect("run ok");

    let events = sink.take();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        TransportEvent::Status {
            message: "Pipeline starting…".to_string()
        }
    );
    match &events[1] {
        TransportEvent::Log(entry) => {
            assert_eq!(entry.message, "Scraping: Lagos restaurants");
            assert_eq!(entry.level, "INFO");
        }
        other => panic!("expected log, got {other:?}"),
    }
    match events.last().unwrap() {
        TransportEvent::Result(result) => {
            assert_eq!(result.status, WireOutcome::Completed);
            assert_eq!(result.counts().scraped, 12);
            assert_eq!(result.counts().qualified, 3);
        }
        other => panic!("expected result, got {other:?}"),
    }
}

#[tokio::test]
async fn drop_without_result_emits_closed_and_no_synthesized_outcome() {
    let base = spawn_server(vec![serde_json::json!({
        "type": "log", "ts": "", "level": "INFO", "message": "partial"
    })])
    .await;

    let client = BackendClient::new(base).expect("client");
    let transport = StreamingTransport::new(client, StreamPolicy::default());
    let sink = TestSink::new();

    let err = transport
        .run(
            Job::Pipeline,
            pipeline_params(),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .expect_err("channel dropped");
    assert!(err.to_string().contains("websocket"));

    let events = sink.take();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], TransportEvent::Log(_)));
    assert_eq!(events[1], TransportEvent::Closed);
}

#[tokio::test]
async fn drop_with_fail_policy_synthesizes_an_error_result() {
    let base = spawn_server(Vec::new()).await;

    let client = BackendClient::new(base).expect("client");
    let transport = StreamingTransport::new(
        client,
        StreamPolicy {
            on_drop: DropBehavior::Fail,
        },
    );
    let sink = TestSink::new();

    transport
        .run(
            Job::Email,
            StartRequest::Email { sheet_tab: None },
            &sink,
            &CancellationToken::new(),
        )
        .await
        .expect_err("channel dropped");

    let events = sink.take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        TransportEvent::Result(result) => {
            assert_eq!(result.status, WireOutcome::Error);
            assert!(result.message.contains("connection lost"));
        }
        other => panic!("expected error result, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_frames_are_skipped_without_ending_the_stream() {
    let base = spawn_server(vec![
        serde_json::json!({"type": "mystery", "payload": 42}),
        serde_json::json!({"type": "result", "status": "cancelled"}),
    ])
    .await;

    let client = BackendClient::new(base).expect("client");
    let transport = StreamingTransport::new(client, StreamPolicy::default());
    let sink = TestSink::new();

    transport
        .run(
            Job::Pipeline,
            pipeline_params(),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .expect("run ok");

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        TransportEvent::Result(result) if result.status == WireOutcome::Cancelled
    ));
}

#[tokio::test]
async fn connect_failure_emits_drop_event() {
    // Nothing listens on this port.
    let client = BackendClient::new("http://127.0.0.1:1").expect("client");
    let transport = StreamingTransport::new(client, StreamPolicy::default());
    let sink = TestSink::new();

    let result = tokio::time::timeout(
        Duration::from_secs(30),
        transport.run(
            Job::Pipeline,
            pipeline_params(),
            &sink,
            &CancellationToken::new(),
        ),
    )
    .await
    .expect("prompt failure");
    assert!(result.is_err());
    assert_eq!(sink.take(), vec![TransportEvent::Closed]);
}

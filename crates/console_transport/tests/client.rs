use console_transport::{BackendClient, Job, StartRequest, WireOutcome, WireResult};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn config_round_trip_preserves_country_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "countries": {
                "Nigeria": {"cities": ["Lagos", "Abuja"]},
                "UK": {"cities": ["Leeds"]},
                "Australia": {"cities": []}
            },
            "niches": ["restaurants", "dentists"],
            "niche_priority": ["dentists"]
        })))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client");
    let config = client.fetch_config().await.expect("config");

    let entries = config.country_entries();
    assert_eq!(
        entries,
        vec![
            (
                "Nigeria".to_string(),
                vec!["Lagos".to_string(), "Abuja".to_string()]
            ),
            ("UK".to_string(), vec!["Leeds".to_string()]),
            ("Australia".to_string(), Vec::new()),
        ]
    );
    assert_eq!(config.niche_priority, vec!["dentists".to_string()]);
}

#[tokio::test]
async fn start_request_sends_only_populated_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/start/pipeline"))
        .and(body_json(serde_json::json!({
            "city": "Lagos",
            "country": "Nigeria",
            "send_emails": false
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"started": true})),
        )
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client");
    let ack = client
        .start_job(
            Job::Pipeline,
            &StartRequest::Pipeline {
                country: Some("Nigeria".to_string()),
                city: Some("Lagos".to_string()),
                niche: None,
                send_emails: false,
            },
        )
        .await
        .expect("ack");

    assert!(ack.started);
    assert!(ack.error.is_none());
}

#[tokio::test]
async fn sheets_listing_carries_backend_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sheets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sheets": [],
            "error": "credentials missing"
        })))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client");
    let listing = client.list_sheets().await.expect("listing");
    assert!(listing.sheets.is_empty());
    assert_eq!(listing.error.as_deref(), Some("credentials missing"));
}

#[tokio::test]
async fn stats_rows_parse_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stats": [
                {"tab": "Aug 30", "total": 20, "emailed": 5, "pending": 15},
                {"tab": "Aug 29"}
            ]
        })))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client");
    let stats = client.fetch_all_stats().await.expect("stats");
    assert_eq!(stats.stats.len(), 2);
    assert_eq!(stats.stats[0].pending, 15);
    // Malformed row degrades to zeroes, not a parse failure.
    assert_eq!(stats.stats[1].total, 0);
}

#[tokio::test]
async fn tab_status_comes_back_as_opaque_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tab": "leads",
            "rows": [{"business": "Acme Dental", "emailed": true}]
        })))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client");
    let status = client.fetch_tab_status("leads").await.expect("status");
    assert_eq!(status["rows"][0]["business"], "Acme Dental");
}

#[tokio::test]
async fn stop_request_ignores_the_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stop/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stopping": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client");
    client.stop_job(Job::Email).await.expect("stop");
}

#[test]
fn ws_url_swaps_scheme_and_appends_channel() {
    let client = BackendClient::new("http://localhost:8000/").expect("client");
    assert_eq!(client.ws_url(Job::Pipeline), "ws://localhost:8000/ws/pipeline");

    let client = BackendClient::new("https://ops.example.com").expect("client");
    assert_eq!(client.ws_url(Job::Email), "wss://ops.example.com/ws/email");
}

#[test]
fn malformed_result_payload_degrades_to_zero_counts() {
    let result: WireResult = serde_json::from_value(serde_json::json!({
        "status": "completed",
        "data": "not a dict"
    }))
    .expect("parse");
    assert_eq!(result.status, WireOutcome::Completed);
    assert_eq!(result.counts().scraped, 0);
    assert_eq!(result.message, "");

    // Absent data and message fields default too.
    let bare: WireResult =
        serde_json::from_value(serde_json::json!({"status": "error"})).expect("parse");
    assert_eq!(bare.counts().emails_sent, 0);
    assert_eq!(bare.message, "");
}

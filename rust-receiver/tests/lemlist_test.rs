//! lemlist sink tests against a mock HTTP server.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadgate::forward::{ForwardError, ForwardOutcome, ForwardSink, LemlistConfig, LemlistSink};
use leadgate::WebhookEvent;

// Basic auth with empty username and "secret-key" as password.
const AUTH: &str = "Basic OnNlY3JldC1rZXk=";

fn sink_for(server: &MockServer) -> LemlistSink {
    LemlistSink::new(LemlistConfig {
        api_key: "secret-key".to_string(),
        base_url: server.uri(),
        campaign_name: "website_leads".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap()
}

fn event(payload: Value) -> WebhookEvent {
    WebhookEvent::new(
        "evt-1".to_string(),
        payload.as_object().expect("test payload must be an object").clone(),
    )
}

async fn mount_campaign_list(server: &MockServer, campaigns: Value) {
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(campaigns))
        .mount(server)
        .await;
}

#[tokio::test]
async fn pushes_lead_into_existing_campaign() {
    let server = MockServer::start().await;
    mount_campaign_list(&server, json!([{"_id": "c1", "name": "website_leads"}])).await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns/c1/leads/jane@acme.io"))
        .and(header("authorization", AUTH))
        .and(body_json(json!({"firstName": "Jane", "companyName": "Acme"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let outcome = sink
        .forward(&event(json!({
            "event_id": "evt-1",
            "WorkEmail": "jane@acme.io",
            "FirstName": "Jane",
            "CompanyName": "Acme"
        })))
        .await
        .unwrap();

    assert_eq!(outcome, ForwardOutcome::Delivered);
}

#[tokio::test]
async fn creates_campaign_when_missing() {
    let server = MockServer::start().await;
    mount_campaign_list(&server, json!([{"_id": "c1", "name": "other_campaign"}])).await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns"))
        .and(body_json(json!({"name": "website_leads"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"_id": "c9", "name": "website_leads"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns/c9/leads/jane@acme.io"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let outcome = sink
        .forward(&event(json!({"event_id": "evt-1", "email": "jane@acme.io"})))
        .await
        .unwrap();

    assert_eq!(outcome, ForwardOutcome::Delivered);
}

#[tokio::test]
async fn campaign_id_is_cached_across_forwards() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"_id": "c1", "name": "website_leads"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns/c1/leads/jane@acme.io"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let payload = json!({"event_id": "evt-1", "email": "jane@acme.io"});

    sink.forward(&event(payload.clone())).await.unwrap();
    sink.forward(&event(payload)).await.unwrap();
}

#[tokio::test]
async fn payload_without_email_is_skipped() {
    let server = MockServer::start().await;

    // No request of any kind may reach the API.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let outcome = sink
        .forward(&event(json!({"event_id": "evt-1", "FirstName": "Jane"})))
        .await
        .unwrap();

    assert!(matches!(outcome, ForwardOutcome::Skipped { .. }));
}

#[tokio::test]
async fn rejected_lead_is_an_error() {
    let server = MockServer::start().await;
    mount_campaign_list(&server, json!([{"_id": "c1", "name": "website_leads"}])).await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns/c1/leads/jane@acme.io"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let result = sink
        .forward(&event(json!({"event_id": "evt-1", "email": "jane@acme.io"})))
        .await;

    match result {
        Err(ForwardError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream broke");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_campaign_lookup_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let result = sink
        .forward(&event(json!({"event_id": "evt-1", "email": "jane@acme.io"})))
        .await;

    assert!(matches!(result, Err(ForwardError::Campaign(_))));
}

#[tokio::test]
async fn ensure_campaign_resolves_at_startup() {
    let server = MockServer::start().await;
    mount_campaign_list(&server, json!([{"_id": "c1", "name": "website_leads"}])).await;

    let sink = sink_for(&server);
    assert_eq!(sink.ensure_campaign().await.unwrap(), "c1");
}

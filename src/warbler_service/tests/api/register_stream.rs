use serde_json::Value;

use crate::helpers::{TestApp, registration_body};

/// Splits an SSE body into `(event, data)` pairs, skipping keep-alive comments.
fn parse_events(body: &str) -> Vec<(String, Value)> {
    body.split("\n\n")
        .filter_map(|block| {
            let mut event = None;
            let mut data = None;
            for line in block.lines() {
                if let Some(name) = line.strip_prefix("event:") {
                    event = Some(name.trim().to_string());
                } else if let Some(payload) = line.strip_prefix("data:") {
                    data = serde_json::from_str(payload.trim()).ok();
                }
            }
            Some((event?, data?))
        })
        .collect()
}

#[tokio::test]
async fn should_stream_monotonic_progress_then_one_outcome() {
    let app = TestApp::new().await;

    let response = app
        .post_register_stream(&registration_body("ada@example.com"))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.expect("Failed to read event stream");
    let events = parse_events(&body);

    let (last_name, outcome) = events.last().expect("No events received");
    assert_eq!(last_name, "outcome");
    assert_eq!(outcome["status"], "success");
    assert!(outcome["userId"].as_str().is_some());

    let percents: Vec<f64> = events
        .iter()
        .filter(|(name, _)| name == "progress")
        .map(|(_, data)| data["percent"].as_f64().expect("percent is a number"))
        .collect();
    assert!(!percents.is_empty());
    assert!(percents.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(percents.iter().all(|p| (0.0..=100.0).contains(p)));
    assert_eq!(
        events.iter().filter(|(name, _)| name == "outcome").count(),
        1
    );
}

#[tokio::test]
async fn should_report_failure_stage_in_outcome_event() {
    let app = TestApp::new().await;
    let body = registration_body("a@b.com");
    app.post_register(&body).await;

    let response = app.post_register_stream(&body).await;
    let events = parse_events(&response.text().await.expect("Failed to read event stream"));

    let (name, outcome) = events.last().expect("No events received");
    assert_eq!(name, "outcome");
    assert_eq!(outcome["status"], "failure");
    assert_eq!(outcome["stage"], "account_creation");
    assert_eq!(app.object_store.len(), 1);
}

#[tokio::test]
async fn should_reject_invalid_input_before_streaming() {
    let app = TestApp::new().await;
    let mut body = registration_body("a@b.com");
    body["email"] = Value::from("nope");

    let response = app.post_register_stream(&body).await;

    assert_eq!(response.status().as_u16(), 400);
}

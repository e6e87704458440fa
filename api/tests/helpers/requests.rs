use super::app::TestApp;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends the request and returns the status with the decoded envelope.
pub async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Creates a challenge with one target code and returns `(challenge_id, target_code_id)`.
pub async fn seed_challenge(app: &TestApp, language: &str, target: Value) -> (i64, i64) {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            "/api/challenges",
            json!({
                "lab_name": "COS132 Practicals",
                "week": 4,
                "title": "Loops",
                "language": language,
                "targets": [target]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["targets"][0]["id"].as_i64().unwrap(),
    )
}

/// Assigns a challenge to class 1 and returns the assignment id.
pub async fn seed_assignment(app: &TestApp, challenge_id: i64, expiry_date: Option<&str>) -> i64 {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            "/api/assignments",
            json!({
                "challenge_id": challenge_id,
                "class_id": 1,
                "expiry_date": expiry_date
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

//! Test utilities and common setup.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use serde_json::Value;
use quizd::api;
use quizd::bank::{Question, QuestionBank};
use quizd::session::SessionStore;

/// A small bank with known answers.
pub fn small_bank() -> QuestionBank {
    QuestionBank::from_questions(vec![
        Question {
            id: 1,
            question: "Which component is measured in GHz?".to_string(),
            options: vec!["Hard disk".to_string(), "Processor".to_string()],
            answer: 1,
        },
        Question {
            id: 2,
            question: "Adapter cards slide into ____.".to_string(),
            options: vec![
                "Power slots".to_string(),
                "PCIe slots".to_string(),
                "Memory slots".to_string(),
            ],
            answer: 1,
        },
        Question {
            id: 3,
            question: "What network protocol assigns IP addresses dynamically?".to_string(),
            options: vec!["DHCP".to_string(), "NTP".to_string()],
            answer: 0,
        },
    ])
    .unwrap()
}

/// Create a test application over `bank` with the given ttl.
pub fn test_app_with(bank: QuestionBank, ttl: Duration) -> (Router, Arc<SessionStore>) {
    let store = Arc::new(SessionStore::new(ttl));
    let state = api::AppState::new(Arc::clone(&store), bank);
    (api::create_router(state), store)
}

/// Create a test application with the small bank and a 30 minute ttl.
pub fn test_app() -> Router {
    test_app_with(small_bank(), Duration::from_secs(30 * 60)).0
}

/// Build a JSON POST request.
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

//! Common test utilities for docbin-webhooks integration tests.
//!
//! Provides wiremock responders and fixtures for verifying webhook delivery
//! behavior without requiring a real database.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use docbin_db::Webhook;
use docbin_webhooks::models::{WebhookDocument, WebhookDocumentFile};
use docbin_webhooks::WebhookConfig;
use uuid::Uuid;
use wiremock::{Request, Respond, ResponseTemplate};

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

/// Standard test secret.
pub const SECRET_1: &str = "whsec_test_secret_12345";

/// Config with the short, exact backoff schedule used across the suites:
/// delays of 0ms, 200ms, 300ms (capped) for attempts 1..3.
pub fn fast_config() -> WebhookConfig {
    WebhookConfig {
        enabled: true,
        max_tries: 3,
        backoff: Duration::from_millis(100),
        backoff_factor: 2.0,
        max_backoff: Duration::from_millis(300),
        timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(1),
    }
}

/// A webhook subscription record pointing at a test endpoint.
pub fn test_webhook(url: &str, events: &[&str]) -> Webhook {
    Webhook {
        id: Uuid::new_v4(),
        document_id: "hocwr6i6".to_string(),
        url: url.to_string(),
        secret: SECRET_1.to_string(),
        events: events.iter().map(|e| (*e).to_string()).collect(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A document snapshot with one file.
pub fn test_document() -> WebhookDocument {
    WebhookDocument {
        key: "hocwr6i6".to_string(),
        version: 2,
        files: vec![WebhookDocumentFile {
            name: "main.rs".to_string(),
            content: "fn main() {}".to_string(),
            language: "rust".to_string(),
            expires_at: None,
        }],
    }
}

// ---------------------------------------------------------------------------
// CapturedRequest - for inspecting delivery requests
// ---------------------------------------------------------------------------

/// A captured HTTP request with body and headers.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl CapturedRequest {
    /// Parse the body as JSON.
    pub fn body_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }
}

fn capture(request: &Request) -> CapturedRequest {
    CapturedRequest {
        body: request.body.clone(),
        headers: request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect(),
        timestamp: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// CaptureResponder - captures requests and returns a fixed status
// ---------------------------------------------------------------------------

/// A wiremock responder that captures incoming requests.
#[derive(Clone)]
pub struct CaptureResponder {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    response_code: u16,
}

impl CaptureResponder {
    /// Create a new capture responder that returns 200 OK.
    pub fn new() -> Self {
        Self::with_status(200)
    }

    /// Create a capture responder that returns a custom status code.
    pub fn with_status(status: u16) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response_code: status,
        }
    }

    /// Get all captured requests.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the number of captured requests.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for CaptureResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl Respond for CaptureResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.requests.lock().unwrap().push(capture(request));
        ResponseTemplate::new(self.response_code)
    }
}

// ---------------------------------------------------------------------------
// CountingResponder - counts requests
// ---------------------------------------------------------------------------

/// A wiremock responder that counts incoming requests.
#[derive(Clone)]
pub struct CountingResponder {
    count: Arc<AtomicU32>,
    response_code: u16,
}

impl CountingResponder {
    /// Create a new counting responder that returns 200 OK.
    pub fn new() -> Self {
        Self::with_status(200)
    }

    /// Create a counting responder that returns a custom status code.
    pub fn with_status(status: u16) -> Self {
        Self {
            count: Arc::new(AtomicU32::new(0)),
            response_code: status,
        }
    }

    /// Get the current request count.
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl Respond for CountingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.count.fetch_add(1, Ordering::SeqCst);
        ResponseTemplate::new(self.response_code)
    }
}

// ---------------------------------------------------------------------------
// FailingResponder - fails N times then succeeds, capturing every request
// ---------------------------------------------------------------------------

/// A wiremock responder that fails a specified number of times before
/// succeeding, capturing each request so attempts can be compared.
#[derive(Clone)]
pub struct FailingResponder {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    failures_before_success: u32,
    failure_code: u16,
}

impl FailingResponder {
    /// Create a responder that fails `n` times with 500, then returns 200.
    pub fn fail_times(n: u32) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            failures_before_success: n,
            failure_code: 500,
        }
    }

    /// Get all captured requests.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the current attempt count.
    pub fn attempt_count(&self) -> u32 {
        self.requests.lock().unwrap().len() as u32
    }
}

impl Respond for FailingResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut requests = self.requests.lock().unwrap();
        requests.push(capture(request));
        if (requests.len() as u32) <= self.failures_before_success {
            ResponseTemplate::new(self.failure_code)
        } else {
            ResponseTemplate::new(200)
        }
    }
}

// ---------------------------------------------------------------------------
// DelayedResponder - adds response delay
// ---------------------------------------------------------------------------

/// A wiremock responder that delays before responding, for exercising the
/// per-attempt deadline.
#[derive(Clone)]
pub struct DelayedResponder {
    delay: Duration,
}

impl DelayedResponder {
    /// Create a responder that delays for the given duration, then 200s.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Respond for DelayedResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_delay(self.delay)
    }
}

//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::{Transport, TransportError, TransportRequest, TransportResponse};

/// Replies with a canned response and records every request it receives.
#[derive(Debug)]
pub struct RecordingTransport {
    status: u16,
    headers: HashMap<String, Vec<String>>,
    body: Vec<u8>,
    fail_with: Option<u16>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: serde_json::to_vec(&body).unwrap(),
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::json(status, serde_json::json!({}))
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), vec![value.to_string()]);
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if let Some(status) = self.fail_with {
            return Err(TransportError::Response {
                status,
                body: r#"{"error":"invalid_request"}"#.to_string(),
            });
        }
        Ok(TransportResponse::new(
            self.status,
            self.headers.clone(),
            self.body.clone(),
        ))
    }
}

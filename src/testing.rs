//! Test doubles shared by unit tests

use crate::error::Result;
use crate::http::{HttpResponse, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transport that replays canned responses and records request bodies
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(bodies: impl IntoIterator<Item = serde_json::Value>) -> Self {
        Self::new(bodies.into_iter().map(|b| HttpResponse::new(200, b.to_string())))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(
        &self,
        _url: &str,
        _headers: &[(String, String)],
        body: String,
    ) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(body);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: no scripted response left");
        Ok(response)
    }
}

//! Common utilities for integration tests

use crate::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;
use vkapi_client::Transport;
use vkapi_core::error::NetworkError;
use vkapi_core::Result;

/// One scripted transport outcome
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this body
    Body(String),
    /// Fail with a non-2xx HTTP status
    Status(u16),
    /// Answer after a delay
    Delayed(Duration, String),
    /// Never answer
    Hang,
}

/// A request as seen by the transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub params: ParameterBag,
}

/// Transport spy replaying a script; once the script runs out it answers
/// with the fallback body
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    fallback: String,
    requests: Mutex<Vec<RecordedRequest>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Step>) -> Arc<Self> {
        Self::with_fallback(script, response_body(json!(1)))
    }

    pub fn with_fallback(script: Vec<Step>, fallback: String) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Answer every call with the same body
    pub fn always(body: String) -> Arc<Self> {
        Self::with_fallback(Vec::new(), body)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, url: &Url, params: &ParameterBag) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let method = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            params: params.clone(),
        });

        let step = self.script.lock().unwrap().pop_front();
        match step {
            None => Ok(self.fallback.clone()),
            Some(Step::Body(body)) => Ok(body),
            Some(Step::Status(status)) => Err(NetworkError::http_request(
                format!("HTTP {status}"),
                Some(status),
            )
            .into()),
            Some(Step::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Some(Step::Hang) => std::future::pending().await,
        }
    }
}

/// `{"response": value}`
pub fn response_body(value: Value) -> String {
    json!({ "response": value }).to_string()
}

/// `{"error": {"error_code": code, "error_msg": message}}`
pub fn error_body(code: i32, message: &str) -> String {
    json!({
        "error": {
            "error_code": code,
            "error_msg": message,
            "request_params": [{"key": "method", "value": "test.method"}]
        }
    })
    .to_string()
}

/// Configuration with millisecond retry delays and no jitter
pub fn fast_config(max_retries: u32) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.retry.max_retries = max_retries;
    config.retry.base_delay_ms = 1;
    config.retry.max_delay_ms = 10;
    config.retry.jitter = false;
    config
}

/// Client over a scripted transport with a static token
pub fn create_test_client(transport: Arc<ScriptedTransport>, max_retries: u32) -> VkApi {
    VkApi::builder()
        .config(fast_config(max_retries))
        .shared_transport(transport)
        .access_token("test-token")
        .build()
        .expect("Failed to create VkApi")
}

//! Mock implementations for testing.
//!
//! Provides a scriptable transport and a recording logger so client behaviour
//! can be tested without a network.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::{LogLevel, Logger};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type Handler = Box<dyn Fn(&HttpRequest) -> Result<MockResponse, TransportError> + Send + Sync>;

/// Mock HTTP transport for testing.
///
/// Responses are taken from the queue first, then from the handler, then
/// from the default response. With none configured, an empty 200 is returned.
pub struct MockTransport {
    queue: Mutex<VecDeque<Result<MockResponse, TransportError>>>,
    handler: Mutex<Option<Handler>>,
    default_response: Mutex<Option<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Returns the body as UTF-8 text.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates a 200 response with a raw body.
    pub fn raw(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Creates an empty response with the given status.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

impl From<MockResponse> for HttpResponse {
    fn from(response: MockResponse) -> Self {
        HttpResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            handler: Mutex::new(None),
            default_response: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.queue).push_back(Ok(response));
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a transport failure.
    pub fn queue_failure(&self, error: TransportError) {
        lock(&self.queue).push_back(Err(error));
    }

    /// Answers every unqueued request through `handler`.
    pub fn respond_with<F>(&self, handler: F)
    where
        F: Fn(&HttpRequest) -> Result<MockResponse, TransportError> + Send + Sync + 'static,
    {
        *lock(&self.handler) = Some(Box::new(handler));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_response(&self, request: &HttpRequest) -> Result<MockResponse, TransportError> {
        if let Some(queued) = lock(&self.queue).pop_front() {
            return queued;
        }
        if let Some(handler) = lock(&self.handler).as_ref() {
            return handler(request);
        }
        Ok(lock(&self.default_response)
            .clone()
            .unwrap_or_else(|| MockResponse::empty(200)))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            url: request.url.to_string(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });

        self.next_response(&request).map(HttpResponse::from)
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Message.
    pub message: String,
    /// Context key-value pairs.
    pub context: HashMap<String, String>,
}

/// Logger that keeps every entry in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    /// Creates an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Returns true if nothing was logged.
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        lock(&self.entries).push(LogEntry {
            level,
            message: message.to_string(),
            context: context.cloned().unwrap_or_default(),
        });
    }
}

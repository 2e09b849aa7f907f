//! Observability module for the REST client.
//!
//! Request/response diagnostics go to an injected [`Logger`]; structured
//! spans and events go to `tracing` regardless of the debug flag.

mod logging;

pub use logging::{ConsoleLogger, LogConfig, LogLevel, Logger, NoopLogger, TracingLogger};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::transport::{HttpRequest, HttpResponse};

/// Renders a body for display. Never fails.
pub fn render_body(body: Option<&[u8]>) -> String {
    match body {
        None => "<none>".to_string(),
        Some([]) => "<empty>".to_string(),
        Some(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => format!("<{} bytes of binary data>", bytes.len()),
        },
    }
}

fn render_headers(headers: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&String, &String> = headers.iter().collect();
    serde_json::to_string(&sorted).unwrap_or_default()
}

/// Emits request/response diagnostics to a [`Logger`].
#[derive(Clone)]
pub struct Diagnostics {
    logger: Arc<dyn Logger>,
}

impl Diagnostics {
    /// Creates diagnostics backed by `logger`.
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Returns the logger.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Describes an outgoing request.
    pub fn request(&self, request_id: &str, request: &HttpRequest) {
        let mut context = HashMap::new();
        context.insert("request_id".to_string(), request_id.to_string());
        context.insert("headers".to_string(), render_headers(&request.headers));
        context.insert("body".to_string(), render_body(request.body.as_deref()));

        self.logger.log(
            LogLevel::Debug,
            &format!("--> {} {}", request.method, request.url),
            Some(&context),
        );
    }

    /// Describes a response received for `request_line` (`"<METHOD> <URL>"`).
    pub fn response(
        &self,
        request_id: &str,
        request_line: &str,
        response: &HttpResponse,
        elapsed: Duration,
    ) {
        let mut context = HashMap::new();
        context.insert("request_id".to_string(), request_id.to_string());
        context.insert("headers".to_string(), render_headers(&response.headers));
        context.insert("body".to_string(), render_body(Some(response.body.as_slice())));

        self.logger.log(
            LogLevel::Debug,
            &format!(
                "<-- {} {} ({}ms)",
                response.status,
                request_line,
                elapsed.as_millis()
            ),
            Some(&context),
        );
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish()
    }
}

/// Request timer for measuring operation duration.
pub struct RequestTimer {
    start: Instant,
    operation: String,
}

impl RequestTimer {
    /// Creates a new request timer.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Returns the elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

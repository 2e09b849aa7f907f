//! Diagnostic sinks.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace level.
    Trace = 0,
    /// Debug level.
    Debug = 1,
    /// Info level.
    Info = 2,
    /// Warning level.
    Warn = 3,
    /// Error level.
    Error = 4,
    /// Off (no logging).
    Off = 5,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Debug
    }
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Include timestamps.
    pub include_timestamps: bool,
    /// Maximum body length to log.
    pub max_body_length: usize,
    /// Redact sensitive data.
    pub redact_sensitive: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            include_timestamps: true,
            max_body_length: 4096,
            redact_sensitive: true,
        }
    }
}

impl LogConfig {
    /// Creates a new log configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the maximum body length shown before truncation.
    pub fn max_body_length(mut self, max: usize) -> Self {
        self.max_body_length = max;
        self
    }

    /// Omits timestamps.
    pub fn without_timestamps(mut self) -> Self {
        self.include_timestamps = false;
        self
    }

    /// Disables sensitive data redaction.
    pub fn no_redact(mut self) -> Self {
        self.redact_sensitive = false;
        self
    }
}

/// Logger interface.
///
/// Implementations must not panic; diagnostics never fail a call.
pub trait Logger: Send + Sync {
    /// Logs a message at the specified level.
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>);
}

type Output = Mutex<Box<dyn Write + Send>>;

/// Console logger implementation.
///
/// Writes to stdout (stderr for warnings and errors) unless an explicit writer
/// is given. Write failures are dropped.
pub struct ConsoleLogger {
    config: LogConfig,
    patterns: Vec<(regex::Regex, &'static str)>,
    output: Option<Output>,
}

impl ConsoleLogger {
    /// Creates a new console logger.
    pub fn new(config: LogConfig) -> Self {
        let patterns = [
            (r"Bearer [A-Za-z0-9._~+/=-]+", "Bearer ***"),
            (r"Basic [A-Za-z0-9+/=]+", "Basic ***"),
            (r#"(?i)(api[_-]?key|token|secret|password)("?\s*[=:]\s*"?)[^\s,}"&]+"#, "${1}${2}***"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| {
            regex::Regex::new(pattern).ok().map(|re| (re, replacement))
        })
        .collect();

        Self {
            config,
            patterns,
            output: None,
        }
    }

    /// Creates a console logger that writes every line to `writer`.
    pub fn with_writer(config: LogConfig, writer: impl Write + Send + 'static) -> Self {
        let mut logger = Self::new(config);
        logger.output = Some(Mutex::new(Box::new(writer)));
        logger
    }

    /// Creates with default configuration.
    pub fn default_config() -> Self {
        Self::new(LogConfig::default())
    }

    /// Redacts sensitive data from text.
    fn redact(&self, text: &str) -> String {
        if !self.config.redact_sensitive {
            return text.to_string();
        }

        let mut result = text.to_string();
        for (re, replacement) in &self.patterns {
            result = re.replace_all(&result, *replacement).to_string();
        }
        result
    }

    fn truncate(&self, text: &str) -> String {
        let max = self.config.max_body_length;
        if text.len() <= max {
            return text.to_string();
        }
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... ({} bytes total)", &text[..end], text.len())
    }

    /// Formats a log line without printing it.
    pub fn format(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<&HashMap<String, String>>,
    ) -> String {
        let mut parts = Vec::new();

        if self.config.include_timestamps {
            parts.push(format!("[{}]", chrono::Utc::now().to_rfc3339()));
        }

        parts.push(format!("[{}]", level.label()));
        parts.push(self.redact(message));

        if let Some(ctx) = context {
            let mut keys: Vec<&String> = ctx.keys().collect();
            keys.sort();
            for key in keys {
                let value = self.truncate(&self.redact(&ctx[key]));
                parts.push(format!("\n  {}: {}", key, value));
            }
        }

        parts.join(" ")
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        if level < self.config.level || level == LogLevel::Off {
            return;
        }

        let output = self.format(level, message, context);

        let _ = match (&self.output, level) {
            (Some(out), _) => {
                let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
                writeln!(out, "{}", output)
            }
            (None, LogLevel::Error | LogLevel::Warn) => {
                writeln!(std::io::stderr().lock(), "{}", output)
            }
            (None, _) => writeln!(std::io::stdout().lock(), "{}", output),
        };
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::default_config()
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("config", &self.config)
            .field("custom_output", &self.output.is_some())
            .finish()
    }
}

const DIAGNOSTICS_TARGET: &str = "rest_resource_client::diagnostics";

/// Logger that forwards diagnostics to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        let context = context
            .and_then(|ctx| serde_json::to_string(ctx).ok())
            .unwrap_or_default();

        match level {
            LogLevel::Trace => tracing::trace!(target: DIAGNOSTICS_TARGET, %context, "{}", message),
            LogLevel::Debug => tracing::debug!(target: DIAGNOSTICS_TARGET, %context, "{}", message),
            LogLevel::Info => tracing::info!(target: DIAGNOSTICS_TARGET, %context, "{}", message),
            LogLevel::Warn => tracing::warn!(target: DIAGNOSTICS_TARGET, %context, "{}", message),
            LogLevel::Error => tracing::error!(target: DIAGNOSTICS_TARGET, %context, "{}", message),
            LogLevel::Off => {}
        }
    }
}

/// No-op logger that discards all messages.
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: Option<&HashMap<String, String>>) {}
}

impl std::fmt::Debug for NoopLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoopLogger").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Off);
    }

    #[test]
    fn test_console_logger_redaction() {
        let logger = ConsoleLogger::new(LogConfig::default());

        let redacted = logger.redact(r#"{"Authorization":"Bearer abc.def-123"}"#);
        assert!(!redacted.contains("abc.def-123"));
        assert!(redacted.contains("Bearer ***"));

        let redacted = logger.redact("https://x/y?api_key=s3cr3t&page=1");
        assert!(!redacted.contains("s3cr3t"));
        assert!(redacted.contains("page=1"));
    }

    #[test]
    fn test_console_logger_no_redact() {
        let logger = ConsoleLogger::new(LogConfig::new().no_redact());

        let text = "Bearer token123";
        assert_eq!(logger.redact(text), text);
    }

    #[test]
    fn test_console_logger_format_truncates_context() {
        let logger = ConsoleLogger::new(LogConfig::new().without_timestamps().max_body_length(4));
        let mut ctx = HashMap::new();
        ctx.insert("body".to_string(), "abcdefgh".to_string());

        let line = logger.format(LogLevel::Debug, "--> GET /", Some(&ctx));

        assert!(line.starts_with("[DEBUG] --> GET /"));
        assert!(line.contains("body: abcd... (8 bytes total)"));
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_console_logger_writes_to_custom_writer() {
        let buffer = SharedBuffer::default();
        let logger =
            ConsoleLogger::with_writer(LogConfig::new().without_timestamps(), buffer.clone());

        logger.log(LogLevel::Debug, "--> GET /users", None);
        logger.log(LogLevel::Trace, "filtered out", None);

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "[DEBUG] --> GET /users\n");
    }

    #[test]
    fn test_console_logger_ignores_write_failures() {
        let logger = ConsoleLogger::with_writer(LogConfig::default(), BrokenPipe);

        logger.log(LogLevel::Debug, "--> GET /users", None);
        logger.log(LogLevel::Error, "<-- 500 GET /users", None);
    }
}

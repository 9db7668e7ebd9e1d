//! Logging capability.
//!
//! Host commands report what they changed through [`LogService`] rather than
//! calling `tracing` directly, so the sink can be swapped in the registry.

/// Default `source` attached to events from [`TracingLog`].
pub const DEFAULT_LOG_SOURCE: &str = "hostmgr";

/// Sink for user-facing operation messages.
pub trait LogService {
    /// Records a successful operation.
    fn write_log(&self, msg: &str);

    /// Records a failed operation.
    fn write_error(&self, msg: &str);

    /// Records rejected caller input.
    fn write_validation_error(&self, msg: &str);
}

/// Forwards messages to `tracing`, tagged with a `source` field.
#[derive(Debug, Clone)]
pub struct TracingLog {
    source: String,
}

impl TracingLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: DEFAULT_LOG_SOURCE.to_string(),
        }
    }

    /// Overrides the `source` field.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for TracingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogService for TracingLog {
    fn write_log(&self, msg: &str) {
        tracing::info!(source = %self.source, "{msg}");
    }

    fn write_error(&self, msg: &str) {
        tracing::error!(source = %self.source, "{msg}");
    }

    fn write_validation_error(&self, msg: &str) {
        tracing::warn!(source = %self.source, validation = true, "{msg}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl LogService for NullLog {
    fn write_log(&self, _msg: &str) {}

    fn write_error(&self, _msg: &str) {}

    fn write_validation_error(&self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_override() {
        assert_eq!(TracingLog::new().source(), DEFAULT_LOG_SOURCE);
        assert_eq!(TracingLog::new().with_source("cli").source(), "cli");
    }

    #[test]
    fn sinks_accept_messages() {
        let sinks: [&dyn LogService; 2] = [&TracingLog::default(), &NullLog];
        for sink in sinks {
            sink.write_log("added host");
            sink.write_error("failed");
            sink.write_validation_error("bad input");
        }
    }
}

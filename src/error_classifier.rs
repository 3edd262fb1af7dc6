use crate::api::error::ApiError;
use crate::export::ExportError;
use log::Level;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }
}

/// Decides how loudly a failed request is logged.
#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Expected: a hotel vanished or has no data yet
            ApiError::Http { status: 404, .. } => LogLevel::Info,

            // Validation rejected by the server
            ApiError::Http { status, .. } if (400..=499).contains(status) => LogLevel::Warn,

            // Server-side failures
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Error,

            // Server answered 2xx with an unexpected payload
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_export_error(&self, error: &ExportError) -> LogLevel {
        match error {
            ExportError::Api(e) => self.classify_api_error(e),
            ExportError::Image(_) => LogLevel::Error,
            ExportError::Io(_) => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: None,
        }
    }

    #[test]
    fn test_classify_http_statuses() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_api_error(&http(404)), LogLevel::Info);
        assert_eq!(classifier.classify_api_error(&http(400)), LogLevel::Warn);
        assert_eq!(classifier.classify_api_error(&http(503)), LogLevel::Error);
    }

    #[test]
    fn test_classify_export_io_error() {
        let classifier = ErrorClassifier::new();
        let error = ExportError::Io(std::io::Error::other("disk full"));
        assert_eq!(classifier.classify_export_error(&error), LogLevel::Error);
    }
}

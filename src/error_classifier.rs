use crate::api::ApiError;
use crate::logging::LogLevel;

/// Maps request failures to the level they are logged at. Users only ever
/// see the generic alert; the level and message go to the activity log.
#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, error: &ApiError) -> LogLevel {
        match error {
            // Critical: Auth, malformed responses
            e if e.is_unauthorized() => LogLevel::Error,
            ApiError::Decode(_) | ApiError::Schema(_) => LogLevel::Error,

            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Cancelled by the user
            ApiError::Cancelled => LogLevel::Debug,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

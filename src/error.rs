//! Centralized error types for artpager.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// Aggregates configuration, API and terminal failures while keeping the
/// underlying error available for the log file.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "The catalog server failed. Please try again later.".to_string()
                }
                ApiError::BadRequest(msg) => format!("The catalog rejected the request: {}", msg),
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid catalog endpoint in configuration.".to_string(),
                ApiError::InvalidPage(page) => {
                    format!("Page {} does not exist. Pages start at 1.", page)
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the catalog. Please try again.".to_string()
                }
            },
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors can be retried or the user can continue browsing.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::RateLimited)
                | AppError::Api(ApiError::ServerError(_))
                | AppError::Api(ApiError::Network(_))
                | AppError::Api(ApiError::NotFound(_))
                | AppError::Api(ApiError::InvalidResponse(_))
        )
    }

    /// Full report for the terminal: the user message, a retry note for
    /// transient failures and the suggested action.
    pub fn report(&self) -> String {
        let mut report = self.user_message();
        if self.is_recoverable() {
            report.push_str("\nThis may be temporary. Try again in a moment.");
        }
        if let Some(action) = self.suggested_action() {
            report.push_str("\nHint: ");
            report.push_str(action);
        }
        report
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix the file named by ARTPAGER_CONFIG or remove it to use the defaults.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and press 'r' to reload."),
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::InvalidUrl(_)) => {
                Some("Check your internet connection and the configured endpoint.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::RateLimited.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("page 9".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("page 9"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_invalid_page() {
        let err = AppError::Api(ApiError::InvalidPage(0));
        assert!(err.user_message().contains("Pages start at 1"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "page_size must be at least 1".to_string(),
        ));
        assert!(err.user_message().contains("page_size"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AppError::Api(ApiError::RateLimited).is_recoverable());
        assert!(AppError::Api(ApiError::ServerError("boom".into())).is_recoverable());
        assert!(!AppError::Api(ApiError::InvalidUrl("x".into())).is_recoverable());
        assert!(!AppError::Config(ConfigError::NoConfigDir).is_recoverable());
    }

    #[test]
    fn test_suggested_action_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        let action = err.suggested_action();
        assert!(action.is_some());
        assert!(action.unwrap().contains("reload"));
    }

    #[test]
    fn test_suggested_action_none_for_terminal() {
        assert!(AppError::terminal("x").suggested_action().is_none());
    }

    #[test]
    fn test_report_rate_limited_has_retry_and_hint() {
        let report = AppError::Api(ApiError::RateLimited).report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Too many requests"));
        assert!(lines[1].contains("temporary"));
        assert!(lines[2].starts_with("Hint: "));
    }

    #[test]
    fn test_report_invalid_page_is_message_only() {
        let err = AppError::Api(ApiError::InvalidPage(0));
        assert_eq!(err.report(), err.user_message());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }
}

//! Centralized error types for ztv.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror`.

use std::convert::Infallible;

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// Aggregates all error types that can occur in ztv, providing user-friendly
/// messages while preserving the underlying error for the logs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (terminal, file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Infallible> for AppError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your email and API token.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. You don't have permission to view tickets.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Zendesk server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::Keyring(_) => {
                    "Could not access secure storage for the API token.".to_string()
                }
                ApiError::MissingToken(profile) => {
                    format!("No API token stored for profile '{}'.", profile)
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from Zendesk. Please try again.".to_string()
                }
                ApiError::ConnectionFailed(_) => {
                    "Could not connect to Zendesk. Please check the subdomain and network."
                        .to_string()
                }
            },
            AppError::Io(_) => "An I/O operation failed.".to_string(),
        }
    }

    /// Check if this error prevents the viewer from working at all.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Api(ApiError::Unauthorized)
                | AppError::Api(ApiError::Forbidden)
                | AppError::Api(ApiError::MissingToken(_))
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ValidationError(_))
            | AppError::Config(ConfigError::ProfileNotFound(_)) => {
                Some("Run 'ztv profiles' to list configured profiles, or 'ztv --demo' to try the viewer.")
            }
            AppError::Api(ApiError::Unauthorized) | AppError::Api(ApiError::MissingToken(_)) => {
                Some("Store an API token with 'ztv set-token --profile <name>' or set ZTV_API_TOKEN.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a minute and restart the viewer."),
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::ConnectionFailed(_)) => {
                Some("Check your internet connection and Zendesk subdomain.")
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
        let app_err: AppError = ApiError::Unauthorized.into();
        assert!(matches!(app_err, AppError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn test_user_message_unauthorized() {
        let msg = AppError::Api(ApiError::Unauthorized).user_message();
        assert!(msg.contains("Authentication failed"));
        assert!(msg.contains("API token"));
    }

    #[test]
    fn test_user_message_missing_token() {
        let msg = AppError::Api(ApiError::MissingToken("work".to_string())).user_message();
        assert!(msg.contains("'work'"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "duplicate profile".to_string(),
        ));
        assert!(err.user_message().contains("duplicate profile"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Api(ApiError::Unauthorized).is_critical());
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(!AppError::Api(ApiError::RateLimited).is_critical());
        assert!(!AppError::Api(ApiError::NotFound("ticket".to_string())).is_critical());
    }

    #[test]
    fn test_suggested_action_missing_token() {
        let err = AppError::Api(ApiError::MissingToken("work".to_string()));
        assert!(err.suggested_action().unwrap().contains("set-token"));
    }

    #[test]
    fn test_suggested_action_none() {
        let err = AppError::Api(ApiError::InvalidResponse("bad json".to_string()));
        assert!(err.suggested_action().is_none());
    }

    #[test]
    fn test_io_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "tty gone").into();
        assert_eq!(err.user_message(), "An I/O operation failed.");
        assert!(!err.is_critical());
    }
}

//! Error types for the editor session.
//!
//! Errors fall into three categories:
//!
//! - [`FetchError`] - transport failures (network unreachable, non-2xx status)
//! - [`SessionError::Remote`] - a 2xx response carrying an explicit error field
//! - [`PreconditionError`] - local checks rejected before any request is sent

use thiserror::Error;

use crate::models::NotificationKind;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (device offline, CORS, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Local precondition violations. Never escalated past a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("directory path must be absolute and end with '/': {0}")]
    InvalidDirectory(String),
    #[error("No file selected")]
    NoActiveFile,
    #[error("Can only run python files")]
    NotRunnable(String),
    #[error("unsupported image size {0}, expected 16 or 32")]
    UnsupportedImageSize(usize),
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("invalid image name '{0}' (use only letters, numbers and underscores)")]
    InvalidImageName(String),
}

/// Any failure of an editor intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] FetchError),
    /// Application-level error reported by the device.
    #[error("{0}")]
    Remote(String),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

impl SessionError {
    /// Whether the error was raised locally, before any request.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Notification severity used when surfacing this error.
    pub fn severity(&self) -> NotificationKind {
        if self.is_local() {
            NotificationKind::Warning
        } else {
            NotificationKind::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_underlying_message() {
        let err = SessionError::from(FetchError::HttpError(404));
        assert_eq!(err.to_string(), "HTTP error: 404");

        let err = SessionError::Remote("ENOENT".to_string());
        assert_eq!(err.to_string(), "ENOENT");
    }

    #[test]
    fn test_severity() {
        let local = SessionError::from(PreconditionError::NoActiveFile);
        assert!(local.is_local());
        assert_eq!(local.severity(), NotificationKind::Warning);

        let remote = SessionError::from(FetchError::Timeout);
        assert!(!remote.is_local());
        assert_eq!(remote.severity(), NotificationKind::Error);
    }
}

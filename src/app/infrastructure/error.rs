use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    /// Connection, TLS, timeout or body decoding failure from the HTTP client.
    #[error("{0}")]
    Transport(String),

    #[error("server returned {code} {reason}")]
    HttpStatus { code: i32, reason: String },

    #[error("no API key configured (set one in File > Settings or via NEXTGENEDIT_API_KEY)")]
    MissingApiKey,
}

impl From<minreq::Error> for AppError {
    fn from(e: minreq::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
        assert!(app_err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Settings("invalid font size".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid font size");

        let err = AppError::Transport("Connection refused (os error 111)".to_string());
        assert_eq!(err.to_string(), "Connection refused (os error 111)");

        let err = AppError::HttpStatus { code: 403, reason: "Forbidden".to_string() };
        assert_eq!(err.to_string(), "server returned 403 Forbidden");

        assert!(AppError::MissingApiKey.to_string().contains("NEXTGENEDIT_API_KEY"));
    }
}

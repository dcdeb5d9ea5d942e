/// Shared error type used across all figchunk crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid upstream data: {0}")]
    InvalidUpstreamData(String),

    #[error("invalid cursor: {0:?}")]
    InvalidCursor(String),

    #[error("upstream unavailable{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    UpstreamUnavailable {
        status: Option<u16>,
        message: String,
    },

    #[error("auth: {0}")]
    Auth(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCursor(_) | Error::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_unavailable_includes_status() {
        let err = Error::UpstreamUnavailable {
            status: Some(503),
            message: "GET /v1/files/abc".into(),
        };
        assert_eq!(err.to_string(), "upstream unavailable (503): GET /v1/files/abc");
    }

    #[test]
    fn upstream_unavailable_without_status() {
        let err = Error::UpstreamUnavailable {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "upstream unavailable: connection refused");
    }

    #[test]
    fn cursor_errors_are_client_errors() {
        assert!(Error::InvalidCursor("abc".into()).is_client_error());
        assert!(!Error::InvalidUpstreamData("no document".into()).is_client_error());
    }
}

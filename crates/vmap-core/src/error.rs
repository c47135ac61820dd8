//! Failures of a single generate action.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Every way one generate action can fail.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Nothing to deliver: no layer checked and no imagery chosen.
    #[error("Select at least one layer or an imagery source.")]
    NothingSelected,

    /// The request never got an HTTP response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx with a readable `{"error": ...}` body.
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// Non-2xx whose body had no usable message.
    #[error("Server error {}", .status.as_u16())]
    MalformedResponse { status: StatusCode },

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Failures while handing the generated file to the user.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Save cancelled")]
    Cancelled,

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_verbatim() {
        let err = GenerateError::Server {
            status: StatusCode::BAD_REQUEST,
            message: "bounds too large".to_string(),
        };
        assert_eq!(err.to_string(), "bounds too large");
    }

    #[test]
    fn test_malformed_response_message() {
        let err = GenerateError::MalformedResponse {
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "Server error 502");
    }
}

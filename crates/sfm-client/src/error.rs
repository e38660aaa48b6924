//! Error types for the SFM client.

use thiserror::Error;

/// Client operation errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Connection error (network, DNS, refused, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// The response was JSON but not of any recognised shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid client configuration or URL
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.is_client_error() => {
                    ClientError::Http(format!("HTTP {}: {}", status, e))
                }
                Some(status) if status.is_server_error() => {
                    ClientError::Http(format!("Server error (HTTP {})", status))
                }
                _ => ClientError::Http(e.to_string()),
            }
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(format!("JSON parsing error: {}", e))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::Config(format!("Invalid URL: {}", e))
    }
}

//! Error handling for the CourseHub client

use std::fmt;
use thiserror::Error;

/// A single backend-reported field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Unified error type for the CourseHub client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// No token stored, or the backend rejected the token (401)
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// The resource is already in the requested state (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Referenced course/instructor/order does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input, surfaced per field when the backend provides detail
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Any other non-success response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// General errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new unauthenticated error
    pub fn unauthenticated<T: fmt::Display>(msg: T) -> Self {
        Error::Unauthenticated(msg.to_string())
    }

    /// Create a new conflict error
    pub fn conflict<T: fmt::Display>(msg: T) -> Self {
        Error::Conflict(msg.to_string())
    }

    /// Create a new not-found error
    pub fn not_found<T: fmt::Display>(msg: T) -> Self {
        Error::NotFound(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T, fields: Vec<FieldError>) -> Self {
        Error::Validation {
            message: msg.to_string(),
            fields,
        }
    }

    /// Create a new API error
    pub fn api<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Api {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new general error
    pub fn other<T: fmt::Display>(msg: T) -> Self {
        Error::Other(msg.to_string())
    }

    /// Classify a non-success response by status code and body.
    ///
    /// The backend reports failures as `{"message": "..."}`, optionally with an
    /// `"errors"` object mapping field names to messages.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let (message, fields) = parse_error_body(body);

        match status {
            401 => Error::Unauthenticated(
                message.unwrap_or_else(|| "session expired or missing".to_string()),
            ),
            404 => Error::NotFound(message.unwrap_or_else(|| "resource not found".to_string())),
            409 => Error::Conflict(
                message.unwrap_or_else(|| "resource already in requested state".to_string()),
            ),
            400 | 422 if !fields.is_empty() => Error::Validation {
                message: message.unwrap_or_else(|| "invalid input".to_string()),
                fields,
            },
            _ => Error::Api {
                status,
                message: message
                    .unwrap_or_else(|| format!("request failed with status {}", status)),
            },
        }
    }
}

fn parse_error_body(body: &str) -> (Option<String>, Vec<FieldError>) {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return (None, Vec::new()),
    };

    let message = value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string());

    let fields = value
        .get("errors")
        .and_then(|e| e.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(field, msg)| {
                    msg.as_str().map(|m| FieldError {
                        field: field.clone(),
                        message: m.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    (message, fields)
}

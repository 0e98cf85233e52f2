//! Error types for estransfer.
//!
//! One error type is shared by every library crate in the workspace. The
//! variants follow the failure classes the transfer pipeline distinguishes:
//! transport failures, unexpected HTTP statuses, file format problems and
//! invalid caller input.

use std::fmt;
use thiserror::Error;

/// The unified error type for estransfer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, HTTP client).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The store answered with a status the operation does not accept.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Transfer file or response body could not be interpreted.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Input validation errors (bad URL, bad stream name).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Local filesystem errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// An HTTP response with a status the operation does not accept.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// The URL that produced the response.
    pub url: String,
    /// Response body, if one could be read.
    pub body: Option<String>,
}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, url: impl Into<String>, body: Option<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}", self.status, self.url)?;
        if let Some(body) = self.body.as_deref().filter(|b| !b.is_empty()) {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

/// Errors in the shape of transfer files and response bodies.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file extension is not one of `.json`, `.zip` or `.tar.xz`.
    #[error("unsupported file type '{extension}' (expected .json, .zip or .tar.xz)")]
    UnsupportedType { extension: String },

    /// An import archive does not hold exactly one `.json` member.
    #[error("archive must contain exactly one .json file, found {found}")]
    MemberCount { found: usize },

    /// Compressing or extracting a container failed.
    #[error("archive error: {message}")]
    Archive { message: String },

    /// A response body did not have the expected JSON shape.
    #[error("unexpected response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

impl FormatError {
    /// Shorthand for an [`FormatError::Archive`] error.
    pub fn archive(message: impl fmt::Display) -> Self {
        FormatError::Archive {
            message: message.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid store base URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// Invalid stream name.
    #[error("invalid stream name '{value}': {reason}")]
    StreamName { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

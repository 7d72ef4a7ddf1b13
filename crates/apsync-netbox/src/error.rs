//! Error taxonomy for the NetBox client.

use thiserror::Error;

/// Errors surfaced by [`NetboxClient`](crate::NetboxClient).
#[derive(Debug, Error)]
pub enum Error {
    /// Network / TLS / connection failure from the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL (or a joined path) is not a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Token rejected or missing (HTTP 401/403).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The remote refused a write because a natural key already exists.
    ///
    /// `reason` carries the remote-supplied message verbatim so the engine
    /// can pattern-match known recoverable collisions.
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Any other non-success response.
    #[error("NetBox API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx body that did not decode into the expected shape.
    #[error("failed to decode NetBox response: {message}")]
    Deserialization { message: String },
}

impl Error {
    /// Whether this is a natural-key collision the reconciler can recover
    /// from by re-fetching (duplicate device name within a site, duplicate
    /// slug, ...).
    pub fn is_duplicate_key(&self) -> bool {
        match self {
            Self::Conflict { reason } => {
                let reason = reason.to_ascii_lowercase();
                reason.contains("must be unique") || reason.contains("already exists")
            }
            _ => false,
        }
    }
}

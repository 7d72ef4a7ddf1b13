//! Error taxonomy for the controller session.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the WLC session transport.
#[derive(Debug, Error)]
pub enum Error {
    /// The SSH session could not be established. Fatal for the run.
    #[error("cannot establish controller session to {host}: {message}")]
    Connection { host: String, message: String },

    /// The controller rejected the supplied credentials.
    #[error("controller rejected credentials for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Output never went quiescent within the overall command timeout.
    ///
    /// The inactivity window is a statistical end-of-output detector, not a
    /// protocol terminator; this hard cap is the bound callers rely on.
    #[error("command {command:?} still producing output after {timeout:?}")]
    CommandTimeout { command: String, timeout: Duration },

    /// Any other SSH-protocol failure (channel torn down, key exchange, ...).
    #[error("ssh error: {0}")]
    Ssh(#[from] russh::Error),
}

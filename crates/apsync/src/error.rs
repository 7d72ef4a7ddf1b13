//! CLI error type: wraps the library taxonomies plus config validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A required setting is missing or malformed. Exits non-zero before
    /// any connection is attempted.
    #[error("invalid configuration for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("config file error: {0}")]
    Config(#[from] figment::Error),

    #[error(transparent)]
    Wlc(#[from] apsync_wlc::Error),

    #[error(transparent)]
    Netbox(#[from] apsync_netbox::Error),
}

impl CliError {
    pub fn missing(field: &str) -> Self {
        Self::Validation {
            field: field.to_owned(),
            reason: "missing (set the flag, environment variable, or config file entry)".into(),
        }
    }
}

//! Configuration loading and resolution.
//!
//! Three layers, strongest first: CLI flags (clap also reads `APSYNC_*`
//! env vars for them), then a figment `APSYNC_*` environment provider,
//! then an optional TOML file. Secrets are wrapped in `SecretString` as
//! soon as they are resolved. Mandatory values are enforced per surface:
//! `show` only needs the controller half, `sync` needs both.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use apsync_wlc::SessionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Default config file looked for in the working directory.
const DEFAULT_CONFIG_FILE: &str = "apsync.toml";
/// Default SSH port for the controller.
const DEFAULT_WLC_PORT: u16 = 22;

/// Raw, file/env-shaped configuration. Everything optional; mandatory
/// values are enforced at resolve time.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub wlc_host: Option<String>,
    pub wlc_port: Option<u16>,
    pub wlc_username: Option<String>,
    pub wlc_password: Option<String>,
    pub netbox_url: Option<String>,
    pub netbox_token: Option<String>,
    pub command_timeout_secs: Option<u64>,
    pub inactivity_window_secs: Option<u64>,
}

/// Resolved controller-session settings.
pub struct WlcSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub session: SessionConfig,
}

/// Resolved inventory-API settings.
pub struct NetboxSettings {
    pub url: Url,
    pub token: SecretString,
}

/// Load file + env layers. A missing default file is fine; an explicitly
/// given `--config` path that fails to parse is an error.
pub fn load(explicit_path: Option<&Path>) -> Result<Config, CliError> {
    let mut figment = Figment::new();
    match explicit_path {
        Some(path) => figment = figment.merge(Toml::file_exact(path)),
        None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
    }
    figment = figment.merge(Env::prefixed("APSYNC_"));
    Ok(figment.extract()?)
}

/// Resolve the controller half: host, credentials, session tunables.
pub fn resolve_wlc(global: &GlobalOpts, config: &Config) -> Result<WlcSettings, CliError> {
    let host = global
        .wlc_host
        .clone()
        .or_else(|| config.wlc_host.clone())
        .ok_or_else(|| CliError::missing("wlc-host"))?;
    let username = global
        .wlc_username
        .clone()
        .or_else(|| config.wlc_username.clone())
        .ok_or_else(|| CliError::missing("wlc-username"))?;
    let password = global
        .wlc_password
        .clone()
        .or_else(|| config.wlc_password.clone())
        .map(SecretString::from)
        .ok_or_else(|| CliError::missing("wlc-password"))?;

    let defaults = SessionConfig::default();
    let session = SessionConfig {
        connect_timeout: defaults.connect_timeout,
        inactivity_window: global
            .inactivity_window
            .or(config.inactivity_window_secs)
            .map_or(defaults.inactivity_window, Duration::from_secs),
        command_timeout: global
            .command_timeout
            .or(config.command_timeout_secs)
            .map_or(defaults.command_timeout, Duration::from_secs),
    };

    Ok(WlcSettings {
        host,
        port: global
            .wlc_port
            .or(config.wlc_port)
            .unwrap_or(DEFAULT_WLC_PORT),
        username,
        password,
        session,
    })
}

/// Resolve the inventory half: base URL and token.
pub fn resolve_netbox(global: &GlobalOpts, config: &Config) -> Result<NetboxSettings, CliError> {
    let raw = global
        .netbox_url
        .clone()
        .or_else(|| config.netbox_url.clone())
        .ok_or_else(|| CliError::missing("netbox-url"))?;
    let url: Url = raw.parse().map_err(|_| CliError::Validation {
        field: "netbox-url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    let token = global
        .netbox_token
        .clone()
        .or_else(|| config.netbox_token.clone())
        .map(SecretString::from)
        .ok_or_else(|| CliError::missing("netbox-token"))?;

    Ok(NetboxSettings { url, token })
}

//! Authenticated interactive SSH session to the controller.
//!
//! The controller has no exec-request support worth relying on: commands go
//! through a PTY shell, output arrives unframed, and the only end-of-output
//! signal is silence. `run` therefore drains the channel until no bytes
//! arrive for [`SessionConfig::inactivity_window`], bounded overall by
//! [`SessionConfig::command_timeout`] as the hard cap callers can trust.

use std::sync::Arc;
use std::time::{Duration, Instant};

use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace, warn};

use crate::error::Error;
use crate::pager::{CONTINUE_KEYSTROKE, PageBuffer};

/// Tunables for session establishment and command completion detection.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cap on TCP connect + SSH handshake.
    pub connect_timeout: Duration,
    /// Silence window after which a command is assumed finished.
    pub inactivity_window: Duration,
    /// Hard cap on one command, quiescent or not.
    pub command_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            inactivity_window: Duration::from_secs(3),
            command_timeout: Duration::from_secs(120),
        }
    }
}

/// Accepts any host key. Controllers live on management networks with
/// rotating self-signed keys; known-hosts pinning is not practical here.
struct AcceptingHost;

#[async_trait::async_trait]
impl client::Handler for AcceptingHost {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh_keys::key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// One authenticated session to a wireless LAN controller.
///
/// The session survives across multiple [`run`](Self::run) calls; each
/// command opens and tears down its own channel (no pipelining).
pub struct WlcSession {
    handle: Handle<AcceptingHost>,
    config: SessionConfig,
}

impl WlcSession {
    /// Connect and authenticate with a username and password.
    pub async fn connect(
        host: &str,
        port: u16,
        user: &str,
        password: &SecretString,
        config: SessionConfig,
    ) -> Result<Self, Error> {
        debug!(host, port, user, "connecting to controller");

        let ssh_config = Arc::new(client::Config::default());
        let connect = client::connect(ssh_config, (host, port), AcceptingHost);
        let mut handle = tokio::time::timeout(config.connect_timeout, connect)
            .await
            .map_err(|_| Error::Connection {
                host: host.to_owned(),
                message: format!("no SSH handshake within {:?}", config.connect_timeout),
            })?
            .map_err(|e| Error::Connection {
                host: host.to_owned(),
                message: e.to_string(),
            })?;

        let authenticated = handle
            .authenticate_password(user, password.expose_secret())
            .await?;
        if !authenticated {
            return Err(Error::AuthenticationFailed {
                user: user.to_owned(),
            });
        }

        debug!(host, "controller session established");
        Ok(Self { handle, config })
    }

    /// Run one command and return its complete, de-paginated output.
    ///
    /// Writes the command plus a newline, then drains the channel. Every
    /// `--More--` marker stripped by the pager is answered with a single
    /// space. Completion is quiescence: no bytes for the inactivity window.
    pub async fn run(&mut self, command: &str) -> Result<String, Error> {
        debug!(command, "running controller command");

        let channel = self.handle.channel_open_session().await?;
        channel
            .request_pty(false, "vt100", 200, 100, 0, 0, &[])
            .await?;
        channel.request_shell(false).await?;
        channel.data(format!("{command}\n").as_bytes()).await?;

        let mut channel = channel;
        let mut pager = PageBuffer::new();
        let deadline = Instant::now() + self.config.command_timeout;

        loop {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Err(Error::CommandTimeout {
                    command: command.to_owned(),
                    timeout: self.config.command_timeout,
                });
            };
            let window = self.config.inactivity_window.min(remaining);

            match tokio::time::timeout(window, channel.wait()).await {
                // Quiescent, or the channel itself closed: command is done.
                Err(_elapsed) => {
                    if remaining <= self.config.inactivity_window {
                        // Silence only observed because the hard cap cut the
                        // window short — treat it as a timeout, not success.
                        return Err(Error::CommandTimeout {
                            command: command.to_owned(),
                            timeout: self.config.command_timeout,
                        });
                    }
                    trace!(collected = pager.len(), "output quiescent");
                    break;
                }
                Ok(None) => {
                    debug!("channel closed by remote");
                    break;
                }
                Ok(Some(ChannelMsg::Data { data })) => {
                    let owed = pager.feed(&data);
                    for _ in 0..owed {
                        trace!("answering pagination prompt");
                        channel.data(CONTINUE_KEYSTROKE).await?;
                    }
                }
                Ok(Some(ChannelMsg::ExtendedData { data, .. })) => {
                    // Stderr from a PTY shell is rare; fold it in anyway.
                    let owed = pager.feed(&data);
                    for _ in 0..owed {
                        channel.data(CONTINUE_KEYSTROKE).await?;
                    }
                }
                Ok(Some(_)) => {}
            }
        }

        if let Err(e) = channel.eof().await {
            warn!(error = %e, "channel teardown failed");
        }
        Ok(pager.into_output())
    }

    /// Politely tear the session down.
    pub async fn close(&mut self) -> Result<(), Error> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await?;
        Ok(())
    }
}

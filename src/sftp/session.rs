use russh::client::{self, Config, Handle, Msg};
use russh::keys::{PrivateKeyWithHashAlg, load_secret_key};
use russh::{Channel, Disconnect};
use russh_sftp::client::SftpSession;
use std::sync::Arc;
use std::time::Duration;

use super::handler::ClientHandler;
use crate::auth::{Credentials, Secret};
use crate::error::{Error, Result};
use crate::known_hosts::default_known_hosts_path;

/// One established, authenticated connection to one remote host.
///
/// Owns the transport handle for its whole lifetime and lends out one
/// short-lived sub-channel per operation. Dropping the transport tears the
/// connection down without the disconnect exchange; [`Transport::close`] is
/// the graceful path.
pub(crate) struct Transport {
    handle: Handle<ClientHandler>,
    host: String,
}

impl Transport {
    /// Connect to `host` and authenticate with the configured credentials.
    ///
    /// Fails before any I/O when no credential is set. When the handshake
    /// succeeds but authentication is rejected, the half-open connection is
    /// torn down before the error surfaces, so no partial session is left
    /// behind.
    pub(crate) async fn establish(
        host: &str,
        port: u16,
        credentials: &Credentials,
        inactivity_timeout: Option<Duration>,
    ) -> Result<Self> {
        let user = credentials.user().ok_or(Error::NoCredentials)?;
        let secret = credentials.secret().ok_or(Error::NoCredentials)?;

        let config = Arc::new(Config {
            inactivity_timeout,
            ..Default::default()
        });
        let handler = ClientHandler {
            host: host.to_string(),
            port,
            known_hosts: credentials
                .known_hosts()
                .map(|path| path.to_path_buf())
                .or_else(default_known_hosts_path),
        };

        tracing::debug!(host, port, "connecting");
        let mut handle = client::connect(config, (host, port), handler)
            .await
            .map_err(|e| match e {
                Error::Protocol(russh::Error::UnknownKey) => Error::HostKeyRejected {
                    host: host.to_string(),
                    port,
                },
                Error::Protocol(inner) => Error::Connection {
                    host: host.to_string(),
                    reason: inner.to_string(),
                },
                other => other,
            })?;

        if let Err(e) = Self::authenticate(&mut handle, user, secret).await {
            // Tear the half-open connection down before surfacing the error.
            let _ = handle.disconnect(Disconnect::ByApplication, "", "en").await;
            return Err(e);
        }

        tracing::debug!(host, user, "connected and authenticated");
        Ok(Self {
            handle,
            host: host.to_string(),
        })
    }

    async fn authenticate(
        handle: &mut Handle<ClientHandler>,
        user: &str,
        secret: &Secret,
    ) -> Result<()> {
        match secret {
            Secret::Password(password) => {
                let outcome = handle.authenticate_password(user, password.as_str()).await?;
                if !outcome.success() {
                    return Err(Error::AuthRejected {
                        user: user.to_string(),
                    });
                }
            }
            Secret::PrivateKeyFile(path) => {
                let key = load_secret_key(path, None).map_err(|e| Error::KeyLoad {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                let hash_alg = handle.best_supported_rsa_hash().await?.flatten();
                let outcome = handle
                    .authenticate_publickey(
                        user,
                        PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg),
                    )
                    .await?;
                if !outcome.success() {
                    return Err(Error::AuthRejected {
                        user: user.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Open a fresh session channel for one exec exchange.
    pub(crate) async fn open_channel(&self) -> Result<Channel<Msg>> {
        self.handle
            .channel_open_session()
            .await
            .map_err(|e| Error::Channel {
                reason: e.to_string(),
            })
    }

    /// Open a disposable SFTP sub-client over a fresh channel. The caller
    /// owns it for exactly one operation and releases it afterwards.
    pub(crate) async fn open_sftp(&self) -> Result<SftpSession> {
        let channel = self.open_channel().await?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| Error::Channel {
                reason: format!("sftp subsystem request failed: {e}"),
            })?;
        SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| Error::Channel {
                reason: format!("sftp session init failed: {e}"),
            })
    }

    /// Graceful close. Best-effort: a failure to send the disconnect
    /// message is logged and otherwise ignored.
    pub(crate) async fn close(self) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            tracing::debug!(host = %self.host, error = %e, "disconnect failed, dropping connection");
        }
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }
}

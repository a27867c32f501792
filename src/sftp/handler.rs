use russh::client;
use russh::keys::known_hosts::check_known_hosts_path;
use russh::keys::ssh_key;
use std::path::PathBuf;

use crate::error::Error;

/// Transport event handler. Host-key trust is delegated entirely to the
/// known-hosts source: an unknown key, a changed key, or an unreadable
/// known-hosts file all reject the connection.
pub(crate) struct ClientHandler {
    pub(crate) host: String,
    pub(crate) port: u16,
    /// Effective known-hosts file; `None` when no path could be determined.
    pub(crate) known_hosts: Option<PathBuf>,
}

impl client::Handler for ClientHandler {
    type Error = Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &ssh_key::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        let Some(known_hosts) = &self.known_hosts else {
            tracing::warn!(
                host = %self.host,
                "could not determine a known_hosts path, rejecting server key"
            );
            return Ok(false);
        };

        match check_known_hosts_path(&self.host, self.port, server_public_key, known_hosts) {
            Ok(true) => Ok(true),
            Ok(false) => {
                tracing::warn!(
                    host = %self.host,
                    port = self.port,
                    "server key not found in {:?}, rejecting",
                    known_hosts
                );
                Ok(false)
            }
            Err(russh::keys::Error::KeyChanged { line }) => {
                tracing::warn!(
                    host = %self.host,
                    port = self.port,
                    line,
                    "server key differs from the one recorded in {:?}, rejecting",
                    known_hosts
                );
                Ok(false)
            }
            Err(e) => {
                tracing::warn!(
                    host = %self.host,
                    "failed to read known_hosts {:?}: {}, rejecting",
                    known_hosts,
                    e
                );
                Ok(false)
            }
        }
    }
}

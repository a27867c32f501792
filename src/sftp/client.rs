use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use super::operations;
use super::session::Transport;
use crate::auth::Credentials;
use crate::client::{DirEntry, SshClient};
use crate::error::Result;

/// Connection options for [`RusshClient`].
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// SSH port (default: 22).
    pub port: u16,
    /// Transport-internal inactivity timeout. `None` disables it.
    pub inactivity_timeout: Option<Duration>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            port: 22,
            inactivity_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl ConnectOptions {
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn inactivity_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.inactivity_timeout = timeout;
        self
    }
}

/// The russh-based backend: SSH transport with SFTP file operations and
/// exec-channel command execution.
///
/// Wraps at most one live [`Transport`]; every file or exec operation runs
/// over its own disposable sub-channel of that transport.
pub struct RusshClient {
    credentials: Credentials,
    options: ConnectOptions,
    transport: Option<Transport>,
}

impl RusshClient {
    pub fn new() -> Self {
        Self::with_options(ConnectOptions::default())
    }

    pub fn with_options(options: ConnectOptions) -> Self {
        Self {
            credentials: Credentials::new(),
            options,
            transport: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    fn transport(&self) -> Result<&Transport> {
        self.transport
            .as_ref()
            .ok_or(crate::error::Error::NotConnected)
    }
}

impl Default for RusshClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SshClient for RusshClient {
    fn auth_user_password(&mut self, user: &str, password: &str) {
        self.credentials.set_password(user, password);
    }

    fn auth_user_public_key(&mut self, user: &str, private_key: &Path) {
        self.credentials.set_private_key(user, private_key);
    }

    fn set_known_hosts(&mut self, known_hosts: &Path) {
        self.credentials.set_known_hosts(known_hosts);
    }

    async fn connect(&mut self, host: &str) -> Result<()> {
        if self.transport.is_some() {
            tracing::debug!(host, "already connected, reusing live session");
            return Ok(());
        }
        let transport = Transport::establish(
            host,
            self.options.port,
            &self.credentials,
            self.options.inactivity_timeout,
        )
        .await?;
        self.transport = Some(transport);
        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Some(transport) = self.transport.take() {
            transport.close().await;
        }
    }

    async fn download(&self, remote_path: &str, local: &Path) -> Result<()> {
        operations::download(self.transport()?, remote_path, local).await
    }

    async fn upload(&self, local: &Path, remote_path: &str) -> Result<()> {
        operations::upload(self.transport()?, local, remote_path).await
    }

    async fn rename(&self, old_remote_path: &str, new_remote_path: &str) -> Result<()> {
        operations::rename(self.transport()?, old_remote_path, new_remote_path).await
    }

    async fn copy(&self, old_remote_path: &str, new_remote_path: &str) -> Result<()> {
        operations::copy(self.transport()?, old_remote_path, new_remote_path).await
    }

    async fn delete(&self, remote_path: &str) -> Result<()> {
        operations::delete(self.transport()?, remote_path).await
    }

    async fn file_exists(&self, remote_path: &str) -> Result<bool> {
        operations::file_exists(self.transport()?, remote_path).await
    }

    async fn list_children(&self, remote_path: &str) -> Result<Vec<DirEntry>> {
        operations::list_children(self.transport()?, remote_path).await
    }

    async fn execute(&self, command: &str) -> Result<()> {
        operations::execute(self.transport()?, command).await
    }
}

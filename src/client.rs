//! The capability contract shared by all backends.
//!
//! A backend is a strategy object chosen at construction time; callers hold
//! a `dyn SshClient` (or a concrete backend) and get identical observable
//! behavior regardless of the transport stack underneath.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Kind of an immediate child of a remote directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything that is neither a regular file nor a directory
    /// (symlinks, sockets, devices).
    Other,
}

/// One immediate child of a remote directory, as reported by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Remote file and command operations over one SSH connection.
///
/// Lifecycle: configure credentials with the `auth_user_*` setters, then
/// `connect`, then any number of operations, then `disconnect`. Each
/// operation runs over its own short-lived sub-channel of the live session
/// and completes (or fails) before returning; no futures outlive the call.
/// A client instance wraps at most one live session; callers needing
/// concurrent operations use one client per connection.
#[async_trait]
pub trait SshClient: Send {
    /// Configure password authentication. No I/O, no validation; replaces
    /// any previously configured credential of either form.
    fn auth_user_password(&mut self, user: &str, password: &str);

    /// Configure private-key authentication. No I/O, no validation; replaces
    /// any previously configured credential of either form.
    fn auth_user_public_key(&mut self, user: &str, private_key: &Path);

    /// Use the given known-hosts file for host-key verification instead of
    /// the platform default.
    fn set_known_hosts(&mut self, known_hosts: &Path);

    /// Establish and authenticate a session to `host`.
    ///
    /// Fails when no credential is configured. Calling connect on an
    /// already-live session is a no-op: the session is reused without
    /// re-authentication. On failure no partial session is left behind.
    async fn connect(&mut self, host: &str) -> Result<()>;

    /// Release the session. Idempotent and infallible: repeated calls, or a
    /// call without a live session, do nothing.
    async fn disconnect(&mut self);

    /// Copy the full content of `remote_path` into the local file `local`,
    /// overwriting it. A failed transfer may leave a partial local file but
    /// is always reported as an error.
    async fn download(&self, remote_path: &str, local: &Path) -> Result<()>;

    /// Copy the full content of the local file `local` to `remote_path`,
    /// overwriting any existing remote content.
    async fn upload(&self, local: &Path, remote_path: &str) -> Result<()>;

    /// Server-side rename. Fails when the source does not exist.
    async fn rename(&self, old_remote_path: &str, new_remote_path: &str) -> Result<()>;

    /// Server-side duplication: after success the new path holds content
    /// identical to the old path.
    async fn copy(&self, old_remote_path: &str, new_remote_path: &str) -> Result<()>;

    /// Remove a single remote file. Not recursive; fails when missing.
    async fn delete(&self, remote_path: &str) -> Result<()>;

    /// Whether `remote_path` exists. A missing path is `Ok(false)`, never an
    /// error; only genuine connection or protocol faults fail.
    async fn file_exists(&self, remote_path: &str) -> Result<bool>;

    /// List the immediate children of a remote directory, excluding `.` and
    /// `..`. Order is backend-defined. An existing empty directory yields an
    /// empty vector.
    async fn list_children(&self, remote_path: &str) -> Result<Vec<DirEntry>>;

    /// Names of all immediate children.
    async fn list_children_names(&self, remote_path: &str) -> Result<Vec<String>> {
        Ok(self
            .list_children(remote_path)
            .await?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Names of the immediate children that are directories.
    async fn list_children_folder_names(&self, remote_path: &str) -> Result<Vec<String>> {
        Ok(self
            .list_children(remote_path)
            .await?
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Directory)
            .map(|entry| entry.name)
            .collect())
    }

    /// Names of the immediate children that are regular files.
    async fn list_children_file_names(&self, remote_path: &str) -> Result<Vec<String>> {
        Ok(self
            .list_children(remote_path)
            .await?
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::File)
            .map(|entry| entry.name)
            .collect())
    }

    /// Run `command` in a remote shell session. Output and exit status are
    /// not surfaced. The command string is passed to the remote shell as-is;
    /// quoting is the caller's responsibility. Backends without command
    /// execution capability fail instead of silently doing nothing.
    async fn execute(&self, command: &str) -> Result<()>;
}

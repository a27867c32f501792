//! Per-operation channel handling.
//!
//! Every operation acquires one fresh sub-resource from the live transport
//! (an SFTP sub-client or an exec channel), performs exactly one protocol
//! exchange, and releases the sub-resource on every exit path. No two
//! operations share a sub-channel, so a failure in one cannot leak state
//! into another.

use russh_sftp::client::SftpSession;
use russh_sftp::client::error::Error as SftpError;
use russh_sftp::protocol::StatusCode;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::session::Transport;
use crate::client::{DirEntry, EntryKind};
use crate::error::{Error, Result};

fn remote_io(operation: &'static str, path: &str, e: impl std::fmt::Display) -> Error {
    Error::RemoteIo {
        operation,
        path: path.to_string(),
        reason: e.to_string(),
    }
}

fn local_io(path: &Path, e: std::io::Error) -> Error {
    Error::LocalIo {
        path: path.to_path_buf(),
        source: e,
    }
}

/// Release a per-operation SFTP sub-client. The operation outcome is decided
/// before this runs; a failure to close is logged, never surfaced.
async fn release(sftp: SftpSession) {
    if let Err(e) = sftp.close().await {
        tracing::debug!(error = %e, "failed to close sftp sub-client");
    }
}

pub(crate) async fn download(transport: &Transport, remote_path: &str, local: &Path) -> Result<()> {
    tracing::debug!(host = transport.host(), remote_path, ?local, "downloading");
    let sftp = transport.open_sftp().await?;
    let result = download_via(&sftp, remote_path, local).await;
    release(sftp).await;
    result
}

async fn download_via(sftp: &SftpSession, remote_path: &str, local: &Path) -> Result<()> {
    let mut remote_file = sftp
        .open(remote_path)
        .await
        .map_err(|e| remote_io("download", remote_path, e))?;
    let mut contents = Vec::new();
    remote_file
        .read_to_end(&mut contents)
        .await
        .map_err(|e| remote_io("download", remote_path, e))?;

    let mut local_file = tokio::fs::File::create(local)
        .await
        .map_err(|e| local_io(local, e))?;
    local_file
        .write_all(&contents)
        .await
        .map_err(|e| local_io(local, e))?;
    local_file.flush().await.map_err(|e| local_io(local, e))?;
    Ok(())
}

pub(crate) async fn upload(transport: &Transport, local: &Path, remote_path: &str) -> Result<()> {
    tracing::debug!(host = transport.host(), ?local, remote_path, "uploading");
    let sftp = transport.open_sftp().await?;
    let result = upload_via(&sftp, local, remote_path).await;
    release(sftp).await;
    result
}

async fn upload_via(sftp: &SftpSession, local: &Path, remote_path: &str) -> Result<()> {
    let contents = tokio::fs::read(local).await.map_err(|e| local_io(local, e))?;

    // create() truncates, so existing remote content is overwritten.
    let mut remote_file = sftp
        .create(remote_path)
        .await
        .map_err(|e| remote_io("upload", remote_path, e))?;
    remote_file
        .write_all(&contents)
        .await
        .map_err(|e| remote_io("upload", remote_path, e))?;
    remote_file
        .shutdown()
        .await
        .map_err(|e| remote_io("upload", remote_path, e))?;
    Ok(())
}

pub(crate) async fn rename(
    transport: &Transport,
    old_remote_path: &str,
    new_remote_path: &str,
) -> Result<()> {
    tracing::debug!(
        host = transport.host(),
        old_remote_path,
        new_remote_path,
        "renaming"
    );
    let sftp = transport.open_sftp().await?;
    let result = sftp
        .rename(old_remote_path, new_remote_path)
        .await
        .map_err(|e| remote_io("rename", old_remote_path, e));
    release(sftp).await;
    result
}

pub(crate) async fn copy(
    transport: &Transport,
    old_remote_path: &str,
    new_remote_path: &str,
) -> Result<()> {
    tracing::debug!(
        host = transport.host(),
        old_remote_path,
        new_remote_path,
        "copying"
    );
    let sftp = transport.open_sftp().await?;
    let result = copy_via(&sftp, old_remote_path, new_remote_path).await;
    release(sftp).await;
    result
}

// Read-then-rewrite through the transfer channel; works without a remote
// shell and needs no quoting of the paths.
async fn copy_via(sftp: &SftpSession, old_remote_path: &str, new_remote_path: &str) -> Result<()> {
    let mut source = sftp
        .open(old_remote_path)
        .await
        .map_err(|e| remote_io("copy", old_remote_path, e))?;
    let mut contents = Vec::new();
    source
        .read_to_end(&mut contents)
        .await
        .map_err(|e| remote_io("copy", old_remote_path, e))?;

    let mut target = sftp
        .create(new_remote_path)
        .await
        .map_err(|e| remote_io("copy", new_remote_path, e))?;
    target
        .write_all(&contents)
        .await
        .map_err(|e| remote_io("copy", new_remote_path, e))?;
    target
        .shutdown()
        .await
        .map_err(|e| remote_io("copy", new_remote_path, e))?;
    Ok(())
}

pub(crate) async fn delete(transport: &Transport, remote_path: &str) -> Result<()> {
    tracing::debug!(host = transport.host(), remote_path, "deleting");
    let sftp = transport.open_sftp().await?;
    let result = sftp
        .remove_file(remote_path)
        .await
        .map_err(|e| remote_io("delete", remote_path, e));
    release(sftp).await;
    result
}

pub(crate) async fn file_exists(transport: &Transport, remote_path: &str) -> Result<bool> {
    let sftp = transport.open_sftp().await?;
    let result = match sftp.metadata(remote_path).await {
        Ok(_) => Ok(true),
        Err(SftpError::Status(status)) if status.status_code == StatusCode::NoSuchFile => Ok(false),
        Err(e) => Err(remote_io("stat", remote_path, e)),
    };
    release(sftp).await;
    result
}

pub(crate) async fn list_children(transport: &Transport, remote_path: &str) -> Result<Vec<DirEntry>> {
    tracing::debug!(host = transport.host(), remote_path, "listing children");
    let sftp = transport.open_sftp().await?;
    let result = list_children_via(&sftp, remote_path).await;
    release(sftp).await;
    result
}

async fn list_children_via(sftp: &SftpSession, remote_path: &str) -> Result<Vec<DirEntry>> {
    let entries = sftp
        .read_dir(remote_path)
        .await
        .map_err(|e| remote_io("list", remote_path, e))?;

    let mut children = Vec::new();
    for entry in entries {
        let name = entry.file_name();
        // READDIR reports the directory itself and its parent; neither is a
        // child.
        if name == "." || name == ".." {
            continue;
        }
        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        children.push(DirEntry { name, kind });
    }
    Ok(children)
}

pub(crate) async fn execute(transport: &Transport, command: &str) -> Result<()> {
    tracing::debug!(host = transport.host(), command, "executing");
    let mut channel = transport.open_channel().await?;

    if let Err(e) = channel.exec(true, command).await {
        let _ = channel.close().await;
        return Err(Error::Exec {
            command: command.to_string(),
            reason: e.to_string(),
        });
    }

    // Drain until the server closes the channel. Output and exit status are
    // not part of the contract; draining keeps the channel release
    // deterministic and lets the command finish server-side.
    while channel.wait().await.is_some() {}
    Ok(())
}

//! Error types for remote file and command operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a failure, independent of the backend that
/// produced it. Callers that only need to branch on the class of fault
/// match on this instead of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or rejected credentials.
    Auth,
    /// No usable connection: unreachable host, rejected host key,
    /// unestablished session, or a failed channel open.
    Connection,
    /// An operation failed against an established connection.
    RemoteIo,
    /// The backend does not provide the requested capability.
    Unsupported,
}

/// Errors raised by [`SshClient`](crate::client::SshClient) operations.
///
/// Transport-library faults are wrapped here, never passed through raw, so
/// callers depend on this taxonomy regardless of the backend in use.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither a password nor a private key was configured before connect.
    #[error("no credentials configured; call auth_user_password or auth_user_public_key first")]
    NoCredentials,

    /// The private key file could not be read or parsed.
    #[error("failed to load private key '{path}': {reason}", path = .path.display())]
    KeyLoad { path: PathBuf, reason: String },

    /// The server rejected the configured credentials.
    #[error("authentication rejected for user '{user}'")]
    AuthRejected { user: String },

    /// An operation was invoked without a live session.
    #[error("not connected; call connect first")]
    NotConnected,

    /// The server key was not accepted by the known-hosts source.
    #[error("host key verification failed for {host}:{port}")]
    HostKeyRejected { host: String, port: u16 },

    /// The connection could not be established.
    #[error("connection to '{host}' failed: {reason}")]
    Connection { host: String, reason: String },

    /// A per-operation sub-channel could not be acquired.
    #[error("failed to open channel: {reason}")]
    Channel { reason: String },

    /// A remote operation failed on an established connection.
    #[error("remote {operation} failed on '{path}': {reason}")]
    RemoteIo {
        operation: &'static str,
        path: String,
        reason: String,
    },

    /// Local filesystem I/O failed during a transfer.
    #[error("local I/O failed on '{path}': {source}", path = .path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A remote command could not be started.
    #[error("remote command '{command}' failed: {reason}")]
    Exec { command: String, reason: String },

    /// The backend lacks the requested capability.
    #[error("'{operation}' is not supported by this backend")]
    Unsupported { operation: &'static str },

    /// A fault inside the SSH transport itself.
    #[error("ssh protocol error: {0}")]
    Protocol(#[from] russh::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoCredentials | Error::KeyLoad { .. } | Error::AuthRejected { .. } => {
                ErrorKind::Auth
            }
            Error::NotConnected
            | Error::HostKeyRejected { .. }
            | Error::Connection { .. }
            | Error::Channel { .. }
            | Error::Protocol(_) => ErrorKind::Connection,
            Error::RemoteIo { .. } | Error::LocalIo { .. } | Error::Exec { .. } => {
                ErrorKind::RemoteIo
            }
            Error::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RemoteIo {
            operation: "download",
            path: "/etc/motd".to_string(),
            reason: "no such file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote download failed on '/etc/motd': no such file"
        );

        let err = Error::HostKeyRejected {
            host: "example.org".to_string(),
            port: 22,
        };
        assert_eq!(
            err.to_string(),
            "host key verification failed for example.org:22"
        );

        let err = Error::Unsupported { operation: "execute" };
        assert_eq!(err.to_string(), "'execute' is not supported by this backend");
    }

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(Error::NoCredentials.kind(), ErrorKind::Auth);
        assert_eq!(
            Error::AuthRejected {
                user: "vagrant".to_string()
            }
            .kind(),
            ErrorKind::Auth
        );
        assert_eq!(Error::NotConnected.kind(), ErrorKind::Connection);
        assert_eq!(
            Error::Channel {
                reason: "eof".to_string()
            }
            .kind(),
            ErrorKind::Connection
        );
        assert_eq!(
            Error::Protocol(russh::Error::UnknownKey).kind(),
            ErrorKind::Connection
        );
        assert_eq!(
            Error::Exec {
                command: "true".to_string(),
                reason: "closed".to_string()
            }
            .kind(),
            ErrorKind::RemoteIo
        );
        assert_eq!(
            Error::Unsupported { operation: "execute" }.kind(),
            ErrorKind::Unsupported
        );
    }
}

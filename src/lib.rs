//! Uniform remote file and command operations over SSH.
//!
//! One capability contract ([`SshClient`]) — authenticate, connect, transfer
//! files, manipulate remote paths, list directories, execute commands —
//! realized by swappable backends. [`RusshClient`] is the reference backend,
//! speaking SSH/SFTP through russh.

pub mod auth;
pub mod client;
pub mod error;
pub mod known_hosts;
pub mod sftp;

pub use auth::{Credentials, Secret};
pub use client::{DirEntry, EntryKind, SshClient};
pub use error::{Error, ErrorKind, Result};
pub use sftp::{ConnectOptions, RusshClient};

//! The reference backend: SSH transport via russh, file operations via the
//! SFTP subsystem (russh-sftp), command execution via exec channels.
//!
//! One [`Transport`](session::Transport) per connected client; one
//! disposable sub-channel per operation.

pub mod client;
mod handler;
mod operations;
mod session;

pub use client::{ConnectOptions, RusshClient};

use directories::BaseDirs;
use std::path::PathBuf;

/// Get the default known_hosts file path (`~/.ssh/known_hosts`).
///
/// Returns `None` when no home directory can be determined for the current
/// user, in which case host keys cannot be verified and connections are
/// rejected.
pub fn default_known_hosts_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".ssh").join("known_hosts"))
}

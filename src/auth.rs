//! Credential material held prior to connecting.

use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// A configured secret. Exactly one of the two forms is held at a time;
/// setting the other form replaces it.
#[derive(Clone)]
pub enum Secret {
    Password(Zeroizing<String>),
    PrivateKeyFile(PathBuf),
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Password(_) => f.write_str("Password(***)"),
            Secret::PrivateKeyFile(path) => f.debug_tuple("PrivateKeyFile").field(path).finish(),
        }
    }
}

/// User, secret, and known-hosts source for a connection. Pure data:
/// nothing is validated or touched on disk until connect.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    user: Option<String>,
    secret: Option<Secret>,
    known_hosts: Option<PathBuf>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure password authentication. Replaces the user and any
    /// previously configured secret of either form.
    pub fn set_password(&mut self, user: &str, password: &str) {
        self.user = Some(user.to_string());
        self.secret = Some(Secret::Password(Zeroizing::new(password.to_string())));
    }

    /// Configure private-key authentication. Replaces the user and any
    /// previously configured secret of either form. The key file is read
    /// at connect time, not here.
    pub fn set_private_key(&mut self, user: &str, private_key: &Path) {
        self.user = Some(user.to_string());
        self.secret = Some(Secret::PrivateKeyFile(private_key.to_path_buf()));
    }

    /// Use the given known-hosts file instead of the platform default.
    pub fn set_known_hosts(&mut self, path: &Path) {
        self.known_hosts = Some(path.to_path_buf());
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn secret(&self) -> Option<&Secret> {
        self.secret.as_ref()
    }

    pub fn known_hosts(&self) -> Option<&Path> {
        self.known_hosts.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_overwrite_each_other() {
        let mut credentials = Credentials::new();

        credentials.set_password("alice", "secret");
        assert_eq!(credentials.user(), Some("alice"));
        assert!(matches!(credentials.secret(), Some(Secret::Password(_))));

        // Last call wins, across secret forms.
        credentials.set_private_key("bob", Path::new("/home/bob/.ssh/id_ed25519"));
        assert_eq!(credentials.user(), Some("bob"));
        assert!(matches!(
            credentials.secret(),
            Some(Secret::PrivateKeyFile(_))
        ));

        credentials.set_password("carol", "hunter2");
        assert_eq!(credentials.user(), Some("carol"));
        assert!(matches!(credentials.secret(), Some(Secret::Password(_))));
    }

    #[test]
    fn test_unset_by_default() {
        let credentials = Credentials::new();
        assert!(credentials.user().is_none());
        assert!(credentials.secret().is_none());
        assert!(credentials.known_hosts().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut credentials = Credentials::new();
        credentials.set_password("alice", "topsecret");
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("Password(***)"));
    }
}

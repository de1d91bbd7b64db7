use std::fmt;

use tracing::{debug, warn};

use super::credentials::TokenStore;

/// The process's single admin session.
///
/// Holds at most one bearer token. Every change is written through to the
/// backing `TokenStore`; storage failures are logged and never surface, so
/// setting or clearing a credential cannot fail.
pub struct Session {
    store: Box<dyn TokenStore>,
    token: Option<String>,
}

impl Session {
    /// Create an empty session. Call `restore()` to pick up a persisted token.
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self { store, token: None }
    }

    /// Create a session and immediately restore any persisted token.
    pub fn restored(store: Box<dyn TokenStore>) -> Self {
        let mut session = Self::new(store);
        session.restore();
        session
    }

    /// Load the persisted token, replacing whatever is held.
    ///
    /// Returns whether a token was found.
    pub fn restore(&mut self) -> bool {
        match self.store.load() {
            Ok(token) => {
                let token = usable(token);
                debug!(found = token.is_some(), "Session restored");
                self.token = token;
            }
            Err(e) => {
                warn!(error = %e, "Failed to restore session");
                self.token = None;
            }
        }
        self.token.is_some()
    }

    /// Store or clear the token, persisting the change.
    ///
    /// An empty or blank token clears the session.
    pub fn set(&mut self, token: Option<String>) {
        let token = usable(token);
        let result = match token.as_deref() {
            Some(value) => self.store.save(value),
            None => self.store.remove(),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist session token");
        }
        self.token = token;
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Get the bearer token if one is held
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Trimmed token, `None` when nothing is left.
fn usable(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{FileTokenStore, MemoryTokenStore};

    struct BrokenStore;

    impl TokenStore for BrokenStore {
        fn load(&self) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn save(&self, _token: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn remove(&self) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
    }

    #[test]
    fn test_set_and_clear() {
        let mut session = Session::new(Box::new(MemoryTokenStore::new()));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);

        session.set(Some("tok".to_string()));
        assert_eq!(session.token(), Some("tok"));

        session.clear();
        assert_eq!(session.token(), None);
        assert!(!session.restore());
    }

    #[test]
    fn test_restore_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = Session::new(Box::new(FileTokenStore::new(dir.path().to_path_buf())));
        first.set(Some("persisted".to_string()));

        let second = Session::restored(Box::new(FileTokenStore::new(dir.path().to_path_buf())));
        assert_eq!(second.token(), Some("persisted"));

        first.clear();
        let third = Session::restored(Box::new(FileTokenStore::new(dir.path().to_path_buf())));
        assert!(!third.is_authenticated());
    }

    #[test]
    fn test_storage_failures_do_not_surface() {
        let mut session = Session::new(Box::new(BrokenStore));
        assert!(!session.restore());

        session.set(Some("still-held".to_string()));
        assert_eq!(session.token(), Some("still-held"));

        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_blank_token_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());
        let path = store.path();
        let mut session = Session::new(Box::new(store));

        session.set(Some("tok".to_string()));
        assert!(path.exists());

        session.set(Some(String::new()));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert!(!path.exists());

        session.set(Some("tok".to_string()));
        session.set(Some("  \t".to_string()));
        assert!(!session.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn test_restore_ignores_blank_token() {
        let mut session = Session::new(Box::new(MemoryTokenStore::with_token("   ")));
        assert!(!session.restore());
        assert_eq!(session.token(), None);

        let mut session = Session::new(Box::new(MemoryTokenStore::with_token(" tok ")));
        assert!(session.restore());
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn test_debug_hides_token() {
        let mut session = Session::new(Box::new(MemoryTokenStore::new()));
        session.set(Some("very-secret".to_string()));
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("authenticated: true"));
    }
}

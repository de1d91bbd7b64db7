use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use keyring::Entry;

/// Fixed key the admin token is persisted under.
pub const TOKEN_KEY: &str = "admin_token";

const SERVICE_NAME: &str = "sitegate";

/// Durable storage for the bearer token.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, `None` if nothing is stored.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Removing a missing token is not an error.
    fn remove(&self) -> Result<()>;
}

/// Token kept in a plain-text file named `admin_token`.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read token file")?;
        let token = contents.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create token directory")?;
        std::fs::write(self.path(), token).context("Failed to write token file")?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

/// Token kept in the OS keychain.
pub struct KeyringTokenStore {
    service_name: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    pub fn with_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service_name, TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn remove(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

/// Token that lives only as long as the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned slot still holds a usable value
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested"));

        assert_eq!(store.load().unwrap(), None);

        store.save("eyJhbGciOiJIUzI1NiJ9.payload.sig").unwrap();
        assert!(store.path().ends_with(TOKEN_KEY));
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "eyJhbGciOiJIUzI1NiJ9.payload.sig"
        );
        assert_eq!(
            store.load().unwrap().as_deref(),
            Some("eyJhbGciOiJIUzI1NiJ9.payload.sig")
        );

        store.remove().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), None);

        // Removing twice is fine
        store.remove().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());
        std::fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);

        std::fs::write(store.path(), "tok\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn test_keyring_store_persists_across_instances() {
        let service = format!("sitegate-test-{}", std::process::id());
        let writer = KeyringTokenStore::with_service(service.clone());

        // Headless machines may have no keychain to talk to
        if let Err(e) = writer.save("jwt-abc") {
            eprintln!("skipping keyring round trip: {:#}", e);
            return;
        }

        let reader = KeyringTokenStore::with_service(service);
        let loaded = reader.load();
        writer.remove().unwrap();

        assert_eq!(loaded.unwrap().as_deref(), Some("jwt-abc"));
        assert_eq!(reader.load().unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        store.save("def").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("def"));
        store.remove().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}

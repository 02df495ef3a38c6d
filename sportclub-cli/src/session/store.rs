use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::Config;

/// Key under which the bearer token is kept
pub const TOKEN_KEY: &str = "token";

/// Opaque bearer token issued by the backend on login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Durable slot for the credential. Survives restarts, cleared on logout.
pub trait CredentialStore: Send {
    fn get(&self) -> Result<Option<Credential>>;
    fn set(&mut self, credential: &Credential) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Key-value JSON file (~/.sportclub/storage.json). Keys other than `token`
/// are left untouched.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside the config directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("Failed to create storage directory")?;
        }

        let contents = serde_json::to_string_pretty(map).context("Failed to serialize storage")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .context("Failed to restrict storage file permissions")?;
        }

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<Credential>> {
        let map = self.read_map()?;
        Ok(match map.get(TOKEN_KEY) {
            Some(Value::String(token)) if !token.is_empty() => Some(Credential::new(token.clone())),
            _ => None,
        })
    }

    fn set(&mut self, credential: &Credential) -> Result<()> {
        // An unreadable file is replaced rather than blocking login
        let mut map = self.read_map().unwrap_or_default();
        map.insert(
            TOKEN_KEY.to_string(),
            Value::String(credential.as_str().to_string()),
        );
        self.write_map(&map)
    }

    fn clear(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let mut map = self.read_map().unwrap_or_default();
        map.remove(TOKEN_KEY);
        self.write_map(&map)
    }
}

/// In-process store. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(credential))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<Credential>> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set(&mut self, credential: &Credential) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

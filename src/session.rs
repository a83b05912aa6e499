//! Account store: where credentials go after a successful login.
//!
//! Screens receive an `Arc<dyn AccountStore>` at construction time instead
//! of reaching for process-wide state.

use crate::steem::Credential;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

pub trait AccountStore: Send + Sync {
    /// Register a credential. A second login for the same username replaces
    /// the earlier entry.
    fn add_account(&self, credential: Credential) -> Result<()>;

    /// All stored credentials, most recent login last.
    fn accounts(&self) -> Vec<Credential>;

    /// The account the client acts as (the most recent login).
    fn current_account(&self) -> Option<Credential> {
        self.accounts().pop()
    }
}

fn upsert(accounts: &mut Vec<Credential>, credential: Credential) {
    accounts.retain(|existing| existing.username != credential.username);
    accounts.push(credential);
}

/// In-memory store, for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Credential>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccountStore {
    fn add_account(&self, credential: Credential) -> Result<()> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("Account store lock poisoned"))?;
        upsert(&mut accounts, credential);
        Ok(())
    }

    fn accounts(&self) -> Vec<Credential> {
        self.accounts
            .lock()
            .map(|accounts| accounts.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountsFile {
    #[serde(default)]
    accounts: Vec<Credential>,
}

/// JSON-file store, kept on the local machine only.
#[derive(Debug)]
pub struct FileAccountStore {
    path: PathBuf,
    accounts: Mutex<Vec<Credential>>,
}

impl FileAccountStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let accounts = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read account store: {:?}", path))?;
            let file: AccountsFile = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse account store: {:?}", path))?;
            file.accounts
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            accounts: Mutex::new(accounts),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, accounts: &[Credential]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let file = AccountsFile {
            accounts: accounts.to_vec(),
        };
        let content =
            serde_json::to_string_pretty(&file).context("Failed to serialize account store")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write account store: {:?}", self.path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)
                .with_context(|| format!("Failed to get file metadata: {:?}", self.path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", self.path))?;
        }

        Ok(())
    }
}

impl AccountStore for FileAccountStore {
    fn add_account(&self, credential: Credential) -> Result<()> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("Account store lock poisoned"))?;
        let username = credential.username.clone();
        let mut updated = accounts.clone();
        upsert(&mut updated, credential);
        self.persist(&updated)?;
        *accounts = updated;
        info!("Stored account @{} ({} total)", username, accounts.len());
        Ok(())
    }

    fn accounts(&self) -> Vec<Credential> {
        self.accounts
            .lock()
            .map(|accounts| accounts.clone())
            .unwrap_or_default()
    }
}

//! Account lookup and authentication seams.
//!
//! The login screen only talks to the `AccountLookup` and `Authenticator`
//! traits; the RPC-backed implementations live here and tests substitute
//! their own.

use super::client::{AccountInfo, SteemClient};
use super::keys::PrivateKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Authentication failure, shown to the user verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Account @{0} does not exist")]
    AccountNotFound(String),
    #[error("Please enter your password or private key")]
    EmptyPassword,
    #[error("Please enter your username")]
    EmptyUsername,
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Could not reach the Steem network: {0}")]
    Rpc(String),
    #[error("Could not save account: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    Owner,
    Active,
    Posting,
    Memo,
}

/// How the session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// Master password from which every role key derives
    MasterPassword,
    /// A single WIF-encoded private key
    PrivateKey,
    /// Delegated SteemConnect authorization
    SteemConnect,
}

/// The session artifact produced by a successful login.
///
/// Never carries the secret the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub auth_type: AuthType,
    /// Public keys the account publishes, by role
    #[serde(default)]
    pub public_keys: BTreeMap<KeyRole, String>,
    pub logged_in_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(username: impl Into<String>, auth_type: AuthType) -> Self {
        Self {
            username: username.into(),
            auth_type,
            public_keys: BTreeMap::new(),
            logged_in_at: Utc::now(),
        }
    }

    fn from_account(account: &AccountInfo, auth_type: AuthType) -> Self {
        let mut credential = Self::new(account.name.clone(), auth_type);
        for role in KeyRole::ALL {
            if let Some(key) = role_keys(account, role).first() {
                credential.public_keys.insert(role, (*key).to_string());
            }
        }
        credential
    }
}

/// Public keys `account` publishes for `role`
fn role_keys(account: &AccountInfo, role: KeyRole) -> Vec<&str> {
    match role {
        KeyRole::Owner => account.owner.public_keys().collect(),
        KeyRole::Active => account.active.public_keys().collect(),
        KeyRole::Posting => account.posting.public_keys().collect(),
        KeyRole::Memo => vec![account.memo_key.as_str()],
    }
}

/// Remote "which of these names exist" query used for typeahead validation.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Existing account names starting at `prefix`.
    async fn lookup_accounts(&self, prefix: &str) -> anyhow::Result<Vec<String>>;
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError>;
}

#[async_trait]
impl AccountLookup for SteemClient {
    async fn lookup_accounts(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        SteemClient::lookup_accounts(self, prefix, self.lookup_limit()).await
    }
}

const WIF_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Shape check for an uncompressed WIF private key ("5" + 50 base58 chars).
pub fn looks_like_wif(secret: &str) -> bool {
    secret.len() == 51
        && secret.starts_with('5')
        && secret.chars().all(|c| WIF_ALPHABET.contains(c))
}

/// Authenticates by resolving the account on chain and checking that the
/// secret yields one of the public keys the account publishes.
///
/// A WIF key must match a key of any role. A master password is expanded
/// into the owner, active, posting and memo keys and must match the key of
/// the same role.
pub struct AccountAuthenticator {
    client: SteemClient,
}

impl AccountAuthenticator {
    pub fn new(client: SteemClient) -> Self {
        Self { client }
    }
}

/// Classify a secret. Anything starting like a WIF key must be a valid one.
pub fn classify_secret(secret: &str) -> Result<AuthType, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    if looks_like_wif(secret) {
        return Ok(AuthType::PrivateKey);
    }
    if secret.starts_with('5') && secret.len() >= 50 && !secret.contains(char::is_whitespace) {
        return Err(AuthError::InvalidCredentials(
            "malformed private key".to_string(),
        ));
    }
    Ok(AuthType::MasterPassword)
}

/// Check `secret` against the keys of `account`. Returns the role it unlocked.
pub fn verify_secret(
    account: &AccountInfo,
    auth_type: AuthType,
    secret: &str,
) -> Result<KeyRole, AuthError> {
    let matched = match auth_type {
        AuthType::PrivateKey => {
            let public = PrivateKey::from_wif(secret)?.public_key();
            KeyRole::ALL
                .into_iter()
                .find(|role| role_keys(account, *role).contains(&public.as_str()))
        }
        AuthType::MasterPassword => {
            let mut matched = None;
            for role in KeyRole::ALL {
                let public = PrivateKey::from_login(&account.name, role, secret)?.public_key();
                if role_keys(account, role).contains(&public.as_str()) {
                    matched = Some(role);
                    break;
                }
            }
            matched
        }
        AuthType::SteemConnect => None,
    };
    matched.ok_or_else(|| {
        AuthError::InvalidCredentials("wrong password or private key".to_string())
    })
}

#[async_trait]
impl Authenticator for AccountAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        let auth_type = classify_secret(password)?;

        let accounts = self
            .client
            .get_accounts(&[username])
            .await
            .map_err(|e| AuthError::Rpc(format!("{:#}", e)))?;

        let Some(account) = accounts.iter().find(|a| a.name == username) else {
            warn!("Login attempt for unknown account @{}", username);
            return Err(AuthError::AccountNotFound(username.to_string()));
        };

        let role = verify_secret(account, auth_type, password)
            .inspect_err(|_| warn!("Rejected {:?} login for @{}", auth_type, username))?;
        debug!("Secret for @{} matches the {:?} key", username, role);
        info!("Authenticated @{} (id {}) with {:?}", account.name, account.id, auth_type);
        Ok(Credential::from_account(account, auth_type))
    }
}

//! Steem platform access: the JSON-RPC client, key handling and the
//! lookup/auth traits the screens depend on.

pub mod auth;
pub mod client;
pub mod keys;

pub use auth::{
    AccountAuthenticator, AccountLookup, AuthError, AuthType, Authenticator, Credential, KeyRole,
};
pub use client::{AccountInfo, Authority, SteemClient, DEFAULT_LOOKUP_LIMIT, DEFAULT_RPC_URL};
pub use keys::{PrivateKey, PUBLIC_KEY_PREFIX};

//! Application services layer.
//!
//! Services run the work screens must not block on. Screens own the
//! returned handles and poll them each tick.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   UI Layer (App, Screens)    │
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │ LoginService  │  UrlOpener   │
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │ steem (SteemClient, traits)  │
//! └──────────────────────────────┘
//! ```

pub mod login_service;
pub mod url_opener;

pub use login_service::{LoginHandle, LoginService, LookupHandle};
pub use url_opener::{SystemUrlOpener, UrlOpener};

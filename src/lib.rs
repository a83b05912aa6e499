//! eSteem - a terminal client for the Steem social platform
//!
//! This library provides the login flow (username lookup validation,
//! credential and SteemConnect login), the reusable screen header, and the
//! Steem JSON-RPC client they sit on.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod session;
pub mod state;
pub mod steem;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
pub use session::{AccountStore, FileAccountStore, MemoryAccountStore};

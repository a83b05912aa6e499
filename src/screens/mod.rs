//! Screen controllers for the application.
//!
//! Each controller implements the `Screen` trait, owns its state, and
//! answers events with a `ScreenAction` the app applies to the navigation
//! stack.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     App                      │
//! │  Navigator: [Login, SteemConnect, ...]       │
//! │  screens:   [Box<dyn Screen>, ...]  (1:1)    │
//! │                                              │
//! │  top.handle_event(event, ctx) -> ScreenAction│
//! │  top.tick(ctx)                -> ScreenAction│
//! └──────────────────────────────────────────────┘
//! ```

pub mod login;
pub mod pin_code;
pub mod screen_trait;
pub mod steem_connect;

pub use login::{LoginField, LoginScreen};
pub use pin_code::PinCodeScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use steem_connect::SteemConnectScreen;

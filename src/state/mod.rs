//! Screen state that is independent of rendering.
//!
//! Screens keep their interaction logic in plain state types here so it can
//! be driven and asserted on without a terminal.

pub mod login;

pub use login::{LoginForm, LoginPhase, LookupTicket, SubmitOutcome, SubmitTicket};

/// A blocking alert shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

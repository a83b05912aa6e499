//! Login form state.
//!
//! Pure state with no I/O: the screen feeds it edits and async results,
//! and it decides which results still apply. Two async paths touch it:
//!
//! ```text
//!  username edit ──► LookupTicket{generation} ──► apply_lookup(generation, names)
//!                                                 (dropped if generation is stale)
//!
//!  Idle ──begin_submit──► Submitting ──finish_submit(Ok)──► Succeeded
//!                              │
//!                              └──finish_submit(Err)──► Idle
//! ```
//!
//! Once `unmount` is called every late result is ignored.

use crate::steem::{AuthError, Credential};
use crate::utils::{InputFilter, TextInput};
use tracing::debug;

/// Longest account name the chain accepts
pub const MAX_USERNAME_LEN: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    /// Terminal: the screen is about to be replaced.
    Succeeded,
}

/// A lookup the screen should run for `username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub username: String,
}

/// An authentication the screen should run.
#[derive(Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SubmitTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitTicket")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What the screen must do after a login attempt resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Register the credential and leave the screen
    LoggedIn(Credential),
    /// Show this message in a blocking alert
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    username: TextInput,
    password: TextInput,
    phase: LoginPhase,
    is_username_valid: bool,
    lookup_generation: u64,
    mounted: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextInput::new()
                .with_filter(InputFilter::AccountName)
                .with_max_len(MAX_USERNAME_LEN),
            password: TextInput::new(),
            phase: LoginPhase::Idle,
            is_username_valid: true,
            lookup_generation: 0,
            mounted: true,
        }
    }

    pub fn username(&self) -> &str {
        self.username.text()
    }

    pub fn password(&self) -> &str {
        self.password.text()
    }

    pub fn username_input(&self) -> &TextInput {
        &self.username
    }

    pub fn password_input(&self) -> &TextInput {
        &self.password
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase
    }

    /// True from submit until failure; stays true after success.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoginPhase::Submitting | LoginPhase::Succeeded)
    }

    pub fn is_username_valid(&self) -> bool {
        self.is_username_valid
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn lookup_generation(&self) -> u64 {
        self.lookup_generation
    }

    /// Apply `edit` to the username field. When the text changes, returns
    /// the lookup to run for the new value.
    ///
    /// Every change bumps the generation, so results for older text are
    /// dropped even when the new text is empty and needs no lookup.
    pub fn edit_username(
        &mut self,
        edit: impl FnOnce(&mut TextInput) -> bool,
    ) -> Option<LookupTicket> {
        if !self.mounted || !edit(&mut self.username) {
            return None;
        }
        self.lookup_generation += 1;
        let username = self.username.text().to_string();
        if username.is_empty() {
            self.is_username_valid = true;
            return None;
        }
        Some(LookupTicket {
            generation: self.lookup_generation,
            username,
        })
    }

    pub fn set_username(&mut self, value: &str) -> Option<LookupTicket> {
        self.edit_username(|input| {
            let before = input.text().to_string();
            input.set_text(value);
            input.text() != before
        })
    }

    pub fn edit_password(&mut self, edit: impl FnOnce(&mut TextInput) -> bool) -> bool {
        self.mounted && edit(&mut self.password)
    }

    pub fn set_password(&mut self, value: &str) {
        self.edit_password(|input| {
            input.set_text(value);
            true
        });
    }

    /// Record a lookup result. Returns true if it was applied.
    ///
    /// A failed lookup leaves the flag as it was.
    pub fn apply_lookup(&mut self, generation: u64, result: Result<Vec<String>, String>) -> bool {
        if !self.mounted || generation != self.lookup_generation {
            debug!(
                "Dropping lookup result (generation {}, current {})",
                generation, self.lookup_generation
            );
            return false;
        }
        match result {
            Ok(names) => {
                let username = self.username.text();
                self.is_username_valid = names.iter().any(|name| name == username);
                true
            }
            Err(_) => false,
        }
    }

    /// Start a login. `None` unless the form is idle and mounted.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.mounted || self.phase != LoginPhase::Idle {
            return None;
        }
        self.phase = LoginPhase::Submitting;
        Some(SubmitTicket {
            username: self.username.text().to_string(),
            password: self.password.text().to_string(),
        })
    }

    /// Resolve the in-flight login. `None` when there is nothing to do
    /// (no login in flight, or the screen is gone).
    pub fn finish_submit(&mut self, result: Result<Credential, AuthError>) -> Option<SubmitOutcome> {
        if !self.mounted || self.phase != LoginPhase::Submitting {
            return None;
        }
        match result {
            Ok(credential) => {
                self.phase = LoginPhase::Succeeded;
                Some(SubmitOutcome::LoggedIn(credential))
            }
            Err(error) => {
                self.phase = LoginPhase::Idle;
                Some(SubmitOutcome::Failed(error.to_string()))
            }
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

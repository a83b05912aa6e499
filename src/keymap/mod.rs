//! Keymap configuration
//!
//! Customizable keyboard shortcuts: a preset (standard or emacs) plus
//! user overrides from the config file.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, parse_key_string, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Resolve a key event to an action.
    ///
    /// An overridden action shadows every preset binding of the same action.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// Overrides followed by the preset bindings they don't shadow
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|preset| !self.overrides.iter().any(|o| o.action == preset.action)),
        );
        bindings
    }

    /// Display string for the first key bound to `action`
    pub fn get_key_display_for_action(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Footer hint text, e.g. "Next field: Tab | Login: Enter"
    pub fn footer_hints(&self, entries: &[(&str, Action)]) -> String {
        entries
            .iter()
            .map(|(label, action)| format!("{}: {}", label, self.get_key_display_for_action(*action)))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

//! Preset keymaps: Standard and Emacs.
//!
//! Every screen keeps a text field focused, so presets never bind bare
//! printable characters except where a field cannot be focused.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc, Tab
    #[default]
    Standard,
    /// Standard plus Ctrl+A/E/B/F/D line editing
    Emacs,
}

impl KeymapPreset {
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Emacs => emacs_bindings(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

fn standard_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("end", Action::End),
        // Forms
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("tab", Action::NextField),
        KeyBinding::new("shift+tab", Action::PrevField),
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("delete", Action::DeleteChar),
        // Global
        KeyBinding::new("ctrl+c", Action::Quit),
        // Login
        KeyBinding::new("ctrl+n", Action::SignUp),
        KeyBinding::new("ctrl+t", Action::SwitchTab),
        // Header
        KeyBinding::new("ctrl+s", Action::Save),
        KeyBinding::new("ctrl+p", Action::Preview),
        KeyBinding::new("ctrl+g", Action::Submit),
        KeyBinding::new("ctrl+f", Action::Search),
        KeyBinding::new("ctrl+o", Action::Menu),
        KeyBinding::new("ctrl+d", Action::Schedule),
        KeyBinding::new("ctrl+r", Action::RightIcon),
    ]
}

fn emacs_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("ctrl+p", Action::MoveUp),
        KeyBinding::new("ctrl+n", Action::MoveDown),
        KeyBinding::new("ctrl+b", Action::MoveLeft),
        KeyBinding::new("ctrl+f", Action::MoveRight),
        KeyBinding::new("ctrl+a", Action::Home),
        KeyBinding::new("ctrl+e", Action::End),
        KeyBinding::new("ctrl+h", Action::Backspace),
        KeyBinding::new("ctrl+d", Action::DeleteChar),
        KeyBinding::new("ctrl+g", Action::Cancel),
        // Header and login actions move to Alt so Ctrl stays free for editing
        KeyBinding::new("alt+u", Action::SignUp),
        KeyBinding::new("alt+t", Action::SwitchTab),
        KeyBinding::new("alt+s", Action::Save),
        KeyBinding::new("alt+p", Action::Preview),
        KeyBinding::new("alt+enter", Action::Submit),
        KeyBinding::new("alt+f", Action::Search),
        KeyBinding::new("alt+m", Action::Menu),
        KeyBinding::new("alt+d", Action::Schedule),
        KeyBinding::new("alt+r", Action::RightIcon),
    ];

    // Arrows and the remaining form keys behave as in Standard
    let emacs_actions: Vec<Action> = bindings.iter().map(|b| b.action).collect();
    bindings.extend(
        standard_bindings()
            .into_iter()
            .filter(|b| !emacs_actions.contains(&b.action) || is_arrow_or_form_key(&b.key)),
    );
    bindings
}

fn is_arrow_or_form_key(key: &str) -> bool {
    matches!(
        key,
        "up" | "down" | "left" | "right" | "home" | "end" | "esc" | "backspace" | "delete"
    )
}

//! Semantic actions triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// Every user action the client understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Cursor & list movement ============
    /// Move selection up (dropdown menus, dialogs)
    MoveUp,
    /// Move selection down (dropdown menus, dialogs)
    MoveDown,
    /// Move the cursor left
    MoveLeft,
    /// Move the cursor right
    MoveRight,
    /// Jump to start of input
    Home,
    /// Jump to end of input
    End,

    // ============ Forms ============
    /// Activate the focused control (Enter)
    Confirm,
    /// Go back / close (Esc, the device back button)
    Cancel,
    /// Focus the next field
    NextField,
    /// Focus the previous field
    PrevField,
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,

    // ============ Global ============
    /// Quit the application
    Quit,

    // ============ Login ============
    /// Open the sign-up page in the browser
    SignUp,
    /// Switch between the "Sign in" and "SteemConnect" tabs
    SwitchTab,

    // ============ Header affordances ============
    /// Save the current draft
    Save,
    /// Toggle preview
    Preview,
    /// Submit (the header's right button)
    Submit,
    /// Toggle the search input
    Search,
    /// Open the header dropdown menu
    Menu,
    /// Open the date picker
    Schedule,
    /// Press the custom right icon
    RightIcon,
}

impl Action {
    /// Human-readable description, shown in footer hints
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::Home => "Home",
            Action::End => "End",
            Action::Confirm => "Confirm",
            Action::Cancel => "Back",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
            Action::Quit => "Quit",
            Action::SignUp => "Sign up",
            Action::SwitchTab => "Switch tab",
            Action::Save => "Save draft",
            Action::Preview => "Preview",
            Action::Submit => "Submit",
            Action::Search => "Search",
            Action::Menu => "Open menu",
            Action::Schedule => "Schedule",
            Action::RightIcon => "Header action",
        }
    }

    /// Group name, for listing bindings
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End => "Navigation",

            Action::Confirm
            | Action::Cancel
            | Action::NextField
            | Action::PrevField
            | Action::Backspace
            | Action::DeleteChar => "Forms",

            Action::Quit => "Global",

            Action::SignUp | Action::SwitchTab => "Login",

            Action::Save
            | Action::Preview
            | Action::Submit
            | Action::Search
            | Action::Menu
            | Action::Schedule
            | Action::RightIcon => "Header",
        }
    }
}

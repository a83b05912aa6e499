//! Key bindings and key-string parsing ("ctrl+n", "shift+tab", "f5").

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// A single key combination mapped to an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string, e.g. "enter", "ctrl+s", "shift+tab"
    pub key: String,

    /// The action this key triggers
    pub action: Action,

    /// Optional description override (falls back to the action description)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parsed key representation for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
            description: None,
        }
    }

    /// Check if this binding matches the given key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match self.parse() {
            Ok(parsed) => parsed.code == code && parsed.modifiers == modifiers,
            Err(_) => false,
        }
    }

    pub fn parse(&self) -> Result<ParsedKey, String> {
        parse_key_string(&self.key)
    }

    /// Display form, e.g. "Ctrl+S"
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }

    pub fn get_description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.action.description())
    }
}

/// Parse a key string like "ctrl+shift+n" into a code and modifiers.
///
/// Terminals report Shift+Tab as `BackTab` with the shift modifier, so
/// "shift+tab" is normalized to that.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    let parts: Vec<&str> = key.split('+').map(str::trim).collect();
    let (key_part, modifier_parts) = match parts.split_last() {
        Some((last, rest)) if !last.is_empty() => (*last, rest),
        // "ctrl++" style strings bind the plus key itself
        _ if key.ends_with('+') => ("+", &parts[..parts.len().saturating_sub(2)]),
        _ => return Err(format!("Empty key: {:?}", key)),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts {
        match *part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "super" | "meta" | "cmd" => modifiers |= KeyModifiers::SUPER,
            other => return Err(format!("Unknown modifier: {}", other)),
        }
    }

    let mut code = parse_key_code(key_part)?;
    if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
        code = KeyCode::BackTab;
    }
    if code == KeyCode::BackTab {
        modifiers |= KeyModifiers::SHIFT;
    }

    Ok(ParsedKey { code, modifiers })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let code = match key {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unknown key: {}", key)),
            }
        }
    };
    Ok(code)
}

/// Format a key string for display ("ctrl+n" -> "Ctrl+N")
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "ctrl" | "control" => "Ctrl".to_string(),
                "alt" | "option" => "Alt".to_string(),
                "shift" => "Shift".to_string(),
                "super" | "meta" | "cmd" => "Cmd".to_string(),
                "up" => "↑".to_string(),
                "down" => "↓".to_string(),
                "left" => "←".to_string(),
                "right" => "→".to_string(),
                "enter" | "return" => "Enter".to_string(),
                "esc" | "escape" => "Esc".to_string(),
                "space" => "Space".to_string(),
                "tab" => "Tab".to_string(),
                "backtab" => "Shift+Tab".to_string(),
                "backspace" | "bs" => "Backspace".to_string(),
                "delete" | "del" => "Del".to_string(),
                "home" => "Home".to_string(),
                "end" => "End".to_string(),
                _ if part.chars().count() == 1 => part.to_uppercase(),
                _ if part.starts_with('f') && part.len() <= 3 => part.to_uppercase(),
                _ => part,
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let parsed = parse_key_string("?").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('?'));
        assert_eq!(parsed.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let parsed = parse_key_string("ctrl+s").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('s'));
        assert_eq!(parsed.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_shift_tab_becomes_backtab() {
        let parsed = parse_key_string("shift+tab").unwrap();
        assert_eq!(parsed.code, KeyCode::BackTab);
        assert_eq!(parsed.modifiers, KeyModifiers::SHIFT);

        let parsed = parse_key_string("backtab").unwrap();
        assert_eq!(parsed.code, KeyCode::BackTab);
        assert_eq!(parsed.modifiers, KeyModifiers::SHIFT);
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse_key_string("f1").unwrap().code, KeyCode::F(1));
        assert_eq!(parse_key_string("f12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("f13").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_key_string("hyper+x").is_err());
        assert!(parse_key_string("banana").is_err());
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key_display("ctrl+n"), "Ctrl+N");
        assert_eq!(format_key_display("shift+tab"), "Shift+Tab");
        assert_eq!(format_key_display("esc"), "Esc");
        assert_eq!(format_key_display("f5"), "F5");
    }

    #[test]
    fn test_key_binding_matches() {
        let binding = KeyBinding::new("ctrl+s", Action::Save);
        assert!(binding.matches(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!binding.matches(KeyCode::Char('s'), KeyModifiers::NONE));
    }

    #[test]
    fn test_key_binding_description() {
        let mut binding = KeyBinding::new("ctrl+n", Action::SignUp);
        assert_eq!(binding.get_description(), "Sign up");
        binding.description = Some("Create account".to_string());
        assert_eq!(binding.get_description(), "Create account");
    }
}

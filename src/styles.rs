//! Theme and style system
//!
//! One palette per theme type; widgets ask the global theme for semantic
//! styles (input borders, buttons, tabs) instead of picking colors.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::RwLock;

/// Brand blue used for buttons and the active tab
const BRAND_BLUE: Color = Color::Rgb(0x35, 0x7c, 0xe6);

static THEME: RwLock<Theme> = RwLock::new(Theme {
    theme_type: ThemeType::Dark,
    accent: BRAND_BLUE,
    text: Color::White,
    text_muted: Color::Rgb(0x78, 0x81, 0x87),
    invalid: Color::Red,
    success: Color::Green,
    warning: Color::Yellow,
    border: Color::DarkGray,
    border_focused: Color::Cyan,
    button_text: Color::White,
});

/// Install the global theme (startup, or after a config reload)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(std::sync::PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Snapshot of the current theme
pub fn theme() -> Theme {
    THEME
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Terminal defaults only (`NO_COLOR=1`)
    #[serde(alias = "no-color", alias = "no_color")]
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    /// Buttons, active tab, titles
    pub accent: Color,
    pub text: Color,
    /// Secondary labels, information notes, the Cancel button
    pub text_muted: Color,
    /// Border of an input whose username was not found
    pub invalid: Color,
    /// Saved-draft icon
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub border_focused: Color,
    pub button_text: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            accent: BRAND_BLUE,
            text: Color::White,
            text_muted: Color::Rgb(0x78, 0x81, 0x87),
            invalid: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            button_text: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            accent: BRAND_BLUE,
            text: Color::Black,
            text_muted: Color::Rgb(0x78, 0x81, 0x87),
            invalid: Color::Red,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            border: Color::Rgb(0xc1, 0xc5, 0xc7),
            border_focused: BRAND_BLUE,
            button_text: Color::White,
        }
    }

    pub fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            accent: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            invalid: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            button_text: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    pub fn title_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::DIM);
        }
        Style::default().fg(self.text_muted)
    }

    pub fn border_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.border_focused)
    }

    /// Border for a form input: invalid wins over focus
    pub fn input_border_style(&self, focused: bool, valid: bool) -> Style {
        if !valid {
            if self.is_plain() {
                return Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            return Style::default().fg(self.invalid);
        }
        if focused {
            self.border_focused_style()
        } else {
            self.border_style()
        }
    }

    /// Filled button; focused buttons are bold, disabled ones dimmed
    pub fn button_style(&self, focused: bool, enabled: bool) -> Style {
        let mut style = if self.is_plain() {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(self.button_text).bg(self.accent)
        };
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        if !enabled {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }

    /// Text-only button (Cancel, header right button)
    pub fn text_button_style(&self, focused: bool, enabled: bool) -> Style {
        let mut style = if enabled && !self.is_plain() {
            Style::default().fg(self.accent)
        } else {
            self.muted_style()
        };
        if focused {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        style
    }

    pub fn tab_style(&self, active: bool) -> Style {
        if active {
            if self.is_plain() {
                return Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            return Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        self.text_style()
    }

    pub fn saved_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.success)
    }

    pub fn highlight_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::REVERSED);
        }
        Style::default()
            .fg(self.button_text)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_from_str() {
        assert_eq!("dark".parse::<ThemeType>().unwrap(), ThemeType::Dark);
        assert_eq!("LIGHT".parse::<ThemeType>().unwrap(), ThemeType::Light);
        assert_eq!("no-color".parse::<ThemeType>().unwrap(), ThemeType::NoColor);
        assert_eq!("whatever".parse::<ThemeType>().unwrap(), ThemeType::Dark);
    }

    #[test]
    fn test_invalid_border_wins_over_focus() {
        let t = Theme::dark();
        assert_eq!(t.input_border_style(true, false).fg, Some(t.invalid));
        assert_eq!(t.input_border_style(true, true).fg, Some(t.border_focused));
        assert_eq!(t.input_border_style(false, true).fg, Some(t.border));
    }

    #[test]
    fn test_no_color_sets_no_colors() {
        let t = Theme::no_color();
        for style in [
            t.highlight_style(),
            t.input_border_style(false, false),
            t.button_style(true, true),
            t.tab_style(true),
        ] {
            assert!(style.fg.is_none());
            assert!(style.bg.is_none());
        }
    }
}

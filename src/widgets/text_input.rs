//! Form input widget for rendering `TextInput` fields.
//!
//! Renders a bordered single-line field with a placeholder, an optional
//! trailing icon, password masking and a border that turns red when the
//! field is marked invalid.

use crate::styles::theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// A bordered input field.
///
/// # Example
/// ```
/// use esteem::utils::TextInput;
/// use esteem::widgets::TextInputWidget;
///
/// let input = TextInput::with_text("alice");
/// let widget = TextInputWidget::new(&input)
///     .placeholder("Username")
///     .icon("@")
///     .valid(true)
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    placeholder: Option<&'a str>,
    /// Short symbol drawn at the right edge, e.g. "@" for usernames
    icon: Option<&'a str>,
    focused: bool,
    disabled: bool,
    valid: bool,
    masked: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            placeholder: None,
            icon: None,
            focused: false,
            disabled: false,
            valid: true,
            masked: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// An invalid field gets the error border.
    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    fn display_text(&self) -> String {
        let text = self.input.text();
        if text.is_empty() {
            self.placeholder.unwrap_or("").to_string()
        } else if self.masked {
            "•".repeat(text.chars().count())
        } else {
            text.to_string()
        }
    }

    fn text_style(&self) -> Style {
        let t = theme();
        if self.disabled || self.input.is_empty() {
            t.muted_style()
        } else {
            t.text_style()
        }
    }

    fn create_block(&self) -> Block<'a> {
        let t = theme();
        let border_style = if self.disabled {
            t.border_style()
        } else {
            t.input_border_style(self.focused, self.valid)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(icon) = self.icon {
            block = block.title_bottom(Line::from(format!(" {} ", icon)).right_aligned());
        }
        block
    }

    /// Cursor cell inside `inner`, when the field is focused.
    fn cursor_position(&self, inner: Rect) -> Option<Position> {
        if !self.focused || self.disabled || inner.width == 0 || inner.height == 0 {
            return None;
        }
        let cursor = self.input.cursor().min(self.input.text().chars().count());
        let x = inner.x + (cursor as u16).min(inner.width.saturating_sub(1));
        Some(Position::new(x, inner.y))
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.create_block();
        Paragraph::new(self.display_text())
            .block(block)
            .style(self.text_style())
            .render(area, buf);
    }
}

/// Renders a `TextInputWidget` and places the terminal cursor.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let inner = widget.create_block().inner(area);
        let cursor = widget.cursor_position(inner);
        self.render_widget(widget, area);
        if let Some(position) = cursor {
            self.set_cursor_position(position);
        }
    }
}

use crate::keymap::Action;
use crossterm::event::{KeyCode, KeyModifiers};

/// Which characters a field accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFilter {
    /// Any printable character
    #[default]
    Printable,
    /// Account names: lowercase ASCII letters, digits, `.` and `-`.
    /// Uppercase letters are folded to lowercase.
    AccountName,
}

impl InputFilter {
    fn admit(self, c: char) -> Option<char> {
        if c.is_control() {
            return None;
        }
        match self {
            InputFilter::Printable => Some(c),
            InputFilter::AccountName => {
                let c = c.to_ascii_lowercase();
                (c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-').then_some(c)
            }
        }
    }
}

/// A single-line text field: text, a char-indexed cursor and a filter.
///
/// # Example
/// ```
/// use esteem::utils::text_input::{InputFilter, TextInput};
///
/// let mut input = TextInput::new().with_filter(InputFilter::AccountName);
/// input.insert_char('A');
/// input.insert_char('!');
/// input.insert_char('b');
/// assert_eq!(input.text(), "ab");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
    filter: InputFilter,
    max_len: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    pub fn with_filter(mut self, filter: InputFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Cap the field at `max_len` characters.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// True when the field holds nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Replace the contents, dropping rejected characters, cursor to end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text.clear();
        self.cursor = 0;
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert at the cursor. Returns false when the filter or length cap rejects it.
    pub fn insert_char(&mut self, c: char) -> bool {
        let Some(c) = self.filter.admit(c) else {
            return false;
        };
        if self.max_len.is_some_and(|max| self.char_count() >= max) {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor. Returns true if text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Delete the character under the cursor. Returns true if text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Apply a keymap action. Returns `Some(changed)` when the action is an
    /// editing action, `None` when the field doesn't handle it.
    pub fn handle_action(&mut self, action: Action) -> Option<bool> {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Home => self.move_home(),
            Action::End => self.move_end(),
            Action::Backspace => return Some(self.backspace()),
            Action::DeleteChar => return Some(self.delete()),
            _ => return None,
        }
        Some(false)
    }

    /// Feed a key event: mapped actions first, then plain characters.
    ///
    /// Returns true if the text changed.
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        action: Option<Action>,
    ) -> bool {
        if let Some(changed) = action.and_then(|a| self.handle_action(a)) {
            return changed;
        }
        match code {
            KeyCode::Char(c)
                if !modifiers.intersects(
                    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER,
                ) =>
            {
                self.insert_char(c)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_text("helo");
        input.move_left();
        input.move_left();
        assert!(input.insert_char('l'));
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::with_text("hello");
        assert!(input.backspace());
        assert_eq!(input.text(), "hell");
        assert!(!input.delete());
        input.move_home();
        assert!(!input.backspace());
        assert!(input.delete());
        assert_eq!(input.text(), "ell");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_multibyte_text() {
        let mut input = TextInput::with_text("héllo");
        input.move_home();
        input.move_right();
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.text(), "héxllo");
        input.backspace();
        input.backspace();
        assert_eq!(input.text(), "hllo");
    }

    #[test]
    fn test_account_name_filter() {
        let mut input = TextInput::new().with_filter(InputFilter::AccountName);
        for c in "Good-Karma.2 !".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text(), "good-karma.2");
    }

    #[test]
    fn test_set_text_applies_filter() {
        let mut input = TextInput::new().with_filter(InputFilter::AccountName);
        input.set_text("ALICE_");
        assert_eq!(input.text(), "alice");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_max_len() {
        let mut input = TextInput::new().with_max_len(3);
        assert!(input.insert_char('a'));
        assert!(input.insert_char('b'));
        assert!(input.insert_char('c'));
        assert!(!input.insert_char('d'));
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn test_handle_key_reports_changes() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyCode::Char('a'), KeyModifiers::NONE, None));
        assert!(!input.handle_key(KeyCode::Char('s'), KeyModifiers::CONTROL, Some(Action::Save)));
        assert!(!input.handle_key(KeyCode::Left, KeyModifiers::NONE, Some(Action::MoveLeft)));
        assert_eq!(input.cursor(), 0);
        assert!(input.handle_key(KeyCode::Delete, KeyModifiers::NONE, Some(Action::DeleteChar)));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_shifted_characters_are_text() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyCode::Char('P'), KeyModifiers::SHIFT, None));
        assert_eq!(input.text(), "P");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let input = TextInput::with_text("   ");
        assert!(input.is_empty());
        assert_eq!(input.text_trimmed(), "");
    }
}

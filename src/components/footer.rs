use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key-hint footer shared by every screen
pub struct Footer;

impl Footer {
    /// Colored spans for hint text such as `"Next: Tab | Login: Enter"`.
    pub fn spans(text: &str) -> Vec<Span<'_>> {
        let t = theme();
        let mut spans = Vec::new();
        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            if let Some((label, keys)) = part.split_once(": ") {
                spans.push(Span::styled(format!("{}: ", label), t.title_style()));
                spans.push(Span::styled(keys, t.text_style().add_modifier(Modifier::BOLD)));
            } else {
                spans.push(Span::styled(part, t.text_style()));
            }
        }
        spans
    }

    /// Render the footer. Uses 2 lines: a border and the hint text.
    pub fn render(frame: &mut Frame, area: Rect, text: &str) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(theme().border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::from(Self::spans(text))).alignment(Alignment::Center),
            inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_split_labels_and_keys() {
        let spans = Footer::spans("Next: Tab | Quit: Ctrl+C");
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["Next: ", "Tab", " | ", "Quit: ", "Ctrl+C"]);
    }

    #[test]
    fn test_plain_part() {
        let spans = Footer::spans("Loading");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "Loading");
    }
}

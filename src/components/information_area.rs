use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Muted note with an info marker, used under the login form
pub struct InformationArea;

impl InformationArea {
    pub fn render(frame: &mut Frame, area: Rect, description: &str) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(t.border_style())
            .padding(Padding::horizontal(1));
        let text = Line::from(vec![
            Span::styled("ⓘ ", t.title_style()),
            Span::styled(description, t.muted_style()),
        ]);
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

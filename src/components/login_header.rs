use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Large title with a one-line description, shown above auth forms.
/// Takes 3 lines.
pub struct LoginHeader;

impl LoginHeader {
    pub const HEIGHT: u16 = 3;

    pub fn render(frame: &mut Frame, area: Rect, title: &str, description: &str) {
        let t = theme();
        let lines = vec![
            Line::styled(title, t.title_style().add_modifier(Modifier::BOLD)),
            Line::styled(description, t.muted_style()),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(ratatui::widgets::Block::default().padding(
                ratatui::widgets::Padding::new(2, 2, 1, 0),
            )),
            area,
        );
    }
}

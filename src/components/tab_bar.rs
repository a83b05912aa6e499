use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};

/// Underlined tab strip; the active tab takes the accent color
pub struct TabBar;

impl TabBar {
    pub fn render(frame: &mut Frame, area: Rect, labels: &[&str], active: usize) {
        let t = theme();
        let tabs = Tabs::new(labels.iter().map(|label| Line::from(*label)))
            .select(active)
            .style(t.tab_style(false))
            .highlight_style(t.tab_style(true))
            .divider(" ")
            .padding("  ", "  ")
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(t.border_style()),
            );
        frame.render_widget(tabs, area);
    }
}

//! Blocking alert dialog
//!
//! Self-contained widget: centers itself in the given area, clears what is
//! underneath, and draws a title block stacked on a wrapped message block
//! with collapsed borders.

use crate::styles::theme;
use ratatui::layout::Spacing;
use ratatui::prelude::*;
use ratatui::symbols::merge::MergeStrategy;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap};

/// Dialog variant for different visual styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogVariant {
    #[default]
    Default,
    Warning,
    Error,
}

impl DialogVariant {
    fn prefix(self) -> &'static str {
        match self {
            DialogVariant::Default => "",
            DialogVariant::Warning => "Warning",
            DialogVariant::Error => "Error",
        }
    }
}

pub struct Dialog<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub min_width: u16,
    pub max_width: u16,
    pub variant: DialogVariant,
    /// Key hint shown under the message, e.g. "OK: Enter"
    pub footer: Option<&'a str>,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            min_width: 40,
            max_width: 70,
            variant: DialogVariant::Default,
            footer: None,
        }
    }

    pub fn variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    fn title_text(&self) -> String {
        let prefix = self.variant.prefix();
        if prefix.is_empty() {
            self.title.to_string()
        } else {
            format!("{}: {}", prefix, self.title)
        }
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let longest = self
            .title_text()
            .chars()
            .count()
            .max(self.content.chars().count())
            .max(self.footer.map_or(0, |f| f.chars().count()));
        let width = (longest as u16)
            .saturating_add(8)
            .clamp(self.min_width, self.max_width)
            .min(area.width);

        // text lines once wrapped inside borders + padding
        let text_width = width.saturating_sub(6).max(1) as usize;
        let content_lines = self.content.chars().count().div_ceil(text_width).max(1) as u16;
        let footer_lines = u16::from(self.footer.is_some());
        // title block 3, message block borders 2 minus one collapsed border
        let height = (content_lines + footer_lines + 4).min(area.height);

        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let popup_area = self.popup_area(area);
        Widget::render(Clear, popup_area, buf);

        let border_style = match self.variant {
            DialogVariant::Default => Style::default().fg(t.border_focused),
            DialogVariant::Warning => Style::default().fg(t.warning),
            DialogVariant::Error => Style::default().fg(t.invalid),
        };

        let [title_area, content_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)])
                .spacing(Spacing::Overlap(1))
                .areas(popup_area);

        let block = || {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .padding(Padding::horizontal(2))
                .merge_borders(MergeStrategy::Exact)
        };

        let title_block = block();
        let title_inner = title_block.inner(title_area);
        Widget::render(title_block, title_area, buf);
        Paragraph::new(self.title_text())
            .alignment(Alignment::Center)
            .style(t.text_style().add_modifier(Modifier::BOLD))
            .render(title_inner, buf);

        let content_block = block();
        let content_inner = content_block.inner(content_area);
        Widget::render(content_block, content_area, buf);

        let mut lines = vec![Line::styled(self.content, t.text_style())];
        if let Some(footer) = self.footer {
            lines.push(Line::styled(footer, t.muted_style()).right_aligned());
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(content_inner, buf);
    }
}

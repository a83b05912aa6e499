use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Center a `width` x `height` box inside `area`, clamped to the area.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Split a screen into header, body and footer rows.
pub fn screen_layout(area: Rect, header_height: u16, footer_height: u16) -> (Rect, Rect, Rect) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(area);
    (header, body, footer)
}

//! Reusable screen header.
//!
//! Renders the back/close control, an optional draft-save indicator, the
//! title (or a live search input), an optional dropdown menu, a custom right
//! icon, and, for editor screens, the date picker, preview toggle and
//! submit button.
//!
//! The header owns only its own UI state (search visibility, open
//! dropdown/date picker). Everything it reports goes through
//! [`HeaderHandler`], whose hooks all default to no-ops so callers
//! implement only the ones they care about.

use crate::keymap::{Action, Keymap};
use crate::styles::theme;
use crate::utils::{center_rect, TextInput};
use crate::widgets::spinner_frame;
use chrono::NaiveDateTime;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};

/// Options of the menu shown when the caller supplies none.
pub const DEFAULT_DROPDOWN_OPTIONS: [&str; 6] = [
    "ALL ACTIVITIES",
    "VOTES",
    "REPLIES",
    "MENTIONS",
    "FOLLOWS",
    "REBLOGS",
];

/// Input format of the date picker
pub const DATE_PICKER_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Everything the caller controls about the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderProps {
    pub title: String,
    /// Replaces `title` when set
    pub quick_title: Option<String>,
    /// Label of the submit button
    pub right_button_text: String,
    /// Label of the custom right icon; hidden while search is enabled
    pub right_icon_name: Option<String>,
    /// Caller-supplied dropdown menu; `None` uses [`DEFAULT_DROPDOWN_OPTIONS`]
    pub dropdown_options: Option<Vec<String>>,
    /// Editor affordances: save, date picker, preview, submit
    pub is_has_icons: bool,
    pub is_has_dropdown: bool,
    pub is_has_search: bool,
    pub is_reply: bool,
    /// Back control closes a modal instead of navigating back
    pub is_modal_header: bool,
    pub is_form_valid: bool,
    pub is_logged_in: bool,
    pub is_loading: bool,
    pub is_draft_saving: bool,
    pub is_draft_saved: bool,
    pub is_preview_active: bool,
    /// Disables the back control
    pub disabled: bool,
}

impl HeaderProps {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    fn shows_save(&self) -> bool {
        self.is_has_icons && !self.is_reply
    }

    fn shows_date_picker(&self) -> bool {
        self.is_has_icons && !self.is_reply
    }

    fn shows_right_icon(&self) -> bool {
        self.right_icon_name.is_some() && !self.is_has_search
    }

    fn can_submit(&self) -> bool {
        self.is_has_icons && self.is_form_valid && !self.is_loading
    }

    fn dropdown_options(&self) -> Vec<String> {
        self.dropdown_options.clone().unwrap_or_else(|| {
            DEFAULT_DROPDOWN_OPTIONS
                .iter()
                .map(ToString::to_string)
                .collect()
        })
    }
}

/// Column of the search cursor, or `None` when it falls outside `area`.
fn search_cursor_x(area: Rect, offset: u16, cursor: usize) -> Option<u16> {
    let cursor = u16::try_from(cursor).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(offset).saturating_add(cursor);
    (x < area.right()).then_some(x)
}

/// Callbacks raised by the header. Every hook is a no-op unless overridden.
pub trait HeaderHandler {
    /// Back control on a regular screen
    fn on_back(&mut self) {}
    /// Back control on a modal header
    fn on_close(&mut self) {}
    fn on_save(&mut self) {}
    fn on_preview(&mut self) {}
    /// Only raised while the form is valid and not loading
    fn on_submit(&mut self) {}
    /// Live search text; an empty string means "search cleared"
    fn on_search(&mut self, _query: &str) {}
    fn on_right_icon(&mut self) {}
    fn on_date_picker_change(&mut self, _value: NaiveDateTime) {}
    fn on_dropdown_select(&mut self, _index: usize, _option: &str) {}
}

impl HeaderHandler for () {}

/// One rendered control, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    Back { close: bool, enabled: bool },
    SaveSpinner,
    Save { saved: bool },
    Title(String),
    Dropdown,
    RightIcon(String),
    SearchInput,
    SearchToggle { active: bool },
    DatePicker { enabled: bool },
    Preview { active: bool },
    SubmitSpinner,
    Submit { text: String, enabled: bool, highlighted: bool },
}

#[derive(Debug, Default)]
struct DatePickerState {
    input: TextInput,
    error: Option<String>,
}

pub struct Header {
    is_input_visible: bool,
    search: TextInput,
    dropdown: Option<ListState>,
    date_picker: Option<DatePickerState>,
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self {
            is_input_visible: false,
            search: TextInput::new(),
            dropdown: None,
            date_picker: None,
        }
    }

    pub fn is_input_visible(&self) -> bool {
        self.is_input_visible
    }

    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown.is_some()
    }

    pub fn is_date_picker_open(&self) -> bool {
        self.date_picker.is_some()
    }

    /// Controls to draw for `props`, left cluster first then right cluster.
    pub fn affordances(&self, props: &HeaderProps) -> (Vec<Affordance>, Vec<Affordance>) {
        let mut left = vec![Affordance::Back {
            close: props.is_modal_header,
            enabled: !props.disabled,
        }];
        if props.shows_save() {
            left.push(if props.is_draft_saving {
                Affordance::SaveSpinner
            } else {
                Affordance::Save {
                    saved: props.is_draft_saved,
                }
            });
        }
        if !self.is_input_visible {
            let title = props.quick_title.clone().unwrap_or_else(|| props.title.clone());
            left.push(Affordance::Title(title));
        }
        if props.is_has_dropdown {
            left.push(Affordance::Dropdown);
        }
        if props.shows_right_icon() {
            if let Some(name) = &props.right_icon_name {
                left.push(Affordance::RightIcon(name.clone()));
            }
        }
        if self.is_input_visible {
            left.push(Affordance::SearchInput);
        }
        if props.is_has_search {
            left.push(Affordance::SearchToggle {
                active: self.is_input_visible,
            });
        }

        let mut right = Vec::new();
        if props.is_has_icons {
            if props.shows_date_picker() {
                right.push(Affordance::DatePicker {
                    enabled: props.is_form_valid,
                });
            }
            right.push(Affordance::Preview {
                active: props.is_preview_active,
            });
            right.push(if props.is_loading {
                Affordance::SubmitSpinner
            } else {
                Affordance::Submit {
                    text: props.right_button_text.clone(),
                    enabled: props.is_form_valid,
                    highlighted: props.is_form_valid && props.is_logged_in,
                }
            });
        }
        (left, right)
    }

    /// Flip the search input. Hiding it clears the caller's query.
    pub fn toggle_search(&mut self, handler: &mut dyn HeaderHandler) {
        let was_visible = self.is_input_visible;
        self.is_input_visible = !was_visible;
        if was_visible {
            self.search.clear();
            handler.on_search("");
        }
    }

    pub fn press_back(&mut self, props: &HeaderProps, handler: &mut dyn HeaderHandler) -> bool {
        if props.disabled {
            return false;
        }
        if props.is_modal_header {
            handler.on_close();
        } else {
            handler.on_back();
        }
        true
    }

    pub fn press_save(&mut self, props: &HeaderProps, handler: &mut dyn HeaderHandler) -> bool {
        if !props.shows_save() || props.is_draft_saving {
            return false;
        }
        handler.on_save();
        true
    }

    pub fn press_preview(&mut self, props: &HeaderProps, handler: &mut dyn HeaderHandler) -> bool {
        if !props.is_has_icons {
            return false;
        }
        handler.on_preview();
        true
    }

    /// Submit is inert unless the form is valid and nothing is loading.
    pub fn press_submit(&mut self, props: &HeaderProps, handler: &mut dyn HeaderHandler) -> bool {
        if !props.can_submit() {
            return false;
        }
        handler.on_submit();
        true
    }

    pub fn press_right_icon(
        &mut self,
        props: &HeaderProps,
        handler: &mut dyn HeaderHandler,
    ) -> bool {
        if !props.shows_right_icon() {
            return false;
        }
        handler.on_right_icon();
        true
    }

    pub fn open_dropdown(&mut self, props: &HeaderProps) -> bool {
        if !props.is_has_dropdown || props.dropdown_options().is_empty() {
            return false;
        }
        let mut state = ListState::default();
        state.select(Some(0));
        self.dropdown = Some(state);
        true
    }

    pub fn open_date_picker(&mut self, props: &HeaderProps) -> bool {
        if !props.shows_date_picker() || !props.is_form_valid {
            return false;
        }
        self.date_picker = Some(DatePickerState::default());
        true
    }

    /// Route a key event. Returns true when the header consumed it.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        props: &HeaderProps,
        keymap: &Keymap,
        handler: &mut dyn HeaderHandler,
    ) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let action = keymap.get_action(key.code, key.modifiers);

        if self.dropdown.is_some() {
            self.handle_dropdown_key(action, props, handler);
            return true;
        }
        if self.date_picker.is_some() {
            self.handle_date_picker_key(key, action, handler);
            return true;
        }

        if self.is_input_visible {
            if matches!(action, Some(Action::Search | Action::Cancel)) {
                self.toggle_search(handler);
                return true;
            }
            if self.search.handle_key(key.code, key.modifiers, action) {
                handler.on_search(self.search.text());
                return true;
            }
            if matches!(
                action,
                Some(Action::MoveLeft | Action::MoveRight | Action::Home | Action::End)
            ) {
                return true;
            }
        }

        match action {
            Some(Action::Cancel) => self.press_back(props, handler),
            Some(Action::Save) => self.press_save(props, handler),
            Some(Action::Preview) => self.press_preview(props, handler),
            Some(Action::Submit) => self.press_submit(props, handler),
            Some(Action::RightIcon) => self.press_right_icon(props, handler),
            Some(Action::Menu) => self.open_dropdown(props),
            Some(Action::Schedule) => self.open_date_picker(props),
            Some(Action::Search) if props.is_has_search => {
                self.toggle_search(handler);
                true
            }
            _ => false,
        }
    }

    fn handle_dropdown_key(
        &mut self,
        action: Option<Action>,
        props: &HeaderProps,
        handler: &mut dyn HeaderHandler,
    ) {
        let options = props.dropdown_options();
        let Some(state) = self.dropdown.as_mut() else {
            return;
        };
        let selected = state.selected().unwrap_or(0);
        match action {
            Some(Action::MoveUp) => state.select(Some(selected.saturating_sub(1))),
            Some(Action::MoveDown) => {
                state.select(Some((selected + 1).min(options.len().saturating_sub(1))));
            }
            Some(Action::Confirm) => {
                self.dropdown = None;
                if let Some(option) = options.get(selected) {
                    handler.on_dropdown_select(selected, option);
                }
            }
            Some(Action::Cancel | Action::Menu) => self.dropdown = None,
            _ => {}
        }
    }

    fn handle_date_picker_key(
        &mut self,
        key: KeyEvent,
        action: Option<Action>,
        handler: &mut dyn HeaderHandler,
    ) {
        let Some(picker) = self.date_picker.as_mut() else {
            return;
        };
        match action {
            Some(Action::Cancel | Action::Schedule) => self.date_picker = None,
            Some(Action::Confirm) => {
                match NaiveDateTime::parse_from_str(picker.input.text_trimmed(), DATE_PICKER_FORMAT)
                {
                    Ok(value) => {
                        self.date_picker = None;
                        handler.on_date_picker_change(value);
                    }
                    Err(_) => {
                        picker.error = Some("Use YYYY-MM-DD HH:MM".to_string());
                    }
                }
            }
            _ => {
                if picker.input.handle_key(key.code, key.modifiers, action) {
                    picker.error = None;
                }
            }
        }
    }

    fn affordance_span(&self, affordance: &Affordance) -> Span<'static> {
        let t = theme();
        match affordance {
            Affordance::Back { close, enabled } => {
                let symbol = if *close { "✕" } else { "←" };
                let style = if *enabled {
                    t.title_style()
                } else {
                    t.muted_style()
                };
                Span::styled(symbol, style)
            }
            Affordance::SaveSpinner => Span::styled(spinner_frame(), t.muted_style()),
            Affordance::Save { saved } => {
                if *saved {
                    Span::styled("✔ Saved", t.saved_style())
                } else {
                    Span::styled("Save", t.text_style())
                }
            }
            Affordance::Title(title) => Span::styled(title.clone(), t.title_style()),
            Affordance::Dropdown => Span::styled("⋮", t.text_style()),
            Affordance::RightIcon(name) => {
                Span::styled(name.clone(), t.text_button_style(false, true))
            }
            Affordance::SearchInput => {
                if self.search.text().is_empty() {
                    Span::styled("Search", t.muted_style())
                } else {
                    Span::styled(self.search.text().to_string(), t.text_style())
                }
            }
            Affordance::SearchToggle { active } => {
                Span::styled(if *active { "✕" } else { "⌕" }, t.text_style())
            }
            Affordance::DatePicker { enabled } => {
                let style = if *enabled {
                    t.text_style()
                } else {
                    t.muted_style()
                };
                Span::styled("◷", style)
            }
            Affordance::Preview { active } => {
                let style = if *active {
                    t.text_button_style(true, true)
                } else {
                    t.text_style()
                };
                Span::styled("Preview", style)
            }
            Affordance::SubmitSpinner => Span::styled(spinner_frame(), t.muted_style()),
            Affordance::Submit {
                text,
                enabled,
                highlighted,
            } => Span::styled(text.clone(), t.text_button_style(*highlighted, *enabled)),
        }
    }

    fn spans_for(&self, affordances: &[Affordance]) -> (Vec<Span<'static>>, Option<u16>) {
        let mut spans = Vec::new();
        let mut search_offset = None;
        let mut width: u16 = 0;
        for (i, affordance) in affordances.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
                width = width.saturating_add(2);
            }
            if *affordance == Affordance::SearchInput {
                search_offset = Some(width);
            }
            let span = self.affordance_span(affordance);
            width = width.saturating_add(span.width() as u16);
            spans.push(span);
        }
        (spans, search_offset)
    }

    /// Draw the header row plus any open dropdown or date picker.
    pub fn render(&self, frame: &mut Frame, area: Rect, props: &HeaderProps) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(t.border_style())
            .padding(ratatui::widgets::Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (left, right) = self.affordances(props);
        let (right_spans, _) = self.spans_for(&right);
        let right_line = Line::from(right_spans);
        let right_width = right_line.width() as u16;

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)])
                .areas(inner);

        let (left_spans, search_offset) = self.spans_for(&left);
        frame.render_widget(Paragraph::new(Line::from(left_spans)), left_area);
        frame.render_widget(
            Paragraph::new(right_line).alignment(Alignment::Right),
            right_area,
        );

        if let Some(offset) = search_offset {
            if let Some(x) = search_cursor_x(left_area, offset, self.search.cursor()) {
                frame.set_cursor_position((x, left_area.y));
            }
        }

        if let Some(state) = &self.dropdown {
            self.render_dropdown(frame, area, props, state.clone());
        }
        if let Some(picker) = &self.date_picker {
            Self::render_date_picker(frame, picker);
        }
    }

    fn render_dropdown(&self, frame: &mut Frame, header: Rect, props: &HeaderProps, mut state: ListState) {
        let t = theme();
        let options = props.dropdown_options();
        let width = options.iter().map(|o| o.chars().count()).max().unwrap_or(0) as u16 + 6;
        let height = options.len() as u16 + 2;
        let screen = frame.area();
        let x = header.right().saturating_sub(width + 1).max(screen.x);
        let y = header.bottom().min(screen.bottom().saturating_sub(1));
        let area = Rect::new(x, y, width, height).intersection(screen);

        let items: Vec<ListItem> = options.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_focused_style()),
            )
            .highlight_style(t.highlight_style());
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_date_picker(frame: &mut Frame, picker: &DatePickerState) {
        let t = theme();
        let area = center_rect(frame.area(), 36, 5);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(" Schedule ")
            .title_style(t.title_style());
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let [input_row, hint_row, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let text = if picker.input.text().is_empty() {
            Span::styled("YYYY-MM-DD HH:MM", t.muted_style())
        } else {
            Span::styled(picker.input.text().to_string(), t.text_style())
        };
        frame.render_widget(Paragraph::new(text), input_row);
        frame.set_cursor_position((input_row.x + picker.input.cursor() as u16, input_row.y));

        let hint = match &picker.error {
            Some(error) => Span::styled(error.clone(), t.error_style()),
            None => Span::styled("Enter to confirm, Esc to cancel", t.muted_style()),
        };
        frame.render_widget(Paragraph::new(hint), hint_row);
    }
}

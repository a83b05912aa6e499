//! Delegated login screen.
//!
//! Opens the SteemConnect authorization page in the system browser; the
//! token exchange itself happens on SteemConnect's side.

use crate::components::{Footer, Header, HeaderHandler, HeaderProps, InformationArea};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::url_opener::open_logged;
use crate::services::UrlOpener;
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};
use std::sync::Arc;
use tracing::error;

#[derive(Default)]
struct BackPressed(bool);

impl HeaderHandler for BackPressed {
    fn on_back(&mut self) {
        self.0 = true;
    }
}

pub struct SteemConnectScreen {
    header: Header,
    url_opener: Arc<dyn UrlOpener>,
    authorize_url: Option<String>,
}

impl SteemConnectScreen {
    pub fn new(url_opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            header: Header::new(),
            url_opener,
            authorize_url: None,
        }
    }

    pub fn authorize_url(&self) -> Option<&str> {
        self.authorize_url.as_deref()
    }

    fn open(&self) {
        if let Some(url) = &self.authorize_url {
            open_logged(self.url_opener.as_ref(), url);
        }
    }
}

impl Screen for SteemConnectScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let [header_area, note_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        let props = HeaderProps::titled(
            ctx.route
                .options
                .title
                .clone()
                .unwrap_or_else(|| "SteemConnect".to_string()),
        );
        self.header.render(frame, header_area, &props);

        InformationArea::render(
            frame,
            note_area.inner(Margin::new(2, 1)),
            "Authorize eSteem in your browser. Your keys stay with SteemConnect.",
        );

        let url = self.authorize_url.as_deref().unwrap_or_default();
        let body = Paragraph::new(vec![
            Line::styled("If the browser did not open, visit:", t.muted_style()),
            Line::styled(url, t.text_style().add_modifier(Modifier::UNDERLINED)),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(body, body_area.inner(Margin::new(2, 1)));

        let hints = ctx
            .config
            .keymap
            .footer_hints(&[("Open again", Action::Confirm), ("Back", Action::Cancel)]);
        Footer::render(frame, footer_area, &hints);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        let keymap = &ctx.config.keymap;
        let action = keymap.get_action(key.code, key.modifiers);
        if action == Some(Action::Quit) {
            return Ok(ScreenAction::Quit);
        }

        let mut back = BackPressed::default();
        let props = HeaderProps::default();
        if self.header.handle_key(key, &props, keymap, &mut back) {
            return Ok(if back.0 {
                ScreenAction::Pop
            } else {
                ScreenAction::None
            });
        }
        if action == Some(Action::Confirm) {
            self.open();
        }
        Ok(ScreenAction::None)
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        match ctx.config.steemconnect_authorize_url() {
            Ok(url) => {
                self.authorize_url = Some(url);
                self.open();
            }
            Err(e) => error!("Cannot build the SteemConnect URL: {:#}", e),
        }
        Ok(())
    }
}

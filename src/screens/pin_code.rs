//! Post-login landing screen.

use crate::components::{Footer, LoginHeader};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::session::AccountStore;
use crate::styles::theme;
use crate::utils::screen_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::sync::Arc;

pub struct PinCodeScreen {
    accounts: Arc<dyn AccountStore>,
}

impl PinCodeScreen {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    fn greeting(&self) -> String {
        match self.accounts.current_account() {
            Some(account) => format!("Signed in as @{}", account.username),
            None => "No account signed in".to_string(),
        }
    }
}

impl Screen for PinCodeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (title_area, body_area, footer_area) = screen_layout(area, LoginHeader::HEIGHT, 2);

        LoginHeader::render(frame, title_area, "Enter PIN", "Secure your session with a PIN code");
        frame.render_widget(
            Paragraph::new(Line::styled(self.greeting(), theme().text_style()))
                .alignment(Alignment::Center),
            body_area.inner(Margin::new(2, 1)),
        );
        let hints = ctx.config.keymap.footer_hints(&[("Quit", Action::Quit)]);
        Footer::render(frame, footer_area, &hints);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press
                && ctx.config.keymap.get_action(key.code, key.modifiers) == Some(Action::Quit)
            {
                return Ok(ScreenAction::Quit);
            }
        }
        Ok(ScreenAction::None)
    }
}

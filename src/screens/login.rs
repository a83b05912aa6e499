//! Login screen controller.
//!
//! Two tabs: "Sign in" collects a username and a password (or WIF key) and
//! authenticates locally; "SteemConnect" hands off to the delegated login
//! screen. Username edits trigger a background lookup whose result only
//! drives the input border color.

use crate::components::{Footer, Header, HeaderHandler, HeaderProps, InformationArea, LoginHeader, TabBar};
use crate::keymap::Action;
use crate::navigation::Route;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::url_opener::open_logged;
use crate::services::{LoginHandle, LoginService, LookupHandle, UrlOpener};
use crate::session::AccountStore;
use crate::state::login::{LoginForm, SubmitOutcome};
use crate::steem::AuthError;
use crate::styles::theme;
use crate::ui::Screen as ScreenId;
use crate::widgets::{spinner_frame, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const TAB_LABELS: [&str; 2] = ["Sign in", "SteemConnect"];

const SIGN_IN_NOTE: &str =
    "User credentials are kept locally on the device. Credentials are removed upon logout!";
const STEEMCONNECT_NOTE: &str = "If you don't want to keep your password encrypted and saved on your device, you can use Steemconnect.";

/// Focusable elements, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
    Cancel,
    Login,
    SteemConnect,
}

impl LoginField {
    const ORDER: [LoginField; 5] = [
        LoginField::Username,
        LoginField::Password,
        LoginField::Cancel,
        LoginField::Login,
        LoginField::SteemConnect,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Tab the field lives on
    pub fn tab(self) -> usize {
        usize::from(self == LoginField::SteemConnect)
    }

    fn is_input(self) -> bool {
        matches!(self, LoginField::Username | LoginField::Password)
    }
}

/// Header callbacks the login screen reacts to.
#[derive(Debug, Default)]
struct HeaderEvents {
    back: bool,
    sign_up: bool,
}

impl HeaderHandler for HeaderEvents {
    fn on_back(&mut self) {
        self.back = true;
    }

    fn on_close(&mut self) {
        self.back = true;
    }

    fn on_right_icon(&mut self) {
        self.sign_up = true;
    }
}

pub struct LoginScreen {
    form: LoginForm,
    header: Header,
    focus: LoginField,
    service: LoginService,
    accounts: Arc<dyn AccountStore>,
    url_opener: Arc<dyn UrlOpener>,
    lookup: Option<LookupHandle>,
    login: Option<LoginHandle>,
    /// Esc pops the screen only while this is set (between enter and exit)
    back_listener: bool,
}

impl LoginScreen {
    pub fn new(
        service: LoginService,
        accounts: Arc<dyn AccountStore>,
        url_opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            form: LoginForm::new(),
            header: Header::new(),
            focus: LoginField::Username,
            service,
            accounts,
            url_opener,
            lookup: None,
            login: None,
            back_listener: false,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn active_tab(&self) -> usize {
        self.focus.tab()
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.lookup.is_some()
    }

    pub fn is_login_pending(&self) -> bool {
        self.login.is_some()
    }

    fn header_props() -> HeaderProps {
        HeaderProps {
            right_icon_name: Some("Sign Up".to_string()),
            ..HeaderProps::default()
        }
    }

    fn submit(&mut self) {
        match self.form.begin_submit() {
            Some(ticket) => self.login = Some(self.service.start_login(ticket)),
            None => debug!("Login already in progress, ignoring submit"),
        }
    }

    fn edit_focused_input(&mut self, key: KeyEvent, action: Option<Action>) -> bool {
        match self.focus {
            LoginField::Username => {
                let mut changed = false;
                let ticket = self.form.edit_username(|input| {
                    changed = input.handle_key(key.code, key.modifiers, action);
                    changed
                });
                if let Some(ticket) = ticket {
                    // replacing the handle aborts the previous lookup
                    self.lookup = Some(self.service.start_lookup(ticket));
                } else if changed {
                    self.lookup = None;
                }
                changed
            }
            LoginField::Password => self
                .form
                .edit_password(|input| input.handle_key(key.code, key.modifiers, action)),
            _ => false,
        }
    }

    fn activate_focused(&mut self) -> ScreenAction {
        match self.focus {
            LoginField::Username => {
                self.focus = LoginField::Password;
                ScreenAction::None
            }
            LoginField::Password | LoginField::Login => {
                self.submit();
                ScreenAction::None
            }
            LoginField::Cancel => {
                info!("Login cancelled, back to the auth entry");
                ScreenAction::SetStackRoot(Route::new(ScreenId::Login))
            }
            LoginField::SteemConnect => {
                ScreenAction::Push(Route::new(ScreenId::SteemConnect).with_title("Login via SC2"))
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        if key.kind != KeyEventKind::Press {
            return ScreenAction::None;
        }
        let keymap = &ctx.config.keymap;
        let action = keymap.get_action(key.code, key.modifiers);

        if action == Some(Action::Quit) {
            return ScreenAction::Quit;
        }

        let mut events = HeaderEvents::default();
        let props = Self::header_props();
        if self.header.handle_key(key, &props, keymap, &mut events) {
            if events.sign_up {
                open_logged(self.url_opener.as_ref(), &ctx.config.signup_url);
            }
            if events.back && self.back_listener {
                return ScreenAction::Pop;
            }
            return ScreenAction::None;
        }

        match action {
            Some(Action::NextField) => self.focus = self.focus.next(),
            Some(Action::PrevField) => self.focus = self.focus.prev(),
            Some(Action::SwitchTab) => {
                self.focus = if self.focus.tab() == 0 {
                    LoginField::SteemConnect
                } else {
                    LoginField::Username
                };
            }
            Some(Action::SignUp) => open_logged(self.url_opener.as_ref(), &ctx.config.signup_url),
            Some(Action::Confirm) => return self.activate_focused(),
            Some(Action::Submit) => self.submit(),
            Some(Action::MoveDown) if self.focus != LoginField::SteemConnect => {
                self.focus = self.focus.next();
            }
            Some(Action::MoveUp) if self.focus != LoginField::Username => {
                self.focus = self.focus.prev();
            }
            Some(Action::MoveLeft) if self.focus == LoginField::Login => {
                self.focus = LoginField::Cancel;
            }
            Some(Action::MoveRight) if self.focus == LoginField::Cancel => {
                self.focus = LoginField::Login;
            }
            _ => {
                self.edit_focused_input(key, action);
            }
        }
        ScreenAction::None
    }

    fn poll_lookup(&mut self) {
        let Some(handle) = self.lookup.as_mut() else {
            return;
        };
        let Some(result) = handle.try_recv() else {
            return;
        };
        let generation = handle.generation();
        self.lookup = None;
        self.form
            .apply_lookup(generation, result.map_err(|e| format!("{:#}", e)));
    }

    fn poll_login(&mut self) -> ScreenAction {
        let Some(result) = self.login.as_mut().and_then(LoginHandle::try_recv) else {
            return ScreenAction::None;
        };
        self.login = None;
        if !self.form.is_mounted() {
            return ScreenAction::None;
        }

        let result = result.and_then(|credential| {
            self.accounts
                .add_account(credential.clone())
                .map(|()| credential)
                .map_err(|e| {
                    error!("Failed to store account: {:#}", e);
                    AuthError::Storage(format!("{:#}", e))
                })
        });

        match self.form.finish_submit(result) {
            Some(SubmitOutcome::LoggedIn(credential)) => {
                info!("Signed in as @{}", credential.username);
                ScreenAction::SetStackRoot(Route::new(ScreenId::PinCode).without_top_bar())
            }
            Some(SubmitOutcome::Failed(message)) => ScreenAction::ShowAlert {
                title: "Login failed".to_string(),
                message,
            },
            None => ScreenAction::None,
        }
    }

    fn render_sign_in(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let [username_area, password_area, note_area, buttons_area, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let valid = self.form.is_username_valid();
        frame.render_text_input_widget(
            TextInputWidget::new(self.form.username_input())
                .placeholder("Username")
                .icon("@")
                .valid(valid)
                .focused(self.focus == LoginField::Username),
            username_area,
        );
        // both fields follow the username lookup, as the mobile form did
        frame.render_text_input_widget(
            TextInputWidget::new(self.form.password_input())
                .placeholder("Password or WIF")
                .icon("🔒")
                .valid(valid)
                .masked(true)
                .focused(self.focus == LoginField::Password),
            password_area,
        );
        InformationArea::render(frame, note_area, SIGN_IN_NOTE);

        let login_label = if self.form.is_loading() {
            format!("  {}  ", spinner_frame())
        } else {
            "  LOGIN  ".to_string()
        };
        let buttons = Line::from(vec![
            Span::styled(
                " Cancel ",
                t.text_button_style(self.focus == LoginField::Cancel, true),
            ),
            Span::raw("    "),
            Span::styled(
                login_label,
                t.button_style(self.focus == LoginField::Login, !self.form.is_loading()),
            ),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(buttons), buttons_area);
    }

    fn render_steem_connect(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let [note_area, _, button_area, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);
        InformationArea::render(frame, note_area, STEEMCONNECT_NOTE);

        let focused = self.focus == LoginField::SteemConnect;
        let style = t.button_style(focused, true);
        let button = Line::from(vec![
            Span::styled("  steem", style),
            Span::styled("connect  ", style.add_modifier(Modifier::BOLD)),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(button), button_area);
    }
}

impl Screen for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let header_height = if ctx.route.options.top_bar_visible { 2 } else { 0 };
        let [top_area, title_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(LoginHeader::HEIGHT),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        if header_height > 0 {
            let mut props = Self::header_props();
            if let Some(title) = &ctx.route.options.title {
                props.title.clone_from(title);
            }
            self.header.render(frame, top_area, &props);
        }
        LoginHeader::render(frame, title_area, "Sign in", "To get all the benefits using eSteem");
        TabBar::render(frame, tabs_area, &TAB_LABELS, self.active_tab());

        let body = body_area.inner(Margin::new(2, 1));
        if self.active_tab() == 0 {
            self.render_sign_in(frame, body);
        } else {
            self.render_steem_connect(frame, body);
        }

        let keymap = &ctx.config.keymap;
        let hints = keymap.footer_hints(&[
            ("Next", Action::NextField),
            ("Select", Action::Confirm),
            ("Tab", Action::SwitchTab),
            ("Sign Up", Action::RightIcon),
            ("Back", Action::Cancel),
        ]);
        Footer::render(frame, footer_area, &hints);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        match event {
            Event::Key(key) => Ok(self.handle_key(key, ctx)),
            _ => Ok(ScreenAction::None),
        }
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        self.poll_lookup();
        Ok(self.poll_login())
    }

    fn is_input_focused(&self) -> bool {
        self.focus.is_input()
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        self.back_listener = true;
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        self.back_listener = false;
        self.form.unmount();
        self.lookup = None;
        self.login = None;
        Ok(())
    }
}

use crate::config::Config;
use crate::keymap::Action;
use crate::navigation::{Navigator, Route};
use crate::screens::{
    LoginScreen, PinCodeScreen, RenderContext, Screen, ScreenAction, ScreenContext,
    SteemConnectScreen,
};
use crate::services::{LoginService, SystemUrlOpener, UrlOpener};
use crate::session::{AccountStore, FileAccountStore};
use crate::state::Alert;
use crate::steem::{AccountAuthenticator, SteemClient};
use crate::tui::Tui;
use crate::ui::Screen as ScreenId;
use crate::widgets::{Dialog, DialogVariant};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// How often the loop wakes up to poll background work and animate spinners
const TICK_RATE: Duration = Duration::from_millis(100);

/// Builds screen controllers for routes, handing each its collaborators.
#[derive(Clone)]
pub struct ScreenFactory {
    pub login_service: LoginService,
    pub accounts: Arc<dyn AccountStore>,
    pub url_opener: Arc<dyn UrlOpener>,
}

impl ScreenFactory {
    pub fn build(&self, route: &Route) -> Box<dyn Screen> {
        match route.screen {
            ScreenId::Login => Box::new(LoginScreen::new(
                self.login_service.clone(),
                Arc::clone(&self.accounts),
                Arc::clone(&self.url_opener),
            )),
            ScreenId::SteemConnect => {
                Box::new(SteemConnectScreen::new(Arc::clone(&self.url_opener)))
            }
            ScreenId::PinCode => Box::new(PinCodeScreen::new(Arc::clone(&self.accounts))),
        }
    }
}

/// The navigation stack with one live controller per route, plus the
/// alert overlay. Terminal-free so it can be driven from tests.
pub struct Router {
    navigator: Navigator,
    screens: Vec<Box<dyn Screen>>,
    alert: Option<Alert>,
    factory: ScreenFactory,
    should_quit: bool,
}

impl Router {
    pub fn new(factory: ScreenFactory, root: Route, ctx: &ScreenContext) -> Result<Self> {
        let mut screen = factory.build(&root);
        screen.on_enter(ctx)?;
        Ok(Self {
            navigator: Navigator::new(root),
            screens: vec![screen],
            alert: None,
            factory,
            should_quit: false,
        })
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.navigator.current()
    }

    pub fn current_screen(&self) -> Option<ScreenId> {
        self.navigator.current().map(|route| route.screen)
    }

    pub fn depth(&self) -> usize {
        self.navigator.depth()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn mount(&mut self, route: &Route, ctx: &ScreenContext) -> Result<()> {
        let mut screen = self.factory.build(route);
        screen.on_enter(ctx)?;
        self.screens.push(screen);
        Ok(())
    }

    /// Apply what a screen asked for.
    pub fn apply(&mut self, action: ScreenAction, ctx: &ScreenContext) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Push(route) => {
                self.navigator.push(route.clone());
                self.mount(&route, ctx)?;
            }
            ScreenAction::Pop => {
                self.navigator.pop();
                if let Some(mut screen) = self.screens.pop() {
                    screen.on_exit(ctx)?;
                }
                if self.navigator.is_empty() {
                    info!("Navigation stack is empty, quitting");
                    self.should_quit = true;
                }
            }
            ScreenAction::SetStackRoot(route) => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_exit(ctx)?;
                }
                self.navigator.set_stack_root(route.clone());
                self.mount(&route, ctx)?;
            }
            ScreenAction::ShowAlert { title, message } => {
                self.alert = Some(Alert { title, message });
            }
            ScreenAction::Quit => self.should_quit = true,
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<()> {
        if self.alert.is_some() {
            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                match ctx.config.keymap.get_action(key.code, key.modifiers) {
                    Some(Action::Confirm | Action::Cancel) => self.alert = None,
                    Some(Action::Quit) => self.should_quit = true,
                    _ => {}
                }
            }
            return Ok(());
        }

        let action = match self.screens.last_mut() {
            Some(screen) => screen.handle_event(event, ctx)?,
            None => ScreenAction::None,
        };
        self.apply(action, ctx)
    }

    /// Let the top screen poll its background work.
    pub fn tick(&mut self, ctx: &ScreenContext) -> Result<()> {
        let action = match self.screens.last_mut() {
            Some(screen) => screen.tick(ctx)?,
            None => ScreenAction::None,
        };
        if action != ScreenAction::None {
            debug!("Tick produced {:?}", action);
        }
        self.apply(action, ctx)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) -> Result<()> {
        if let (Some(screen), Some(route)) = (self.screens.last_mut(), self.navigator.current()) {
            let ctx = RenderContext::new(config, route);
            screen.render(frame, area, &ctx)?;
        }
        if let Some(alert) = &self.alert {
            frame.render_widget(
                Dialog::new(&alert.title, &alert.message)
                    .variant(DialogVariant::Error)
                    .footer("OK: Enter"),
                area,
            );
        }
        Ok(())
    }
}

/// Main application: terminal, runtime and router.
pub struct App {
    config: Config,
    config_path: PathBuf,
    router: Router,
    tui: Tui,
    // runs lookups and logins; dropped after `router`
    _runtime: Runtime,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        let client = SteemClient::new(config.rpc_url.clone(), config.request_timeout())?
            .with_lookup_limit(config.lookup_limit);
        let login_service = LoginService::new(
            runtime.handle().clone(),
            Arc::new(client.clone()),
            Arc::new(AccountAuthenticator::new(client)),
        );
        let accounts_path = config.resolve_accounts_path(&config_path);
        let accounts = FileAccountStore::open(&accounts_path)?;
        info!("Using account store {:?}", accounts.path());

        let factory = ScreenFactory {
            login_service,
            accounts: Arc::new(accounts),
            url_opener: Arc::new(SystemUrlOpener),
        };
        let ctx = ScreenContext::new(&config, &config_path);
        let router = Router::new(factory, Route::new(ScreenId::Login), &ctx)?;
        let tui = Tui::new()?;

        Ok(Self {
            config,
            config_path,
            router,
            tui,
            _runtime: runtime,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        info!("Connected to {}", self.config.rpc_url);

        loop {
            self.draw()?;
            if self.router.should_quit() {
                break;
            }

            let ctx = ScreenContext::new(&self.config, &self.config_path);
            if let Some(event) = self.tui.poll_event(TICK_RATE)? {
                self.router.handle_event(event, &ctx)?;
            }
            self.router.tick(&ctx)?;
        }

        self.tui.exit()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let router = &mut self.router;
        let config = &self.config;
        let mut result = Ok(());
        self.tui.terminal_mut().draw(|frame| {
            result = router.render(frame, frame.area(), config);
        })?;
        result
    }
}

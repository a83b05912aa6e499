//! Shared test doubles for the login workflow tests.
//!
//! Provides in-memory implementations of the platform traits plus `TestEnv`,
//! which wires them into a `Router` the same way the app does.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use esteem::app::{Router, ScreenFactory};
use esteem::config::Config;
use esteem::navigation::Route;
use esteem::screens::{LoginScreen, Screen, ScreenContext};
use esteem::services::{LoginService, UrlOpener};
use esteem::session::{AccountStore, MemoryAccountStore};
use esteem::steem::{AccountLookup, AuthError, AuthType, Authenticator, Credential};
use esteem::ui::Screen as ScreenId;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;

/// Lookup over a fixed directory of names, with optional per-prefix delays.
pub struct MockLookup {
    pub directory: Vec<String>,
    pub delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn new(directory: &[&str]) -> Self {
        Self {
            directory: directory.iter().map(ToString::to_string).collect(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, prefix: &str, delay: Duration) -> Self {
        self.delays.insert(prefix.to_string(), delay);
        self
    }
}

#[async_trait]
impl AccountLookup for MockLookup {
    async fn lookup_accounts(&self, prefix: &str) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(prefix.to_string());
        if let Some(delay) = self.delays.get(prefix) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self
            .directory
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Accepts exactly one password; anything else fails with "bad password".
pub struct MockAuthenticator {
    pub password: String,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl MockAuthenticator {
    pub fn new(password: &str) -> Self {
        Self {
            password: password.to_string(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if password == self.password {
            Ok(Credential::new(username, AuthType::MasterPassword))
        } else {
            Err(AuthError::InvalidCredentials("bad password".to_string()))
        }
    }
}

/// Store that counts `add_account` calls.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryAccountStore,
    pub adds: AtomicUsize,
}

impl RecordingStore {
    pub fn adds(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }
}

impl AccountStore for RecordingStore {
    fn add_account(&self, credential: Credential) -> Result<()> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        self.inner.add_account(credential)
    }

    fn accounts(&self) -> Vec<Credential> {
        self.inner.accounts()
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

/// Terminals report Shift+Tab as `BackTab` with the shift modifier.
pub fn shift_tab() -> Event {
    Event::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
}

pub fn chars(text: &str) -> Vec<Event> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

/// Collaborators plus config, for building screens and routers in tests.
pub struct TestEnv {
    pub config: Config,
    pub config_path: PathBuf,
    pub lookup: Arc<MockLookup>,
    pub authenticator: Arc<MockAuthenticator>,
    pub store: Arc<RecordingStore>,
    pub opener: Arc<RecordingOpener>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with(MockLookup::new(&["alice", "alicia", "bob"]), MockAuthenticator::new("pw"))
    }

    pub fn with(lookup: MockLookup, authenticator: MockAuthenticator) -> Self {
        Self {
            config: Config::default(),
            config_path: PathBuf::from("/nonexistent/esteem/config.toml"),
            lookup: Arc::new(lookup),
            authenticator: Arc::new(authenticator),
            store: Arc::new(RecordingStore::default()),
            opener: Arc::new(RecordingOpener::default()),
        }
    }

    pub fn ctx(&self) -> ScreenContext<'_> {
        ScreenContext::new(&self.config, &self.config_path)
    }

    /// Must be called inside a tokio runtime.
    pub fn factory(&self) -> ScreenFactory {
        ScreenFactory {
            login_service: LoginService::new(
                Handle::current(),
                self.lookup.clone(),
                self.authenticator.clone(),
            ),
            accounts: self.store.clone(),
            url_opener: self.opener.clone(),
        }
    }

    pub fn login_screen(&self) -> LoginScreen {
        let factory = self.factory();
        let mut screen = LoginScreen::new(factory.login_service, factory.accounts, factory.url_opener);
        screen.on_enter(&self.ctx()).unwrap();
        screen
    }

    pub fn router(&self) -> Router {
        Router::new(self.factory(), Route::new(ScreenId::Login), &self.ctx()).unwrap()
    }
}

/// Feed events to a screen, ignoring the returned actions.
pub fn type_into(screen: &mut LoginScreen, ctx: &ScreenContext, events: Vec<Event>) {
    for event in events {
        screen.handle_event(event, ctx).unwrap();
    }
}

/// Tick `screen` until `done` holds, yielding to the runtime in between.
pub async fn settle(screen: &mut LoginScreen, ctx: &ScreenContext<'_>, done: impl Fn(&LoginScreen) -> bool) {
    for _ in 0..400 {
        screen.tick(ctx).unwrap();
        if done(screen) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("screen did not settle");
}

/// Tick the router until `done` holds.
pub async fn settle_router(router: &mut Router, ctx: &ScreenContext<'_>, done: impl Fn(&Router) -> bool) {
    for _ in 0..400 {
        router.tick(ctx).unwrap();
        if done(router) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("router did not settle");
}

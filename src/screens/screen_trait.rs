//! Screen trait and associated types.
//!
//! Screens own their state, render themselves, and answer events with a
//! [`ScreenAction`] instead of touching the navigation stack directly. The
//! app applies the action to its [`Navigator`](crate::navigation::Navigator).

use crate::config::Config;
use crate::navigation::Route;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources available while rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    /// The route this screen was opened with
    pub route: &'a Route,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, route: &'a Route) -> Self {
        Self { config, route }
    }
}

/// Read-only resources available while handling events.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    /// Configuration file path (for saving).
    pub config_path: &'a std::path::Path,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, config_path: &'a std::path::Path) -> Self {
        Self {
            config,
            config_path,
        }
    }
}

/// What the app should do after a screen handled an event or a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    /// Open a screen on top of this one.
    Push(Route),
    /// Close this screen.
    Pop,
    /// Replace the whole navigation stack.
    SetStackRoot(Route),
    /// Show a blocking alert; dismissing it returns to this screen.
    ShowAlert { title: String, message: String },
    Quit,
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// struct MyScreen;
///
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::Pop)
///     }
/// }
/// ```
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Poll background work. Called once per UI tick while the screen is
    /// on top of the stack.
    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// Check if a text input is currently focused.
    ///
    /// When true, the app leaves character keys to the screen.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called once when the screen is mounted (pushed or made root).
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Called once when the screen leaves the stack for good.
    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}

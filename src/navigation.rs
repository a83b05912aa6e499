//! Stack navigation between screens.
//!
//! Screens never touch the stack directly; they return a `ScreenAction`
//! and the app applies it here.

use crate::ui::Screen;
use tracing::debug;

/// Per-route presentation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    /// Title shown in the screen header, when the screen uses one
    pub title: Option<String>,
    /// Whether the screen's top bar is shown
    pub top_bar_visible: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            title: None,
            top_bar_visible: true,
        }
    }
}

/// A destination plus its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub screen: Screen,
    pub options: RouteOptions,
}

impl Route {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            options: RouteOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    pub fn without_top_bar(mut self) -> Self {
        self.options.top_bar_visible = false;
        self
    }
}

/// Navigation stack; never empty while the app is running.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> Option<&Route> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, route: Route) {
        debug!("push {}", route.screen.name());
        self.stack.push(route);
    }

    /// Pop the top route. Returns the popped route; popping the root
    /// leaves the stack empty, which ends the app.
    pub fn pop(&mut self) -> Option<Route> {
        let popped = self.stack.pop();
        if let Some(route) = &popped {
            debug!("pop {}", route.screen.name());
        }
        popped
    }

    /// Replace the whole stack with `route`.
    pub fn set_stack_root(&mut self, route: Route) {
        debug!("set stack root {}", route.screen.name());
        self.stack.clear();
        self.stack.push(route);
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

//! Opening links in the system browser.

use anyhow::{Context, Result};
use tracing::{error, info};

pub trait UrlOpener: Send + Sync {
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Fire-and-forget open: failures are logged and never reach the user.
pub fn open_logged(opener: &dyn UrlOpener, url: &str) {
    match opener.open_url(url) {
        Ok(()) => info!("Opened {}", url),
        Err(e) => error!("An error occurred opening {}: {:#}", url, e),
    }
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url).with_context(|| format!("Failed to open browser for {}", url))
    }
}

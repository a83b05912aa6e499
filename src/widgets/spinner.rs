//! Activity indicator shown while a save or login is in flight.

use std::time::{SystemTime, UNIX_EPOCH};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 100;

/// Frame for a given elapsed time in milliseconds
pub fn frame_at(elapsed_ms: u128) -> &'static str {
    FRAMES[(elapsed_ms / FRAME_MS) as usize % FRAMES.len()]
}

/// Frame for the current wall-clock time; advances every 100ms
pub fn spinner_frame() -> &'static str {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    frame_at(now)
}

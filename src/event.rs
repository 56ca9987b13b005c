use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Waits up to `timeout` for a key press. Releases and repeats are dropped so
/// each physical press navigates once.
pub fn next_key_press(timeout: Duration) -> Result<Option<KeyEvent>> {
    while event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

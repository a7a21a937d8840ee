pub mod anken_list;
pub mod anken_wizard;
pub mod components;
pub mod dashboard;
pub mod tantosha_list;
pub mod tantosha_wizard;
pub mod toast;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};

/// The three logical pages. Exactly one is active at a time; selecting a
/// page (keys 1/2/3) triggers that page's load, including re-selecting
/// the page already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    AnkenList,
    TantoshaList,
}

/// Poll for one key press, returning `None` after a short tick so the
/// main loop keeps running while idle (toast expiry depends on it).
pub fn read_key() -> Result<Option<KeyCode>> {
    if event::poll(Duration::from_millis(200))? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key.code));
        }
    }
    Ok(None)
}

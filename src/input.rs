//! Key mapping from host keyboard events to game keys.

use crate::game::Key;

/// Map a browser `KeyboardEvent` (`key`, `code`) to a game key.
///
/// Arrows are matched on `key`, restart on the physical Space `code` so it
/// works regardless of layout.
pub fn key_from_dom(key: &str, code: &str) -> Option<Key> {
    match key {
        "ArrowUp" => return Some(Key::Up),
        "ArrowDown" => return Some(Key::Down),
        "ArrowLeft" => return Some(Key::Left),
        "ArrowRight" => return Some(Key::Right),
        _ => {}
    }
    (code == "Space").then_some(Key::Restart)
}

/// Toggles demo mode in the browser host.
pub fn is_autopilot_toggle(key: &str) -> bool {
    matches!(key, "i" | "I")
}

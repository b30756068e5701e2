mod dialogs;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use crate::rpc::Command;

use super::app::App;

/// Handle a key event. Returns the daemon command the key asked for, if
/// any; the caller sends it.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }

    if app.dialog.is_some() {
        dialogs::handle_dialog(app, key)
    } else {
        navigate::handle_navigate(app, key)
    }
}

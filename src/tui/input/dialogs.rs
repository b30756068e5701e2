use crossterm::event::KeyEvent;

use crate::rpc::Command;
use crate::tui::app::App;
use crate::tui::dialog::{Dialog, DialogOutcome, LimitKind};

/// Feed a key to the open dialog and act on its answer. Every key goes to
/// the dialog while one is open.
pub(super) fn handle_dialog(app: &mut App, key: KeyEvent) -> Option<Command> {
    let dialog = app.dialog.as_mut()?;
    match dialog {
        Dialog::Sort(menu) => match menu.handle_key(key) {
            DialogOutcome::Pending => None,
            DialogOutcome::Done(choice) => {
                app.dialog = None;
                app.sort.apply(choice);
                app.viewport.reset();
                app.refresh_view();
                None
            }
            DialogOutcome::Cancelled => {
                app.dialog = None;
                None
            }
        },
        Dialog::Remove { id, prompt } => match prompt.handle_key(key) {
            DialogOutcome::Pending => None,
            DialogOutcome::Done(true) => {
                let id = *id;
                app.dialog = None;
                Some(Command::Remove(id))
            }
            DialogOutcome::Done(false) | DialogOutcome::Cancelled => {
                app.dialog = None;
                None
            }
        },
        Dialog::Limit { kind, input } => match input.handle_key(key) {
            DialogOutcome::Pending => None,
            DialogOutcome::Done(limit) => {
                let kind = *kind;
                app.dialog = None;
                Some(match kind {
                    LimitKind::Upload => Command::UploadLimit(limit),
                    LimitKind::Download => Command::DownloadLimit(limit),
                })
            }
            DialogOutcome::Cancelled => {
                app.dialog = None;
                None
            }
        },
    }
}

pub mod dialog;
pub mod status_bar;
pub mod task_list;
#[cfg(test)]
pub mod test_helpers;
pub mod title_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use super::app::App;

/// Main render function: title bar, task list, status bar, then any
/// open dialog on top
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(0),    // task list
            Constraint::Length(1), // status bar
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, chunks[1]);
    status_bar::render_status_bar(frame, app, chunks[2]);

    if app.dialog.is_some() {
        dialog::render_dialog(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::dialog::{Dialog, YesNo};
    use super::test_helpers::*;

    #[test]
    fn full_screen() {
        let app = sample_app(60, 8);
        let output = render_to_string(60, 8, |frame, _| render(frame, &app));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 8);
        // at 60 columns the key help covers most of the address
        assert_eq!(
            lines[0],
            "Transmi| s Sort | u Upload Limit | d Download Limit | q Quit"
        );
        assert!(lines[1].starts_with("debian.iso"));
        assert!(lines[4].starts_with("fedora.iso"));
        assert!(lines[7].starts_with("3 Torrents: 1 downloading; 1 seeding; 1 paused"));
    }

    #[test]
    fn dialog_draws_over_list() {
        let mut app = sample_app(60, TERM_H);
        app.dialog = Some(Dialog::Remove {
            id: 2,
            prompt: YesNo::new("Remove debian.iso?"),
        });
        let output = render_to_string(60, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("│ Remove debian.iso? │"));
        assert!(output.lines().last().unwrap_or("").starts_with("3 Torrents"));
    }
}

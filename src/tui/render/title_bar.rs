use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{overwrite_tail, truncate_to_width};

const GLOBAL_HELP: &str = "| s Sort | u Upload Limit | d Download Limit | q Quit";
const TASK_HELP: &str = "| p Pause/Unpause | r Remove | v Verify ";

/// Render the title bar: daemon address on the left, key help on the right
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let mut help = String::new();
    if app.viewport.focus().is_some() {
        help.push_str(TASK_HELP);
    }
    help.push_str(GLOBAL_HELP);
    let help = truncate_to_width(&help, width);

    let status = format!("Transmission @ {}", app.endpoint);
    let line = overwrite_tail(&status, &help, width);

    frame.render_widget(Paragraph::new(line).style(app.theme.bar()), area);
}

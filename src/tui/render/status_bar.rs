use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::TaskStatus;
use crate::tui::app::App;
use crate::util::format::scale_bytes;
use crate::util::unicode::{fit_left, pad_left};

/// Render the status bar: task counts on the left, aggregate speeds
/// aligned with the rate columns on the right
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let stats = app.registry.stats();
    let widths = &app.widths;
    let bar = app.theme.bar();

    let count = |status: TaskStatus| app.tasks.iter().filter(|t| t.status == status).count();
    let summary = format!(
        "{} Torrents: {} downloading; {} seeding; {} paused",
        stats.torrent_count(),
        count(TaskStatus::Downloading),
        count(TaskStatus::Seeding),
        stats.paused_torrent_count(),
    );
    let rates_column = width.saturating_sub(widths.rate_download + widths.rate_upload + 3);

    let line = Line::from(vec![
        Span::styled(fit_left(&summary, rates_column), bar),
        Span::styled("D", bar),
        Span::styled(
            pad_left(&scale_bytes(stats.download_speed()), widths.rate_download),
            app.theme.download_badge(),
        ),
        Span::styled(" U", bar),
        Span::styled(
            pad_left(&scale_bytes(stats.upload_speed()), widths.rate_upload),
            app.theme.upload_badge(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(bar), area);
}

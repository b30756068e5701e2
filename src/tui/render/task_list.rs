use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Task, TaskStatus};
use crate::tui::app::App;
use crate::tui::viewport::ITEM_ROWS;
use crate::util::format::{DurationStyle, scale_bytes, scale_time};
use crate::util::unicode::{display_width, overwrite_tail, pad_left, split_at_width};

/// Render the visible tasks, plus the lookahead item if any of it fits
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let range = app.viewport.visible_range();
    let first = range.start;
    for index in range {
        let y = (index - first) * ITEM_ROWS;
        if y >= area.height as usize {
            break;
        }
        let focused = app.viewport.focus() == Some(index);
        render_task(frame, app, &app.tasks[index], focused, area, y as u16);
    }
}

fn render_task(frame: &mut Frame, app: &App, task: &Task, focused: bool, area: Rect, y: u16) {
    let width = area.width as usize;
    let widths = &app.widths;
    let download_col = widths.download_column(width) as u16;
    let upload_col = widths.upload_column(width) as u16;
    let complete = task.is_complete();

    // Title row: name, size annotation and progress fill
    let size = if complete {
        format!(" {}", scale_bytes(task.size_when_done))
    } else {
        format!(
            " {} / {}",
            scale_bytes(task.current_size),
            scale_bytes(task.size_when_done)
        )
    };
    let title = overwrite_tail(&task.name, &size, widths.title);
    let filled = (widths.title as f64 * task.percent_done).floor() as usize;
    let (done, rest) = split_at_width(&title, filled);

    let emphasis = if focused {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };
    let title_line = Line::from(vec![
        Span::styled(
            done.to_string(),
            app.theme.progress(task).add_modifier(emphasis),
        ),
        Span::styled(
            rest.to_string(),
            Style::default().add_modifier(Modifier::REVERSED | emphasis),
        ),
    ]);
    put(frame, area, 0, y, widths.title, Paragraph::new(title_line));

    if task.status == TaskStatus::Downloading {
        let badge = badge_line(
            "D",
            scale_bytes(task.rate_download),
            widths.rate_download,
            app.theme.download_badge(),
        );
        put(frame, area, download_col, y, widths.rate_download + 1, badge);
    }
    if matches!(task.status, TaskStatus::Downloading | TaskStatus::Seeding) {
        let badge = badge_line(
            "U",
            scale_bytes(task.rate_upload),
            widths.rate_upload,
            app.theme.upload_badge(),
        );
        put(frame, area, upload_col, y, widths.rate_upload + 1, badge);
    }

    // Status row
    let y = y + 1;
    if y >= area.height {
        return;
    }
    let mut status = status_word(task).to_string();
    if !complete {
        status.push_str(&format!(" ({}%)", (task.percent_done * 100.0).floor() as u64));
    }
    let peers = pad_left(
        &peer_counts(task),
        widths.title.saturating_sub(display_width(&status)),
    );
    let style = if focused {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };
    let status_line = Line::from(format!("{}{}", status, peers)).style(style);
    put(frame, area, 0, y, widths.title, Paragraph::new(status_line));

    if !complete {
        let badge = badge_line(
            "T",
            scale_time(task.eta, DurationStyle::Short),
            widths.rate_download,
            app.theme.info_badge(),
        );
        put(frame, area, download_col, y, widths.rate_download + 1, badge);
    }
    let badge = badge_line(
        "R",
        task.ratio.to_string(),
        widths.rate_upload,
        app.theme.info_badge(),
    );
    put(frame, area, upload_col, y, widths.rate_upload + 1, badge);
}

fn status_word(task: &Task) -> &str {
    match task.status {
        TaskStatus::QueuedToCheck => "will verify",
        TaskStatus::Checking => "verifying",
        _ if !task.error_string.is_empty() => task.error_string.as_str(),
        TaskStatus::Seeding => "seeding",
        TaskStatus::Stopped => "paused",
        TaskStatus::Downloading if task.rate_download > 0 => "downloading",
        TaskStatus::Downloading => "idle",
        TaskStatus::Unknown(_) => "unknown status",
    }
}

fn peer_counts(task: &Task) -> String {
    let plural = |n: u64, one: &'static str, many: &'static str| if n == 1 { one } else { many };
    format!(
        "{} {} {} {}",
        task.seeders,
        plural(task.seeders, "seed", "seeds"),
        task.leechers,
        plural(task.leechers, "leech", "leeches"),
    )
}

/// Marker letter followed by a value right-aligned in `cells`
fn badge_line(marker: &'static str, value: String, cells: usize, style: Style) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(marker, style),
        Span::styled(pad_left(&value, cells), style),
    ]))
}

/// Draw `widget` at (x, y) relative to `area`, clipped to it
fn put(frame: &mut Frame, area: Rect, x: u16, y: u16, width: usize, widget: Paragraph) {
    if x >= area.width || y >= area.height {
        return;
    }
    let width = (width as u16).min(area.width - x);
    let rect = Rect::new(area.x + x, area.y + y, width, 1);
    frame.render_widget(widget, rect);
}

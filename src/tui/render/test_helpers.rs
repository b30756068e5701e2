use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use serde_json::{Map, Value, json};

use crate::model::Registry;
use crate::model::task::{TaskRecord, TaskStatus, record};
use crate::rpc::wire::Reply;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Half-downloaded task: 1K of 2K, 1.5K/s down, 1 minute left.
pub fn downloading_record() -> TaskRecord {
    let mut r = record(1, "ubuntu.iso", TaskStatus::Downloading);
    r.size_when_done = 2048;
    r.left_until_done = 1024;
    r.rate_download = 1536;
    r.eta = 90;
    r.upload_ratio = -1.0;
    r.seeders = 3;
    r.leechers = 1;
    r
}

/// Finished task seeding at 512B/s.
pub fn seeding_record() -> TaskRecord {
    let mut r = record(2, "debian.iso", TaskStatus::Seeding);
    r.size_when_done = 3 * 1024 * 1024;
    r.rate_upload = 512;
    r.upload_ratio = 2.0;
    r.seeders = 1;
    r.leechers = 2;
    r
}

/// Stopped task with a tracker error.
pub fn stopped_record() -> TaskRecord {
    let mut r = record(3, "fedora.iso", TaskStatus::Stopped);
    r.size_when_done = 4096;
    r.left_until_done = 4096;
    r.error = 2;
    r.error_string = "tracker unreachable".into();
    r
}

/// App over a registry holding `records` and the given aggregate stats.
pub fn app_with(records: Vec<TaskRecord>, stats: Value, w: u16, h: u16) -> App {
    let mut registry = Registry::new();
    registry.apply(Reply::TaskList(records));
    registry.apply(Reply::Stats(object(stats)));
    App::new("localhost:9091".into(), registry, Theme::default(), w, h)
}

/// App with one downloading, one seeding and one stopped task.
pub fn sample_app(w: u16, h: u16) -> App {
    app_with(
        vec![downloading_record(), seeding_record(), stopped_record()],
        json!({
            "torrentCount": 3,
            "pausedTorrentCount": 1,
            "downloadSpeed": 1536,
            "uploadSpeed": 512,
        }),
        w,
        h,
    )
}

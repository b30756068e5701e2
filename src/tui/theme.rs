use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;
use crate::model::task::{Task, TaskStatus};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// `D` badges and the aggregate download speed
    pub download: Color,
    /// `U` badges and the aggregate upload speed
    pub upload: Color,
    /// ETA and ratio badges
    pub badge: Color,
    /// Progress fill while data is flowing in
    pub transferring: Color,
    pub seeding: Color,
    /// Progress fill of a downloading task with no throughput
    pub idle: Color,
    pub checking: Color,
    pub paused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            download: Color::Blue,
            upload: Color::Red,
            badge: Color::White,
            transferring: Color::Blue,
            seeding: Color::Green,
            idle: Color::Cyan,
            checking: Color::Magenta,
            paused: Color::White,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "download" => theme.download = color,
                "upload" => theme.upload = color,
                "badge" => theme.badge = color,
                "transferring" => theme.transferring = color,
                "seeding" => theme.seeding = color,
                "idle" => theme.idle = color,
                "checking" => theme.checking = color,
                "paused" => theme.paused = color,
                _ => tracing::warn!(slot = %key, "unknown color slot"),
            }
        }

        theme
    }

    /// Title and status bars
    pub fn bar(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn download_badge(&self) -> Style {
        Style::default()
            .fg(self.download)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn upload_badge(&self) -> Style {
        Style::default()
            .fg(self.upload)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn info_badge(&self) -> Style {
        Style::default()
            .fg(self.badge)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Style of the filled part of a task's progress bar. First match
    /// wins: seeding, paused, checking, idle, still transferring, done.
    pub fn progress(&self, task: &Task) -> Style {
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        match task.status {
            TaskStatus::Seeding => reversed.fg(self.seeding),
            TaskStatus::Stopped => reversed
                .fg(self.paused)
                .add_modifier(Modifier::UNDERLINED),
            TaskStatus::Checking => reversed.fg(self.checking),
            _ if task.rate_download == 0 => reversed.fg(self.idle),
            _ if !task.is_complete() => reversed.fg(self.transferring),
            _ => reversed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::record;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("seeding".into(), "#112233".into());
        ui.colors.insert("upload".into(), "not-a-color".into());
        ui.colors.insert("nonsense".into(), "#000000".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.seeding, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.upload, Color::Red);
        assert_eq!(theme.download, Color::Blue);
    }

    #[test]
    fn test_progress_style_precedence() {
        let theme = Theme::default();
        let task = |status, rate: i64, left: i64| {
            let mut r = record(1, "t", status);
            r.rate_download = rate;
            r.size_when_done = 100;
            r.left_until_done = left;
            Task::from(r)
        };

        let seeding = theme.progress(&task(TaskStatus::Seeding, 0, 0));
        assert_eq!(seeding.fg, Some(theme.seeding));

        let paused = theme.progress(&task(TaskStatus::Stopped, 0, 50));
        assert_eq!(paused.fg, Some(theme.paused));
        assert!(paused.add_modifier.contains(Modifier::UNDERLINED));

        let checking = theme.progress(&task(TaskStatus::Checking, 500, 50));
        assert_eq!(checking.fg, Some(theme.checking));

        let idle = theme.progress(&task(TaskStatus::Downloading, 0, 50));
        assert_eq!(idle.fg, Some(theme.idle));

        let active = theme.progress(&task(TaskStatus::Downloading, 500, 50));
        assert_eq!(active.fg, Some(theme.transferring));

        let done = theme.progress(&task(TaskStatus::QueuedToCheck, 500, 0));
        assert_eq!(done.fg, None);
        assert!(done.add_modifier.contains(Modifier::REVERSED));
    }
}

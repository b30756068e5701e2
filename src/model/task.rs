use std::fmt;

use serde::Deserialize;

/// Daemon-side status of a task. The daemon reports these as bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Waiting in queue to check files
    QueuedToCheck,
    /// Checking files
    Checking,
    Downloading,
    Seeding,
    Stopped,
    /// A status code this client does not know
    Unknown(i64),
}

impl TaskStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => TaskStatus::QueuedToCheck,
            2 => TaskStatus::Checking,
            4 => TaskStatus::Downloading,
            8 => TaskStatus::Seeding,
            16 => TaskStatus::Stopped,
            other => TaskStatus::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            TaskStatus::QueuedToCheck => 1,
            TaskStatus::Checking => 2,
            TaskStatus::Downloading => 4,
            TaskStatus::Seeding => 8,
            TaskStatus::Stopped => 16,
            TaskStatus::Unknown(code) => code,
        }
    }
}

/// Upload ratio with the daemon's two sentinel values decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// Sentinel -1: nothing has been shared yet
    NeverShared,
    /// Sentinel -2: unbounded
    Unbounded,
    Value(f64),
}

impl Ratio {
    pub fn from_raw(raw: f64) -> Self {
        if raw == -2.0 {
            Ratio::Unbounded
        } else if raw == -1.0 {
            Ratio::NeverShared
        } else {
            Ratio::Value(raw)
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::NeverShared => f.write_str("0.0"),
            Ratio::Unbounded => f.write_str("oo"),
            Ratio::Value(v) => write!(f, "{:.1}", v),
        }
    }
}

fn unknown_eta() -> i64 {
    -1
}

/// One task exactly as the daemon's `torrent-get` reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    pub name: String,
    pub status: i64,
    #[serde(default)]
    pub seeders: i64,
    #[serde(default)]
    pub leechers: i64,
    #[serde(default)]
    pub rate_download: i64,
    #[serde(default)]
    pub rate_upload: i64,
    #[serde(default = "unknown_eta")]
    pub eta: i64,
    #[serde(default)]
    pub upload_ratio: f64,
    #[serde(default)]
    pub size_when_done: i64,
    #[serde(default)]
    pub left_until_done: i64,
    #[serde(default)]
    pub added_date: i64,
    #[serde(default)]
    pub announce_response: String,
    #[serde(default)]
    pub error: i64,
    #[serde(default)]
    pub error_string: String,
}

/// A task as the UI sees it: negative counters clamped, ratio sentinels
/// decoded and progress derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub status: TaskStatus,
    pub seeders: u64,
    pub leechers: u64,
    pub rate_download: u64,
    pub rate_upload: u64,
    /// Seconds remaining; negative means unknown
    pub eta: i64,
    pub ratio: Ratio,
    pub size_when_done: u64,
    pub left_until_done: u64,
    /// `size_when_done - left_until_done`
    pub current_size: u64,
    /// Fraction in [0, 1]
    pub percent_done: f64,
    pub added_date: i64,
    pub announce_response: String,
    pub error: i64,
    pub error_string: String,
}

fn non_negative(v: i64) -> u64 {
    v.max(0) as u64
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let size_when_done = non_negative(record.size_when_done);
        let left_until_done = non_negative(record.left_until_done).min(size_when_done);
        let current_size = size_when_done - left_until_done;
        let percent_done = if size_when_done == 0 || current_size == 0 {
            0.0
        } else {
            current_size as f64 / size_when_done as f64
        };

        Task {
            id: record.id,
            name: record.name,
            status: TaskStatus::from_code(record.status),
            seeders: non_negative(record.seeders),
            leechers: non_negative(record.leechers),
            rate_download: non_negative(record.rate_download),
            rate_upload: non_negative(record.rate_upload),
            eta: record.eta,
            ratio: Ratio::from_raw(record.upload_ratio),
            size_when_done,
            left_until_done,
            current_size,
            percent_done,
            added_date: record.added_date,
            announce_response: record.announce_response,
            error: record.error,
            error_string: record.error_string,
        }
    }
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.percent_done >= 1.0
    }
}

#[cfg(test)]
pub(crate) fn record(id: i64, name: &str, status: TaskStatus) -> TaskRecord {
    TaskRecord {
        id,
        name: name.to_string(),
        status: status.code(),
        seeders: 0,
        leechers: 0,
        rate_download: 0,
        rate_upload: 0,
        eta: -1,
        upload_ratio: 0.0,
        size_when_done: 0,
        left_until_done: 0,
        added_date: 0,
        announce_response: String::new(),
        error: 0,
        error_string: String::new(),
    }
}

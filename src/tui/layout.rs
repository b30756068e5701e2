use crate::model::stats::SessionStats;
use crate::model::task::{Task, TaskStatus};
use crate::util::format::{DurationStyle, scale_bytes, scale_time};

/// Column widths shared by the task list and the status bar.
///
/// The two rate widths only ever grow until `reset`, so changing digit
/// counts in the throughput figures do not make the columns jump around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    /// Download rate, ETA and aggregate download speed
    pub rate_download: usize,
    /// Upload rate, ratio and aggregate upload speed
    pub rate_upload: usize,
    /// Name/progress column
    pub title: usize,
}

impl ColumnWidths {
    /// Recompute from the tasks in view (including the lookahead item).
    pub fn recompute(&mut self, visible: &[Task], stats: &SessionStats, total_width: usize) {
        let download = visible
            .iter()
            .flat_map(|t| {
                [
                    scale_bytes(t.rate_download).len(),
                    scale_time(t.eta, DurationStyle::Short).len(),
                ]
            })
            .chain(std::iter::once(scale_bytes(stats.download_speed()).len()))
            .max()
            .unwrap_or(0);
        let upload = visible
            .iter()
            .flat_map(|t| [scale_bytes(t.rate_upload).len(), t.ratio.to_string().len()])
            .chain(std::iter::once(scale_bytes(stats.upload_speed()).len()))
            .max()
            .unwrap_or(0);

        self.rate_download = self.rate_download.max(download);
        self.rate_upload = self.rate_upload.max(upload);

        let mut title = total_width.saturating_sub(self.rate_upload + 2);
        // reserve the download badge column only when one is on screen
        if visible.iter().any(|t| t.status == TaskStatus::Downloading) {
            title = title.saturating_sub(self.rate_download + 2);
        }
        self.title = title;
    }

    /// Forget the widest values seen so far.
    pub fn reset(&mut self) {
        *self = ColumnWidths::default();
    }

    /// Column of the `D`/`T` badge marker
    pub fn download_column(&self, total_width: usize) -> usize {
        total_width.saturating_sub(self.rate_download + self.rate_upload + 3)
    }

    /// Column of the `U`/`R` badge marker
    pub fn upload_column(&self, total_width: usize) -> usize {
        total_width.saturating_sub(self.rate_upload + 1)
    }
}

use std::cmp::Ordering;

use crate::model::task::Task;

/// Field the task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    /// Date the task was added
    Age,
    Progress,
    Seeders,
    Leechers,
    Size,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::Age,
        SortKey::Progress,
        SortKey::Seeders,
        SortKey::Leechers,
        SortKey::Size,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Age => "Age",
            SortKey::Progress => "Progress",
            SortKey::Seeders => "Seeds",
            SortKey::Leechers => "Leeches",
            SortKey::Size => "Size",
        }
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Age => a.added_date.cmp(&b.added_date),
            SortKey::Progress => a.percent_done.total_cmp(&b.percent_done),
            SortKey::Seeders => a.seeders.cmp(&b.seeders),
            SortKey::Leechers => a.leechers.cmp(&b.leechers),
            SortKey::Size => a.size_when_done.cmp(&b.size_when_done),
        }
    }
}

/// An entry of the sort-order menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortChoice {
    Key(SortKey),
    ToggleReverse,
}

impl SortChoice {
    pub fn label(self) -> &'static str {
        match self {
            SortChoice::Key(key) => key.label(),
            SortChoice::ToggleReverse => "Reverse",
        }
    }
}

/// Menu entries in display order: every key, then the reverse toggle.
pub fn menu_choices() -> Vec<SortChoice> {
    SortKey::ALL
        .into_iter()
        .map(SortChoice::Key)
        .chain(std::iter::once(SortChoice::ToggleReverse))
        .collect()
}

/// Current ordering of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub key: SortKey,
    pub reverse: bool,
}

impl SortOrder {
    pub fn apply(&mut self, choice: SortChoice) {
        match choice {
            SortChoice::Key(key) => self.key = key,
            SortChoice::ToggleReverse => self.reverse = !self.reverse,
        }
    }
}

/// Stable sort of `tasks` by `order`. Equal elements keep their relative
/// order in both directions.
pub fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    if order.reverse {
        tasks.sort_by(|a, b| order.key.compare(b, a));
    } else {
        tasks.sort_by(|a, b| order.key.compare(a, b));
    }
}

/// Sorted copy of a task snapshot
pub fn sorted(tasks: &[Task], order: SortOrder) -> Vec<Task> {
    let mut out = tasks.to_vec();
    sort_tasks(&mut out, order);
    out
}

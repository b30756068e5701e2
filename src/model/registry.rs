use crate::model::stats::SessionStats;
use crate::model::task::Task;
use crate::rpc::wire::{Reply, Tag};

/// Latest snapshot of the daemon's task list and aggregate statistics.
///
/// Only the session writes here, once per update pass. Each task-list reply
/// replaces the whole collection; nothing is merged or diffed.
#[derive(Debug, Default)]
pub struct Registry {
    tasks: Vec<Task>,
    stats: SessionStats,
    list_refreshes: u64,
    stats_refreshes: u64,
    config_refreshes: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn contains(&self, id: i64) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Number of task-list replies applied so far
    pub fn list_refreshes(&self) -> u64 {
        self.list_refreshes
    }

    /// True once every recurring reply kind has been applied at least once.
    pub fn is_primed(&self) -> bool {
        self.list_refreshes > 0 && self.stats_refreshes > 0 && self.config_refreshes > 0
    }

    /// Apply a decoded reply and return which request it answered.
    pub fn apply(&mut self, reply: Reply) -> Tag {
        match reply {
            Reply::TaskList(records) => {
                self.tasks = records.into_iter().map(Task::from).collect();
                self.list_refreshes += 1;
                Tag::TaskList
            }
            Reply::Stats(payload) => {
                self.stats.merge(payload);
                self.stats_refreshes += 1;
                Tag::Stats
            }
            Reply::Config(payload) => {
                self.stats.merge(payload);
                self.config_refreshes += 1;
                Tag::Config
            }
            Reply::Ack => Tag::Command,
        }
    }
}

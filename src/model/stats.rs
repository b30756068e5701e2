use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Aggregate daemon statistics and settings, merged from `session-stats`
/// and `session-get` replies. Later keys overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    values: IndexMap<String, Value>,
}

impl SessionStats {
    pub fn merge(&mut self, payload: Map<String, Value>) {
        for (key, value) in payload {
            self.values.insert(key, value);
        }
    }

    fn int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }
    }

    pub fn torrent_count(&self) -> u64 {
        self.int("torrentCount").max(0) as u64
    }

    pub fn paused_torrent_count(&self) -> u64 {
        self.int("pausedTorrentCount").max(0) as u64
    }

    /// Aggregate download throughput in bytes/sec
    pub fn download_speed(&self) -> u64 {
        self.int("downloadSpeed").max(0) as u64
    }

    /// Aggregate upload throughput in bytes/sec
    pub fn upload_speed(&self) -> u64 {
        self.int("uploadSpeed").max(0) as u64
    }

    pub fn speed_limit_up(&self) -> i64 {
        self.int("speed-limit-up")
    }

    pub fn speed_limit_down(&self) -> i64 {
        self.int("speed-limit-down")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn merge_later_key_wins() {
        let mut stats = SessionStats::default();
        stats.merge(map(json!({"torrentCount": 3, "downloadSpeed": 100})));
        stats.merge(map(json!({"downloadSpeed": 250, "speed-limit-up": 50})));
        assert_eq!(stats.values.len(), 3);
        assert_eq!(stats.torrent_count(), 3);
        assert_eq!(stats.download_speed(), 250);
        assert_eq!(stats.speed_limit_up(), 50);
    }

    #[test]
    fn float_and_bool_values_read_as_integers() {
        let mut stats = SessionStats::default();
        stats.merge(map(json!({"speed-limit-up": 40.9, "torrentCount": true})));
        assert_eq!(stats.speed_limit_up(), 40);
        assert_eq!(stats.torrent_count(), 1);
    }

    #[test]
    fn missing_keys_read_as_zero() {
        let stats = SessionStats::default();
        assert_eq!(stats.upload_speed(), 0);
        assert_eq!(stats.speed_limit_down(), 0);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            host: default_host(),
            port: default_port(),
            rpc_path: default_rpc_path(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9091
}

fn default_rpc_path() -> String {
    "/transmission/rpc".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Minimum age before a recurring request is polled again
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: f64,
    /// How long one tick waits for terminal input
    #[serde(default = "default_input_timeout_ms")]
    pub input_timeout_ms: u64,
    /// Upper bound on the post-command wait for the daemon to catch up
    #[serde(default = "default_convergence_timeout_secs")]
    pub convergence_timeout_secs: f64,
    #[serde(default = "default_convergence_interval_ms")]
    pub convergence_interval_ms: u64,
    /// Upper bound on the initial fetch before the UI is shown
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: f64,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            refresh_secs: default_refresh_secs(),
            input_timeout_ms: default_input_timeout_ms(),
            convergence_timeout_secs: default_convergence_timeout_secs(),
            convergence_interval_ms: default_convergence_interval_ms(),
            startup_timeout_secs: default_startup_timeout_secs(),
            log_file: None,
            colors: HashMap::new(),
        }
    }
}

fn default_refresh_secs() -> f64 {
    1.0
}

fn default_input_timeout_ms() -> u64 {
    1000
}

fn default_convergence_timeout_secs() -> f64 {
    10.0
}

fn default_convergence_interval_ms() -> u64 {
    100
}

fn default_startup_timeout_secs() -> f64 {
    10.0
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

impl UiConfig {
    pub fn refresh(&self) -> Duration {
        secs(self.refresh_secs)
    }

    pub fn input_timeout(&self) -> Duration {
        Duration::from_millis(self.input_timeout_ms)
    }

    pub fn convergence_timeout(&self) -> Duration {
        secs(self.convergence_timeout_secs)
    }

    pub fn convergence_interval(&self) -> Duration {
        Duration::from_millis(self.convergence_interval_ms)
    }

    pub fn startup_timeout(&self) -> Duration {
        secs(self.startup_timeout_secs)
    }
}

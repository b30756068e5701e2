use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::Cli;
use crate::model::config::Config;

/// Error type for loading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid daemon address '{0}', expected HOST[:PORT]")]
    InvalidEndpoint(String),
}

/// Get the default config file path, respecting XDG_CONFIG_HOME
pub fn default_config_path() -> PathBuf {
    config_path_in(
        std::env::var("XDG_CONFIG_HOME").ok().map(PathBuf::from),
        std::env::var("HOME").ok().map(PathBuf::from),
    )
}

fn config_path_in(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| home.unwrap_or_else(|| PathBuf::from("/")).join(".config"));
    config_dir.join("tremote").join("config.toml")
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read the config from an explicit path, or from the default location.
/// Only the default file may be absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                read_config(&path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Split `HOST[:PORT]`. A bracketed IPv6 literal keeps its colons.
pub fn parse_endpoint(target: &str) -> Result<(String, Option<u16>), ConfigError> {
    let invalid = || ConfigError::InvalidEndpoint(target.to_string());

    let (host, port) = if let Some(rest) = target.strip_prefix('[') {
        let (host, after) = rest.split_once(']').ok_or_else(invalid)?;
        match after {
            "" => (host, None),
            _ => (host, Some(after.strip_prefix(':').ok_or_else(invalid)?)),
        }
    } else {
        match target.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (target, None),
        }
    };

    if host.is_empty() {
        return Err(invalid());
    }
    let port = match port {
        Some(p) => Some(p.parse::<u16>().ok().filter(|p| *p > 0).ok_or_else(invalid)?),
        None => None,
    };
    Ok((host.to_string(), port))
}

/// Layer command line overrides on top of a loaded config.
pub fn apply_cli(config: &mut Config, cli: &Cli) -> Result<(), ConfigError> {
    if let Some(target) = &cli.target {
        let (host, port) = parse_endpoint(target)?;
        config.daemon.host = host;
        if let Some(port) = port {
            config.daemon.port = port;
        }
    }
    if let Some(path) = &cli.log_file {
        config.ui.log_file = Some(path.clone());
    }
    if let Some(refresh) = cli.refresh {
        config.ui.refresh_secs = refresh;
    }
    Ok(())
}

/// Effective settings: command line, then config file, then defaults.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = load_config(cli.config.as_deref())?;
    apply_cli(&mut config, cli)?;
    Ok(config)
}

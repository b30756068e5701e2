use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "tremote",
    about = concat!("tremote v", env!("CARGO_PKG_VERSION"), " - watch and steer a Transmission daemon"),
    version
)]
pub struct Cli {
    /// Daemon address as HOST[:PORT] (default localhost:9091)
    pub target: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Write a debug log to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Seconds between refreshes of the task list and statistics
    #[arg(long)]
    pub refresh: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments() {
        let cli = Cli::try_parse_from(["tremote"]).unwrap();
        assert_eq!(cli.target, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.refresh, None);
    }

    #[test]
    fn all_arguments() {
        let cli = Cli::try_parse_from([
            "tremote",
            "nas:9000",
            "-c",
            "/tmp/tremote.toml",
            "--log-file",
            "/tmp/tremote.log",
            "--refresh",
            "2.5",
        ])
        .unwrap();
        assert_eq!(cli.target.as_deref(), Some("nas:9000"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tremote.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/tremote.log")));
        assert_eq!(cli.refresh, Some(2.5));
    }

    #[test]
    fn rejects_second_positional() {
        assert!(Cli::try_parse_from(["tremote", "a", "b"]).is_err());
    }
}

use clap::Parser;
use tremote::cli::commands::Cli;
use tremote::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load(cli)?;
    logging::init_logging(config.ui.log_file.as_deref())?;
    tracing::info!(
        host = %config.daemon.host,
        port = config.daemon.port,
        "starting"
    );
    tremote::tui::run(&config)
}

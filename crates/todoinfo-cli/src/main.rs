//! ToDo Info CLI entry point.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use todoinfo_cli::cli::Cli;
use todoinfo_cli::{commands, config};

#[tokio::main]
async fn main() {
    // Load .env.local / .env if present (for TODOINFO_TOKEN etc.)
    let env_files = config::load_env_files();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    for path in &env_files {
        debug!(path = %path.display(), "Loaded env file");
    }

    let state_dir = cli.state_dir();

    if let Err(e) = commands::execute(cli.command, &state_dir).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

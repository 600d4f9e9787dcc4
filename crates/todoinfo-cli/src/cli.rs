//! Command-line interface definition using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use todoinfo_api::types::MAX_HISTORY_DAYS;

use crate::config::{default_state_dir, STATE_DIR_ENV, TOKEN_ENV};

/// Default overall fetch deadline, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10 * 60;

/// Default history window, in days.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Build version string with git hash and build date.
pub fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "2.0.0 (abc1234, 2024-06-15)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// ToDo Info - how long have your Microsoft ToDo tasks been rotting?
#[derive(Parser, Debug)]
#[command(name = "todoinfo")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch tasks and print age statistics
    Stats(StatsArgs),

    /// Print historical trend graphs from stored snapshots
    History {
        /// Number of days to look back (1-366)
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_HISTORY_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_HISTORY_DAYS))
        )]
        days: u32,
    },

    /// Run the JSON web API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = todoinfo_api::config::DEFAULT_PORT)]
        port: u16,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Microsoft Graph access token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Use the built-in example lists instead of fetching
    #[arg(long, conflicts_with = "token")]
    pub example: bool,

    /// Do not record a history snapshot
    #[arg(long)]
    pub no_store: bool,

    /// Only show the N oldest tasks
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Overall fetch deadline in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_stats_defaults() {
        let cli = Cli::parse_from(["todoinfo", "stats", "--token", "abc"]);
        match cli.command {
            Commands::Stats(args) => {
                assert_eq!(args.token.as_deref(), Some("abc"));
                assert!(!args.example);
                assert!(!args.no_store);
                assert_eq!(args.top, None);
                assert_eq!(args.timeout, 600);
            }
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_cli_parse_stats_example() {
        let cli = Cli::parse_from(["todoinfo", "stats", "--example", "-n", "3", "--no-store"]);
        match cli.command {
            Commands::Stats(args) => {
                assert!(args.example);
                assert!(args.no_store);
                assert_eq!(args.top, Some(3));
            }
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_cli_example_conflicts_with_token() {
        let result = Cli::try_parse_from(["todoinfo", "stats", "--example", "--token", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_history() {
        let cli = Cli::parse_from(["todoinfo", "history"]);
        assert!(matches!(cli.command, Commands::History { days: 30 }));

        let cli = Cli::parse_from(["todoinfo", "history", "--days", "7"]);
        assert!(matches!(cli.command, Commands::History { days: 7 }));
    }

    #[test]
    fn test_cli_history_days_bounds() {
        let cli = Cli::parse_from(["todoinfo", "history", "--days", "366"]);
        assert!(matches!(cli.command, Commands::History { days: 366 }));

        assert!(Cli::try_parse_from(["todoinfo", "history", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["todoinfo", "history", "--days", "367"]).is_err());
        assert!(Cli::try_parse_from(["todoinfo", "history", "--days", "4294967295"]).is_err());
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["todoinfo", "serve", "--host", "0.0.0.0", "-p", "9000"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, 9000);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_state_dir_flag() {
        let cli = Cli::parse_from(["todoinfo", "--state-dir", "/tmp/todo", "version"]);
        assert_eq!(cli.state_dir(), PathBuf::from("/tmp/todo"));
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["todoinfo", "-vvv", "version"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);

        let cli = Cli::parse_from(["todoinfo", "version"]);
        assert_eq!(cli.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}

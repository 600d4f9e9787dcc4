//! Command handlers for CLI subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use todoinfo_api::{ApiConfig, AppState};
use todoinfo_graph::{get_tasks, FetchConfig, GraphClient};
use todoinfo_metrics::{example_task_lists, Metrics};
use todoinfo_persistence::{StatsSnapshot, StatsStore, TimeSeriesPoint};

use crate::cli::{version_string, Commands, StatsArgs, DEFAULT_HISTORY_DAYS};
use crate::config::{data_dir, TOKEN_ENV};
use crate::graph::{AsciiGraph, Series};
use crate::render;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command.
pub async fn execute(command: Commands, state_dir: &Path) -> Result<()> {
    let store = StatsStore::new(data_dir(state_dir));

    match command {
        Commands::Stats(args) => cmd_stats(&store, args).await,
        Commands::History { days } => cmd_history(&store, days),
        Commands::Serve { host, port } => cmd_serve(store, host, port).await,
        Commands::Version => {
            println!("todoinfo {}", version_string());
            Ok(())
        }
    }
}

async fn cmd_stats(store: &StatsStore, args: StatsArgs) -> Result<()> {
    let lists = if args.example {
        example_task_lists(Utc::now())
    } else {
        let token = args.token.ok_or_else(|| {
            format!(
                "no access token: pass --token or set {} (use --example for demo data)",
                TOKEN_ENV
            )
        })?;
        let config = FetchConfig::default().with_timeout(Duration::from_secs(args.timeout));

        info!(timeout_secs = args.timeout, "Fetching task lists");
        get_tasks(Arc::new(GraphClient::new()), &token, config)
            .await
            .map_err(|e| {
                if e.is_auth_error() {
                    format!("access token rejected, sign in again: {}", e)
                } else {
                    format!("failed to fetch tasks: {}", e)
                }
            })?
    };

    let metrics = Metrics::new(lists);

    // Demo data never enters the history.
    if !args.no_store && !args.example {
        match store.store(&StatsSnapshot::from_metrics(&metrics)) {
            Ok(path) => debug!(path = %path.display(), "Recorded snapshot"),
            Err(e) => {
                warn!(error = %e, "Failed to store statistics");
                eprintln!("Warning: failed to store statistics: {}", e);
            }
        }
    }

    println!("{}", render::global_stats(&metrics));
    println!("{}", render::list_ages(&metrics));
    println!("{}", render::all_tasks(&metrics, args.top));
    if let Some(champion) = render::champion(&metrics) {
        println!("\n{}", champion);
    }

    // History is best effort here; `todoinfo history` reports errors.
    match store.time_series(DEFAULT_HISTORY_DAYS, Utc::now()) {
        Ok(points) if !points.is_empty() => print_graphs(&points, DEFAULT_HISTORY_DAYS),
        Ok(_) => debug!("No history to graph"),
        Err(e) => debug!(error = %e, "Skipping history graphs"),
    }

    Ok(())
}

fn cmd_history(store: &StatsStore, days: u32) -> Result<()> {
    let points = store.time_series(days, Utc::now())?;
    if points.is_empty() {
        println!("No history recorded in {}", store.data_dir().display());
        println!("Run `todoinfo stats` to record a snapshot.");
        return Ok(());
    }

    print_graphs(&points, days);
    Ok(())
}

async fn cmd_serve(store: StatsStore, host: String, port: u16) -> Result<()> {
    let config = ApiConfig::new(host, port);
    let state = AppState::new(
        config.clone(),
        Arc::new(GraphClient::new()),
        FetchConfig::default(),
        store,
    );

    println!("Serving ToDo Info API on http://{}", config.bind_address());
    todoinfo_api::serve(config, state).await?;
    Ok(())
}

fn print_graphs(points: &[TimeSeriesPoint], days: u32) {
    let graph = AsciiGraph::new();

    println!(
        "{}{}",
        render::section(&format!("📈 Historical Task Age Trend (Last {} Days)", days)),
        graph.render(points, Series::MaxAge)
    );
    println!(
        "{}{}",
        render::section(&format!("📈 Historical Task Count Trend (Last {} Days)", days)),
        graph.render(points, Series::TaskCount)
    );
}

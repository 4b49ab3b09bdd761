use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use sensor_deck::config::{AppConfig, LayoutMode};
use sensor_deck::dashboard::Dashboard;
use sensor_deck::report::render_dashboard;
use sensor_deck::sources::{
    load_batch, JsonFileSource, LocalTimeFormatter, PollEvent, PollWorker, RangeStore,
};
use std::path::PathBuf;

/// sensor-deck - A dashboard for wireless temperature and humidity sensors
#[derive(Parser, Debug, Clone)]
#[command(name = "sensor-deck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Poll batch files (JSON) to apply, in order
    #[arg(value_name = "BATCH_FILE")]
    batches: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Range file with per-sensor good bands, layered over the config's ranges
    #[arg(short = 'r', long = "ranges", value_name = "PATH")]
    ranges: Option<PathBuf>,

    /// Only show sensors whose display name contains TEXT (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    search: Option<String>,

    /// Only show favorite sensors
    #[arg(long = "favorites-only")]
    favorites_only: bool,

    /// Hide sensors with exactly one metric out of band
    #[arg(long = "hide-minor")]
    hide_minor: bool,

    /// Hide sensors with two or more metrics out of band
    #[arg(long = "hide-major")]
    hide_major: bool,

    /// Mark a sensor as favorite (repeatable; first one is shown first)
    #[arg(short = 'f', long = "favorite", value_name = "SENSOR_ID")]
    favorites: Vec<String>,

    /// Container width in pixels for the flow layout
    #[arg(short = 'w', long = "width", value_name = "PX", default_value = "1280")]
    width: i32,

    /// Use a fixed grid with this many cards per row
    #[arg(short = 'g', long = "grid", value_name = "COLUMNS")]
    grid: Option<u32>,

    /// IANA time zone for timestamps (e.g. America/New_York)
    #[arg(short = 't', long = "timezone", value_name = "ZONE")]
    timezone: Option<String>,

    /// Keep polling the last batch file and reprint on every change
    #[arg(long = "watch")]
    watch: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting sensor-deck v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("sensor-deck: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    // Command line overrides
    if let Some(columns) = cli.grid {
        config.layout.mode = LayoutMode::Grid { columns };
    }
    if let Some(zone) = &cli.timezone {
        config.timezone = Some(zone.clone());
    }
    Ok(config)
}

fn build_dashboard(cli: &Cli, config: &AppConfig) -> Dashboard {
    let mut dashboard = Dashboard::from_config(config);
    if let Some(text) = &cli.search {
        dashboard.set_search_text(text.as_str());
    }
    if cli.favorites_only {
        dashboard.set_hide_non_favorites(true);
    }
    if cli.hide_minor {
        dashboard.set_show_minor(false);
    }
    if cli.hide_major {
        dashboard.set_show_major(false);
    }
    dashboard.request_favorites(cli.favorites.iter().cloned());
    dashboard.set_container_width(cli.width);
    dashboard
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let mut ranges = config.range_store();
    if let Some(path) = &cli.ranges {
        ranges.merge(RangeStore::load_from_path(path)?);
    }
    debug!("{} sensors with custom ranges", ranges.len());

    let formatter = config.timestamp_formatter()?;
    let mut dashboard = build_dashboard(&cli, &config);

    for path in &cli.batches {
        let batch = load_batch(path)?;
        dashboard.apply_batch(&batch, &ranges, &formatter);
    }

    if !dashboard.pending_favorites().is_empty() {
        warn!(
            "Favorites not seen yet: {}",
            dashboard.pending_favorites().join(", ")
        );
    }

    print!("{}", render_dashboard(&dashboard));

    if cli.watch {
        let Some(path) = cli.batches.last().cloned() else {
            anyhow::bail!("--watch needs at least one batch file");
        };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        runtime.block_on(watch(
            path,
            config.poll_interval(),
            dashboard,
            ranges,
            formatter,
        ))?;
    }

    Ok(())
}

/// Poll `path` until interrupted, reprinting whenever the dashboard changes
async fn watch(
    path: PathBuf,
    interval: std::time::Duration,
    mut dashboard: Dashboard,
    ranges: RangeStore,
    formatter: LocalTimeFormatter,
) -> Result<()> {
    info!("Watching {} every {:?}", path.display(), interval);

    let worker = PollWorker::new(Box::new(JsonFileSource::new(path)), interval);
    let (handle, mut rx) = worker.spawn(4);

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(PollEvent::Batch(batch)) => {
                        if dashboard.apply_batch(&batch, &ranges, &formatter) {
                            println!();
                            print!("{}", render_dashboard(&dashboard));
                        }
                    }
                    Some(PollEvent::Failed(reason)) => {
                        warn!("Poll failed: {}", reason);
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }

    handle.abort();
    Ok(())
}

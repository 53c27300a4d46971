mod catalog;
mod observer;
mod propagate;
mod tracker;
mod view;
mod web;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::{format_age, Catalog, CatalogHandle};
use crate::propagate::Sgp4Factory;
use crate::tracker::Tracker;
use crate::view::{SkySnapshot, SortKey, ViewOptions};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "sat-overhead")]
#[command(about = "Track which catalog objects are above an observer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ConfigArg {
    /// Configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

#[derive(clap::Args)]
struct ListArgs {
    #[command(flatten)]
    config: ConfigArg,
    /// Sort order, overriding the configured one
    #[arg(short, long, value_enum)]
    sort: Option<SortKey>,
    /// Only show names containing this text
    #[arg(short, long, default_value = "")]
    filter: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TLE file and report what was accepted
    Validate { tle: PathBuf },
    /// Print the objects currently above the observer
    List(ListArgs),
    /// Print the visible set on every tick until interrupted
    Watch(ListArgs),
    /// Run the HTTP API
    Serve(ConfigArg),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { tle } => validate(&tle),
        Commands::List(args) => list(&args),
        Commands::Watch(args) => watch(&args),
        Commands::Serve(args) => serve(&args.config),
    }
}

fn validate(path: &Path) -> ExitCode {
    let catalog = match Catalog::from_file(path, &Sgp4Factory) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Catalog error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let diagnostics = catalog.diagnostics();
    println!(
        "Catalog is valid ({} records, {} lines, {} skipped, {} rejected)",
        catalog.len(),
        diagnostics.lines,
        diagnostics.skipped_lines,
        diagnostics.rejected.len()
    );
    for rejected in &diagnostics.rejected {
        println!("  rejected {}: {}", rejected.name, rejected.reason);
    }
    println!("  {}", format_age(catalog.freshness(), Utc::now()));
    ExitCode::SUCCESS
}

fn load(path: &Path) -> Option<(Config, Catalog)> {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", path.display(), e);
            return None;
        }
    };
    match Catalog::from_file(&config.catalog.path, &Sgp4Factory) {
        Ok(catalog) => Some((config, catalog)),
        Err(e) => {
            eprintln!("Catalog error: {}", e);
            None
        }
    }
}

fn tracker_for(config: &Config, catalog: Catalog) -> Tracker {
    Tracker::new(
        CatalogHandle::new(catalog),
        config.observer.observer(),
        config.tracking.cutoffs(),
    )
}

fn print_snapshot(tracker: &Tracker, config: &Config, args: &ListArgs) {
    let options = ViewOptions {
        sort: args.sort.unwrap_or(config.view.sort),
        ..config.view.clone()
    };
    let now = Utc::now();
    let snapshot = SkySnapshot::build(
        tracker.items(),
        tracker.selection(),
        &options,
        &args.filter,
        tracker.cutoffs().elevation_deg,
        now,
    );

    let observer = tracker.observer();
    println!(
        "{} ({:.4}, {:.4}) at {}",
        observer.label,
        observer.latitude_deg,
        observer.longitude_deg,
        now.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(city) = observer.nearest_city() {
        println!("{}", city);
    }
    if let Some(catalog) = tracker.catalog().snapshot() {
        println!("{}", format_age(catalog.freshness(), now));
    }
    println!("{} visible, sorted by {}", snapshot.visible, snapshot.sort);
    for entry in &snapshot.entries {
        println!("  {:<28} {}", entry.item.name, entry.meta);
    }
}

fn list(args: &ListArgs) -> ExitCode {
    let Some((config, catalog)) = load(&args.config.config) else {
        return ExitCode::FAILURE;
    };
    let mut tracker = tracker_for(&config, catalog);

    // two ticks a second apart so angular rates are populated
    let now = Utc::now();
    tracker.tick_at(now - Duration::seconds(1));
    tracker.tick_at(now);

    print_snapshot(&tracker, &config, args);
    ExitCode::SUCCESS
}

fn watch(args: &ListArgs) -> ExitCode {
    let Some((config, catalog)) = load(&args.config.config) else {
        return ExitCode::FAILURE;
    };
    let mut tracker = tracker_for(&config, catalog);
    let every = config.tracking.interval;

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async {
        let mut interval = tokio::time::interval(every);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    tracker.tick_at(Utc::now());
                    println!();
                    print_snapshot(&tracker, &config, args);
                }
                _ = &mut ctrl_c => {
                    log::info!("Interrupted");
                    break;
                }
            }
        }
    });
    ExitCode::SUCCESS
}

fn serve(config_path: &Path) -> ExitCode {
    let Some((config, catalog)) = load(config_path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config, catalog)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aoe_insights::api::state::{AppState, Dataset};
use aoe_insights::calculate::{
    correct_civs_for_older_matches, derive_options, filter_matches, player_stats, project,
    project_ratings, rating_tick_label, uptime_tick_label, DashboardView,
};
use aoe_insights::config::AppConfig;
use aoe_insights::models::{
    us_date, Dimension, FilterSelection, Metric, ProfileId, Selection, Tier,
};
use aoe_insights::storage::{self, StorageConfig};

#[derive(Parser)]
#[command(name = "aoe-insights")]
#[command(about = "Personal Age of Empires II match analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Profile id of the tracked player (overrides the config file)
    #[arg(long)]
    profile_id: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by the analytics commands. "*" or omitted means no constraint.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    #[arg(long)]
    civ: Option<String>,

    #[arg(long)]
    build_order: Option<String>,

    #[arg(long)]
    map: Option<String>,

    #[arg(long)]
    game_mode: Option<String>,
}

impl FilterArgs {
    fn to_selection(&self) -> FilterSelection {
        FilterSelection {
            civilization: Selection::from_param(self.civ.as_deref()),
            build_order: Selection::from_param(self.build_order.as_deref()),
            map: Selection::from_param(self.map.as_deref()),
            game_mode: Selection::from_param(self.game_mode.as_deref()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print win record, civilization performance and game lengths
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Only list civilizations in this tier (S, A, B, C or D)
        #[arg(long)]
        tier: Option<Tier>,
    },

    /// List the selectable values of a filter dimension
    Options {
        /// build_order, civilization, map or game_mode
        dimension: Dimension,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print a per-match series
    Series {
        /// effective_apm, feudal_uptime, castle_uptime or imperial_uptime
        metric: Metric,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the rating history
    Ratings,

    /// Rewrite legacy civilization labels in the stored matches
    CorrectCivs {
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(id) = &cli.profile_id {
        config.profile_id = Some(id.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting aoe-insights v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let profile_id = config.tracked_profile()?;
            let dataset = Dataset {
                matches: storage::load_matches(&storage, config.correct_civs_on_load)?,
                ratings: storage::load_ratings(&storage)?,
            };
            let state = AppState::new(
                storage,
                dataset,
                profile_id,
                config.duration_bucket_seconds,
            );

            let app = aoe_insights::api::build_router(state)
                .layer(aoe_insights::api::cors_layer(&config.server.cors_origin));
            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Summary { filter, tier } => {
            let profile_id = config.tracked_profile()?;
            let matches = storage::load_matches(&storage, config.correct_civs_on_load)?;
            print_summary(&matches, &filter.to_selection(), tier, &profile_id, &config);
        }
        Commands::Options { dimension, filter } => {
            let profile_id = config.tracked_profile()?;
            let matches = storage::load_matches(&storage, config.correct_civs_on_load)?;
            let filtered = filter_matches(&matches, &filter.to_selection(), &profile_id);

            println!("=== {} options ===", dimension);
            for option in derive_options(dimension, &filtered, &profile_id) {
                println!("  {}", option.label);
            }
        }
        Commands::Series { metric, filter } => {
            let profile_id = config.tracked_profile()?;
            let matches = storage::load_matches(&storage, config.correct_civs_on_load)?;
            let filtered = filter_matches(&matches, &filter.to_selection(), &profile_id);

            println!("=== {} ({}) ===", metric.title(), metric.label());
            for point in project(metric, &filtered, &profile_id) {
                let value = match (point.y, metric.age()) {
                    (None, _) => "-".to_string(),
                    (Some(y), Some(_)) => format!("{:.0}s (~{})", y, uptime_tick_label(y)),
                    (Some(y), None) => format!("{:.1}", y),
                };
                println!("  {:>10}  {}", us_date::format(&point.x), value);
            }
        }
        Commands::Ratings => {
            let points = project_ratings(&storage::load_ratings(&storage)?);

            println!("=== Rating History ===");
            if points.is_empty() {
                println!("  No ratings recorded.");
            }
            for point in points {
                let rating = point.y.map(rating_tick_label).unwrap_or_else(|| "-".to_string());
                println!("  {:>10}  {:>7}", us_date::format(&point.x), rating);
            }
        }
        Commands::CorrectCivs { dry_run } => {
            let mut matches = storage::load_matches(&storage, false)?;
            let changed = correct_civs_for_older_matches(&mut matches);

            println!("Matches:          {}", matches.len());
            println!("Labels corrected: {}", changed);
            if dry_run {
                println!("\n(dry run - no data written to disk)");
            } else if changed > 0 {
                storage::write_matches(&storage, &matches)?;
            }
        }
    }

    Ok(())
}

fn print_summary(
    matches: &[aoe_insights::models::Match],
    selection: &FilterSelection,
    tier: Option<Tier>,
    profile_id: &ProfileId,
    config: &AppConfig,
) {
    let view = DashboardView::build(matches, selection, profile_id);
    println!("{}", view.summary);

    let stats = player_stats(matches, profile_id, config.duration_bucket_seconds);

    let civs = match tier {
        Some(tier) => {
            println!("\n=== Civilization Performance (Tier {}) ===", tier);
            stats.in_tier(tier)
        }
        None => {
            println!("\n=== Civilization Performance ===");
            stats.sorted_by_win_rate()
        }
    };
    for civ in civs {
        println!(
            "  [{}] {:<14} {:>3}/{:<3} won  {:>5.1}%  played {:>5.1}%",
            civ.tier,
            civ.name,
            civ.wins,
            civ.games_played,
            civ.win_rate * 100.0,
            civ.play_rate * 100.0
        );
    }

    println!("\n=== Game Durations ===");
    let durations = &stats.durations;
    if durations.count == 0 {
        println!("  No game lengths recorded.");
        return;
    }
    if let (Some(mean), Some(median)) = (durations.mean_seconds, durations.median_seconds) {
        println!(
            "  {} games, mean {:.1} min, median {:.1} min",
            durations.count,
            mean / 60.0,
            median / 60.0
        );
    }
    for bucket in &durations.buckets {
        println!("  {:>12}  {}", bucket.label(), "#".repeat(bucket.games));
    }
}

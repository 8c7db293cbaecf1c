mod config;
mod fetch;
mod fleet;
mod propagate;
mod resolver;
mod weather;
mod web;

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::fetch::{FetchError, HttpTransport, ReqwestTransport, ResilientFetcher, TransportError};
use crate::fleet::query::{self, CategoryFilter};
use crate::fleet::{FleetLoader, CATEGORIES};
use crate::propagate::{parse_multi_tle, OrbitalElements};
use crate::resolver::{LiveTrackingClient, PositionResolver, StaticLocator};
use crate::weather::SpaceWeatherClient;

#[derive(Parser)]
#[command(name = "spaceshield")]
#[command(about = "Satellite fleet tracking and space weather")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the fleet and print it grouped by category
    Fleet {
        #[arg(long, default_value = "All")]
        category: String,
    },
    /// Resolve the current position of one satellite
    Track { object_id: String },
    /// Propagate every TLE in a file to the current time
    Propagate { file: PathBuf },
    /// Fetch the space-weather feeds
    Weather,
    /// Start the web API
    Serve,
}

#[derive(Debug, Error)]
enum SetupError {
    #[error("HTTP client: {0}")]
    Transport(#[from] TransportError),
    #[error("proxy: {0}")]
    Proxy(#[from] FetchError),
}

struct Services {
    transport: Arc<dyn HttpTransport>,
    fetcher: ResilientFetcher,
}

impl Services {
    fn new(config: &Config) -> Result<Self, SetupError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config.http)?);
        let fetcher = ResilientFetcher::new(transport.clone(), &config.proxy)?;
        Ok(Self { transport, fetcher })
    }

    fn loader(&self, config: &Config) -> FleetLoader {
        FleetLoader::new(self.fetcher.clone(), config.feeds.clone())
    }

    fn resolver(&self, config: &Config) -> PositionResolver {
        PositionResolver::new(
            LiveTrackingClient::new(self.fetcher.clone(), config.live_api.clone()),
            Arc::new(StaticLocator::new(config.station.observer())),
            config.resolver.geolocation_timeout,
        )
    }

    fn weather(&self, config: &Config) -> SpaceWeatherClient {
        SpaceWeatherClient::new(
            self.transport.clone(),
            config.weather.clone(),
            config.feeds.clone(),
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let services = match Services::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Setup error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Fleet { category } => fleet(&config, &services, &category).await,
        Commands::Track { object_id } => track(&config, &services, &object_id).await,
        Commands::Weather => weather(&config, &services).await,
        Commands::Serve => serve(&config, &services).await,
        Commands::Propagate { file } => propagate_file(&file),
    }
}

async fn fleet(config: &Config, services: &Services, category: &str) -> ExitCode {
    let filter: CategoryFilter = match category.parse() {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Unknown category: {}", category);
            return ExitCode::FAILURE;
        }
    };

    let fleet = services.loader(config).load(CATEGORIES).await;
    let stats = query::stats(&fleet.satellites, CATEGORIES);
    println!(
        "{} satellites online, {} with a computed position",
        stats.online, stats.with_position
    );

    for group in query::group_by_category(query::filter(&fleet.satellites, filter)) {
        println!("{} ({})", group.key, group.satellites.len());
        for sat in &group.satellites {
            match &sat.position {
                Some(p) => println!(
                    "  {:>8}  {:<32} {:>8.3} {:>9.3} {:>8.1} km",
                    sat.object_id, sat.name, p.latitude_deg, p.longitude_deg, p.altitude_km
                ),
                None => println!("  {:>8}  {:<32} (no position)", sat.object_id, sat.name),
            }
        }
    }
    ExitCode::SUCCESS
}

async fn track(config: &Config, services: &Services, object_id: &str) -> ExitCode {
    let fleet = services.loader(config).load(CATEGORIES).await;
    let satellite = match fleet.find(object_id) {
        Some(s) => s.clone(),
        None => {
            eprintln!("Satellite {} not found in the loaded fleet", object_id);
            return ExitCode::FAILURE;
        }
    };

    let name = satellite.name.clone();
    match services.resolver(config).select(satellite).await {
        Some(position) => {
            let altitude = position
                .altitude_km
                .map(|a| format!("{:.1} km", a))
                .unwrap_or_else(|| "unknown altitude".to_string());
            println!(
                "{} at {:.4}, {:.4}, {} ({})",
                name, position.latitude_deg, position.longitude_deg, altitude, position.source
            );
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Selection of {} was superseded", name);
            ExitCode::FAILURE
        }
    }
}

fn propagate_file(path: &Path) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sets = parse_multi_tle(&content);
    if sets.is_empty() {
        eprintln!("No TLE entries found in {}", path.display());
        return ExitCode::FAILURE;
    }

    let now = chrono::Utc::now();
    let mut failures = 0;
    for set in sets {
        let elements = match OrbitalElements::from_tle(set.name.clone(), &set.line1, &set.line2) {
            Ok(e) => e,
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", set.name.as_deref().unwrap_or("(unnamed)"), e);
                continue;
            }
        };

        let label = elements.object_name().unwrap_or("(unnamed)");
        match elements.fix_at(now) {
            Ok(fix) => println!(
                "{:>8}  {:<32} {:>8.3} {:>9.3} {:>8.1} km  (epoch {})",
                elements.norad_id(),
                label,
                fix.latitude_deg,
                fix.longitude_deg,
                fix.altitude_km,
                elements.epoch().format("%Y-%m-%d %H:%M")
            ),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", label, e);
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn weather(config: &Config, services: &Services) -> ExitCode {
    let report = services.weather(config).fetch().await;
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding report: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: &Config, services: &Services) -> ExitCode {
    let result = web::run_server(
        &config.web,
        services.loader(config),
        services.resolver(config),
        services.weather(config),
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! Climbing facility harvester.
//!
//! Queries the Overpass API mirrors for states, counties or climbing
//! facilities and writes facilities as GeoJSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cragscout::config::Config;
use cragscout::geojson::{normalize, summarize, write_geojson};
use cragscout::models::{AdminArea, AdminLevel, RawElement};
use cragscout::overpass::{query, HttpTransport, Mirror, ProgressCountdown, RetrievalLoop};
use cragscout::{DatasetClient, HarvestMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Harvest climbing facilities from the Overpass API")]
struct Args {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overpass mirror base URL, repeatable; replaces the configured list
    #[arg(long = "mirror", global = true)]
    mirrors: Vec<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List states of a country
    States {
        #[arg(long, default_value = query::DEFAULT_COUNTRY)]
        country: String,
    },

    /// List counties of a state
    Counties {
        #[arg(long, default_value = query::DEFAULT_STATE)]
        state: String,
    },

    /// Harvest climbing facilities and write them as GeoJSON
    Facilities {
        #[arg(long, default_value = query::DEFAULT_COUNTRY)]
        country: String,

        /// Single country-wide query instead of one query per state
        #[arg(long)]
        basic: bool,

        /// Output directory (overrides the config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output file name without extension
        #[arg(long)]
        name: Option<String>,

        /// Timestamp to record in the GeoJSON instead of now
        #[arg(long)]
        timestamp: Option<String>,

        /// Skip writing the GeoJSON file
        #[arg(long)]
        no_write: bool,

        /// Log feature counts and extent
        #[arg(long)]
        summary: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_or_default(args.config.as_deref())?;

    let mirrors = if args.mirrors.is_empty() {
        config.overpass.mirrors()?
    } else {
        Mirror::parse_all(&args.mirrors).context("Invalid --mirror")?
    };
    info!(
        "Using mirrors: {}",
        mirrors
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let transport = HttpTransport::new(&config.overpass.transport())
        .context("Failed to create HTTP client")?;
    let retrieval = RetrievalLoop::new(mirrors, Arc::new(transport), Arc::new(ProgressCountdown))?;
    let client = DatasetClient::new(retrieval);

    match args.command {
        Command::States { country } => {
            info!("Getting states...");
            let states = client.states(&country).await?;
            print_areas(&states, AdminLevel::Region);
        }
        Command::Counties { state } => {
            let counties = client.counties(&state).await?;
            print_areas(&counties, AdminLevel::County);
        }
        Command::Facilities {
            country,
            basic,
            out_dir,
            name,
            timestamp,
            no_write,
            summary,
        } => {
            let mode = if basic {
                HarvestMode::Basic
            } else {
                HarvestMode::Advanced
            };
            let data = client.climbing_facilities(&country, mode).await?;
            let collection = normalize(data, timestamp.as_deref())?;

            if summary {
                info!("Summary: {}", summarize(&collection));
            }

            if !no_write {
                let dir = out_dir.unwrap_or(config.output.dir);
                let path = write_geojson(&collection, Some(&dir), name.as_deref())
                    .context("Failed to write GeoJSON")?;
                info!("Saved {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_areas(elements: &[RawElement], level: AdminLevel) {
    for element in elements {
        let area = AdminArea::from_element(element, level);
        println!(
            "{}\t{}\t{}",
            area.osm_id,
            area.code.as_deref().unwrap_or("-"),
            area.default_name().map(String::as_str).unwrap_or("?")
        );
    }
    info!("{} {} areas", elements.len(), level.field_name());
}

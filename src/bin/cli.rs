//! autowaypoint CLI - augment a GPX track with nearby OSM points of interest.
//!
//! Usage:
//!   autowaypoint <track.gpx> <config.json> <output.gpx> [--use-cache]
//!
//! Queries the Overpass API once per configured tag/value rule (bounded by
//! the track's bounding box), keeps the features within each rule's distance
//! threshold that pass its name filter, and writes the track back out with
//! the survivors as snapped waypoints.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{info, warn};

use autowaypoint::{
    collect_features, filter_features, geo_utils, gpx_io, overpass, Config, OverpassClient,
    QueryCache, Result,
};

#[derive(Parser)]
#[command(name = "autowaypoint")]
#[command(about = "Add nearby OpenStreetMap points of interest to a GPX track", long_about = None)]
struct Cli {
    /// Input GPX track
    input: PathBuf,

    /// Rule configuration (JSON)
    config: PathBuf,

    /// Output GPX path
    output: PathBuf,

    /// Reuse cached query results instead of querying Overpass
    #[arg(long)]
    use_cache: bool,

    /// Cache file location
    #[arg(long, default_value = "cache.json")]
    cache_file: PathBuf,

    /// Overpass interpreter endpoint
    #[arg(long, default_value = overpass::DEFAULT_ENDPOINT)]
    endpoint: String,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let track = gpx_io::read_track(&cli.input)?;
    info!(
        "loaded {} track points from {}",
        track.points.len(),
        cli.input.display()
    );

    let config = Config::from_file(&cli.config)?;
    let bounds = geo_utils::compute_bounds(&track.points)?;
    info!(
        "track bounds: lat {:.5}..{:.5}, lon {:.5}..{:.5}",
        bounds.min_lat, bounds.max_lat, bounds.min_lng, bounds.max_lng
    );

    let cache = QueryCache::new(&cli.cache_file);

    let query_start = Instant::now();
    let features = if cli.use_cache {
        info!("using cached query results");
        cache.load(&cli.input, &config)?
    } else {
        let client = OverpassClient::new(&cli.endpoint);
        let features = collect_features(&client, &config, &bounds)?;
        // A failed cache write costs a re-query later, nothing more.
        if let Err(e) = cache.store(&cli.input, &config, &features) {
            warn!("failed to write cache {}: {e}", cli.cache_file.display());
        }
        features
    };
    info!(
        "query stage: {} raw features in {:.0?}",
        features.len(),
        query_start.elapsed()
    );

    let filter_start = Instant::now();
    let report = filter_features(features, &track.points, &config)?;
    info!("filter stage: {:.0?}", filter_start.elapsed());

    let build_start = Instant::now();
    gpx_io::write_augmented_gpx(&cli.output, &track, &report.accepted)?;
    info!("build stage: {:.0?}", build_start.elapsed());

    println!("Done. Added {} waypoints.", report.accepted.len());
    for (rule, counts) in config.points.iter().zip(&report.counts) {
        println!(
            "  {}={}: {} / {}",
            rule.tag, rule.value, counts.accepted, counts.matched
        );
    }

    Ok(())
}

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use profile_compare::coordinates::{CoordinateSequence, DEFAULT_ROUTE};
use profile_compare::osrm::{OsrmClient, OsrmConfig};
use profile_compare::sink::{FileSink, GeojsonIoSink};
use profile_compare::style::ComparisonStyle;
use profile_compare::traits::VisualizationSink;
use profile_compare::{Comparison, DetailLevel, FetchStrategy, ProfileEndpoint, SolveMode};

/// Compares the routes two routing engines with different vehicle profiles
/// find for the same coordinates. Both engines must already be running.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Coordinates alternating between longitude and latitude (even count).
    /// Defaults to a sample tour through Stuttgart.
    #[arg(allow_negative_numbers = true, num_args = 0..)]
    coordinates: Vec<f64>,

    /// Host name or IP of both routing engines
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port of the engine serving the primary (car) profile
    #[arg(long, default_value_t = 5000)]
    port_primary: u16,

    /// Port of the engine serving the alternative (electric car) profile
    #[arg(long, default_value_t = 6000)]
    port_alternative: u16,

    #[arg(long, default_value = "car")]
    label_primary: String,

    #[arg(long, default_value = "electric car")]
    label_alternative: String,

    /// Request a simplified path geometry instead of the full one
    #[arg(long)]
    simplified: bool,

    /// Solve the traveling salesman problem instead of following the given order
    #[arg(long)]
    trip: bool,

    /// Query both engines at the same time
    #[arg(long)]
    parallel: bool,

    /// Request timeout in seconds (transport default when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Also write the feature collection to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Do not open the result on geojson.io
    #[arg(long)]
    no_browser: bool,

    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

impl Cli {
    fn coordinates(&self) -> Result<CoordinateSequence, profile_compare::Error> {
        if self.coordinates.is_empty() {
            CoordinateSequence::from_flat(&DEFAULT_ROUTE)
        } else {
            CoordinateSequence::from_flat(&self.coordinates)
        }
    }

    fn endpoints(&self) -> (ProfileEndpoint, ProfileEndpoint) {
        (
            ProfileEndpoint::new(self.host.clone(), self.port_primary, self.label_primary.clone()),
            ProfileEndpoint::new(
                self.host.clone(),
                self.port_alternative,
                self.label_alternative.clone(),
            ),
        )
    }

    fn mode(&self) -> SolveMode {
        SolveMode::from_trip_flag(self.trip)
    }

    fn detail(&self) -> DetailLevel {
        DetailLevel::from_simplified_flag(self.simplified)
    }

    fn strategy(&self) -> FetchStrategy {
        if self.parallel {
            FetchStrategy::Parallel
        } else {
            FetchStrategy::Sequential
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let coordinates = cli.coordinates()?;
    let (primary, alternative) = cli.endpoints();
    let (mode, detail) = (cli.mode(), cli.detail());
    info!(
        points = coordinates.len(),
        ?mode,
        ?detail,
        "comparing {primary} with {alternative}"
    );

    let client = OsrmClient::new(OsrmConfig {
        timeout_secs: cli.timeout_secs,
    })
    .context("failed to build HTTP client")?;
    let comparison =
        Comparison::new(client, ComparisonStyle::default()).with_strategy(cli.strategy());

    let outcome = comparison.compare(&primary, &alternative, &coordinates, mode, detail)?;
    println!("{}", outcome.summary());

    let collection = comparison.feature_collection(&outcome);
    if let Some(path) = &cli.output {
        FileSink::new(path).display(&collection)?;
    }
    if !cli.no_browser {
        GeojsonIoSink::default().display(&collection)?;
    }
    Ok(())
}

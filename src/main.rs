use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use roadpoint::codec::decimal_to_dms;
use roadpoint::config::Config;
use roadpoint::models::{Coordinates, DistanceMeters, RoadPoint};
use roadpoint::services::{
    IpInfoClient, LocationResolver, OverpassClient, RoadPointGenerator, RoadSnapper,
};
use roadpoint::{AppError, Result};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const START_PROMPT: &str =
    "📍 Enter start coordinates (decimal or DMS), or leave empty to use IP location: ";
const DISTANCE_PROMPT: &str = "📏 Enter distance in meters: ";

/// Pick a random point at a given distance and snap it to the nearest road
#[derive(Parser, Debug)]
#[command(name = "roadpoint", version)]
struct Cli {
    /// Start coordinates, decimal ("48.8566,2.3522") or DMS ("48°51'23.76\"N 2°21'7.92\"E").
    /// Prompted for when omitted; an empty answer uses IP geolocation
    #[arg(long, allow_hyphen_values = true)]
    start: Option<String>,

    /// Distance from the start point in meters. Prompted for when omitted
    #[arg(long)]
    distance: Option<DistanceMeters>,

    /// Seed for the random bearing, for reproducible results
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadpoint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(kind = e.kind(), "{}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().map_err(AppError::Config)?;
    tracing::debug!("Configuration loaded: {:?}", config);

    let timeout = Duration::from_secs(config.overpass.timeout_secs);
    let locator = IpInfoClient::with_base_url(config.ip_geolocation_url.clone())
        .with_timeout(timeout);
    let resolver = LocationResolver::new(Arc::new(locator));

    let search_radius =
        DistanceMeters::new(config.snap_search_radius_m).map_err(AppError::Config)?;
    let snapper = RoadSnapper::new(
        Arc::new(OverpassClient::with_config(config.overpass.clone())),
        search_radius,
    );
    let generator = RoadPointGenerator::new(snapper);

    let start_input = match cli.start {
        Some(start) => start,
        None => prompt(START_PROMPT)?,
    };
    let start = resolver.resolve(Some(start_input.as_str())).await?.coordinates;

    if !cli.json {
        print!("{}", format_location("✅ Start location", &start));
    }

    let distance = match cli.distance {
        Some(distance) => distance,
        None => prompt(DISTANCE_PROMPT)?
            .parse()
            .map_err(AppError::InvalidRequest)?,
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let road_point = generator.generate(start, distance, &mut rng).await?;

    if cli.json {
        println!("{:#}", road_point_json(&road_point));
    } else {
        print!(
            "{}",
            format_location("🎯 Random road point", &road_point.coordinates())
        );
    }

    Ok(())
}

/// Ask on stderr so stdout only carries results
fn prompt(message: &str) -> Result<String> {
    read_answer(&mut io::stdin().lock(), &mut io::stderr(), message)
}

fn read_answer<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> Result<String> {
    write!(writer, "{}", message)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        )));
    }
    Ok(line.trim().to_string())
}

/// Decimal and DMS lines for a labelled coordinate
fn format_location(label: &str, coords: &Coordinates) -> String {
    let (lat_dms, lng_dms) = decimal_to_dms(coords.lat, coords.lng);
    format!(
        "{label} (Decimal): {} {}\n{label} (DMS): {} {}\n",
        coords.lat, coords.lng, lat_dms, lng_dms
    )
}

fn road_point_json(road_point: &RoadPoint) -> serde_json::Value {
    let point = road_point.coordinates();
    let (lat_dms, lng_dms) = decimal_to_dms(point.lat, point.lng);
    let (start_lat_dms, start_lng_dms) =
        decimal_to_dms(road_point.start.lat, road_point.start.lng);

    json!({
        "start": {
            "lat": road_point.start.lat,
            "lng": road_point.start.lng,
            "dms": [start_lat_dms.to_string(), start_lng_dms.to_string()],
        },
        "road_point": {
            "lat": point.lat,
            "lng": point.lng,
            "dms": [lat_dms.to_string(), lng_dms.to_string()],
            "node_id": road_point.snapped.node.id,
        },
        "projected": road_point.projected,
        "bearing_deg": road_point.bearing_deg,
        "requested_distance_m": road_point.requested_distance_m,
        "snap_offset_m": road_point.snapped.offset_m,
        "distance_from_start_m": road_point.distance_from_start_m,
    })
}

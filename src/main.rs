use anyhow::Context;
use clap::{Parser, Subcommand};
use image::ImageReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use obstaclemap::config::{DEFAULT_CONFIG_FILE, Settings};
use obstaclemap::core::db::{DetectionRepository, StoreClient};
use obstaclemap::map::{self, EMPTY_MAP_MESSAGE, MapView};
use obstaclemap::{RecordTable, analyze, geolocation, save_detection};

#[derive(Parser)]
#[command(name = "obstaclemap")]
#[command(about = "Crowdsourced outdoor obstacle detection and mapping")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect obstacles in an image and optionally save the result
    Detect {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Location as 'latitude,longitude'
        #[arg(short, long)]
        location: Option<String>,

        /// Save the detection to the store
        #[arg(long)]
        save: bool,

        /// Write the image with detected boxes drawn on it
        #[arg(long, value_name = "PATH")]
        annotated_out: Option<PathBuf>,
    },
    /// Show every saved detection as a table
    Records,
    /// List map markers and optionally export an HTML map
    Map {
        /// Write a Leaflet map page to this path
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },
    /// Open the desktop interface
    #[cfg(feature = "gui")]
    Gui,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "obstaclemap=debug" } else { "obstaclemap=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let settings = match &args.config {
        Some(path) => Settings::load(path, true)?,
        None => Settings::load(DEFAULT_CONFIG_FILE, false)?,
    };

    match args.command {
        #[cfg(feature = "gui")]
        Command::Gui => obstaclemap::gui::run(settings),
        command => tokio::runtime::Runtime::new()?.block_on(run(command, settings)),
    }
}

async fn run(command: Command, settings: Settings) -> anyhow::Result<()> {
    let store = settings.store.connect().await?;
    let result = match command {
        Command::Detect {
            image_path,
            location,
            save,
            annotated_out,
        } => detect(&store, &settings, image_path, location, save, annotated_out).await,
        Command::Records => records(&store).await,
        Command::Map { html } => show_map(&store, html).await,
        #[cfg(feature = "gui")]
        Command::Gui => unreachable!("gui runs outside the tokio runtime"),
    };
    store.close().await?;
    result
}

async fn detect(
    store: &StoreClient,
    settings: &Settings,
    image_path: PathBuf,
    location: Option<String>,
    save: bool,
    annotated_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    let filename = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.display().to_string());

    let detector = settings.detector.build()?;
    let analysis = analyze(&detector, filename, &img)?;

    println!("Detected obstacles in your photo:");
    for label in &analysis.labels {
        println!("- {}", label);
    }
    if analysis.labels.is_empty() {
        println!("(none)");
    }

    if let Some(out) = annotated_out {
        analysis
            .annotated(&img)
            .save(&out)
            .with_context(|| format!("Failed to write annotated image {:?}", out))?;
        println!("Annotated image written to {}", out.display());
    }

    if save {
        let location = location.unwrap_or_else(|| {
            geolocation::prefill(settings.location.geolocator().as_ref())
        });
        let record = analysis.into_record(location);
        let outcome = save_detection(store, &record).await?;
        if outcome.is_saved() {
            println!("{}", outcome.message());
        } else {
            eprintln!("Warning: {}", outcome.message());
        }
    }

    Ok(())
}

async fn records(store: &StoreClient) -> anyhow::Result<()> {
    let docs = store.stream_detections().await?;
    println!("{}", RecordTable::from_documents(&docs).to_text());
    Ok(())
}

async fn show_map(store: &StoreClient, html: Option<PathBuf>) -> anyhow::Result<()> {
    let projection = map::load_projection(store).await?;
    let Some(view) = MapView::from_projection(projection) else {
        println!("{}", EMPTY_MAP_MESSAGE);
        return Ok(());
    };

    println!(
        "Map centered on ({}, {}) at zoom {}, {} marker(s):",
        view.center.latitude,
        view.center.longitude,
        view.zoom,
        view.markers.len()
    );
    for marker in &view.markers {
        println!(
            "  ({}, {})  {}",
            marker.coordinates.latitude,
            marker.coordinates.longitude,
            marker.popup_text().replace('\n', " | ")
        );
    }

    if let Some(path) = html {
        std::fs::write(&path, view.to_html())
            .with_context(|| format!("Failed to write map page {:?}", path))?;
        println!("Map written to {}", path.display());
    }
    Ok(())
}

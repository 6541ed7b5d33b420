use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use glance_core::Config;
use glance_photos::{DirectoryLibrary, DirectoryPermissions, GridLayout, PageCursor, PhotoGrid};
use glance_weather::{OpenMeteoProvider, WeatherModel, WeatherScreen, WeatherView};

mod error_mapping;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Parser)]
#[command(name = "glance", version, about = "Photo grid and weather lookup screens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current weather for a city (the configured default when omitted)
    Weather {
        city: Option<String>,
    },
    /// Page through a photo directory
    Photos {
        /// Library directory (defaults to photos.library_dir)
        dir: Option<PathBuf>,
        /// Stop after this many pages
        #[arg(long, default_value_t = 3)]
        pages: usize,
        /// Grid width in logical pixels
        #[arg(long, default_value_t = 390.0)]
        width: f64,
        /// Tap the tile at this index once loaded
        #[arg(long)]
        select: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    glance_core::init()?;

    let mut app = match glance_core::App::new() {
        Ok(app) => app,
        Err(e) => {
            let err = error_mapping::startup_error(e);
            eprintln!("{}", err.user_message());
            return Err(err.into());
        }
    };
    tracing::info!("Glance started");

    match cli.command {
        Command::Weather { city } => run_weather(app.config(), city).await?,
        Command::Photos {
            dir,
            pages,
            width,
            select,
        } => run_photos(app.config(), dir, pages, width, select).await?,
    }

    app.shutdown()?;
    Ok(())
}

async fn run_weather(config: &Config, city: Option<String>) -> Result<()> {
    let provider = OpenMeteoProvider::with_base_urls(
        &config.weather.geocoding_url,
        &config.weather.forecast_url,
        Duration::from_secs(config.weather.timeout_secs),
    )
    .map_err(error_mapping::weather_error)?;

    let screen = WeatherScreen::new(city.unwrap_or_else(|| config.weather.default_city.clone()));
    let mut model = WeatherModel::new(
        screen,
        Arc::new(provider),
        tokio::runtime::Handle::current(),
    );

    if !model.activate() {
        println!("No city to look up.");
        return Ok(());
    }

    println!("Loading...");
    while !model.poll_channel() {
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    match model.view() {
        WeatherView::Report {
            location,
            weather,
            temperature,
        } => {
            println!("{}", location);
            println!("{}", weather);
            println!("{}", temperature);
        }
        WeatherView::Failed { message } => println!("{}", message),
        WeatherView::Idle | WeatherView::Loading => {}
    }
    println!("Background: {}", model.screen().background());

    Ok(())
}

async fn run_photos(
    config: &Config,
    dir: Option<PathBuf>,
    pages: usize,
    width: f64,
    select: Option<usize>,
) -> Result<()> {
    let dir = dir.unwrap_or_else(|| PathBuf::from(&config.photos.library_dir));
    tracing::info!("Browsing photos in {}", dir.display());

    let mut grid = PhotoGrid::new(
        Arc::new(DirectoryLibrary::new(&dir)),
        Arc::new(DirectoryPermissions::new(&dir)),
        tokio::runtime::Handle::current(),
        config.photos.page_size,
        GridLayout::new(config.photos.columns, config.photos.item_margin),
    )
    .with_on_press(|uri| println!("Selected {}", uri));

    let mut loaded = 0;
    let mut pending = grid.activate();
    while pending {
        while !grid.poll_channel() {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        loaded += 1;

        if let Some(e) = grid.loader().last_error() {
            let err = error_mapping::photo_error(e.clone());
            tracing::debug!("{}", err);
            println!("{}", err.user_message());
            break;
        }
        pending = loaded < pages && grid.on_end_reached();
    }

    if *grid.loader().cursor() == PageCursor::NotStarted && grid.loader().last_error().is_none() {
        println!("{}", glance_core::PhotoError::PermissionDenied.user_message());
        return Ok(());
    }

    for tile in grid.tiles(width) {
        println!(
            "{:>7.1} x {:<7.1} +{:.1},{:.1}  {}",
            tile.size, tile.size, tile.margin_left, tile.margin_top, tile.uri
        );
    }
    println!(
        "{} photos{}",
        grid.photos().len(),
        if grid.loader().cursor().is_exhausted() {
            ""
        } else {
            " (more available)"
        }
    );

    if let Some(index) = select {
        if !grid.press(index) {
            println!("No photo at index {}", index);
        }
    }

    Ok(())
}

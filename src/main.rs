mod app;
mod color;
mod data;
mod error;
mod headless;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::SkiExplorerApp;
use clap::{Parser, Subcommand};
use eframe::egui;
use headless::Format;
use state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "ski-explorer",
    version,
    about = "Explore ski resorts by price, amenities and per-country rankings"
)]
struct Cli {
    /// Resort dataset (.csv, .json, .parquet or .xlsx)
    #[arg(long, env = "SKI_EXPLORER_DATA")]
    data: Option<PathBuf>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,

    /// Run one query in the terminal instead of opening the window
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Top 10 resorts of a country by a metric column
    Top {
        country: String,

        #[arg(long, default_value = "Price")]
        metric: String,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Resorts below a price with all of the given amenities
    Find {
        #[arg(long, default_value_t = 150.0)]
        max_price: f64,

        /// Amenity column: Snowparks, Nightskiing or "Summer skiing"
        #[arg(long = "amenity")]
        amenities: Vec<String>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Countries with at least one resort on a continent
    Countries { continent: String },
    /// Per-country ranks of one resort
    Card { resort: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Some(command) => {
            let path = cli
                .data
                .context("--data (or SKI_EXPLORER_DATA) is required for terminal queries")?;
            let table = data::loader::load_table(&path)?;

            let output = match command {
                Command::Top {
                    country,
                    metric,
                    format,
                } => headless::top(&table, &country, &metric, format)?,
                Command::Find {
                    max_price,
                    amenities,
                    format,
                } => headless::find(&table, max_price, &amenities, format)?,
                Command::Countries { continent } => headless::countries(&table, &continent),
                Command::Card { resort } => headless::card(&table, &resort)?,
            };
            println!("{output}");
            Ok(())
        }
        None => run_gui(cli.data),
    }
}

fn run_gui(data: Option<PathBuf>) -> Result<()> {
    let mut state = AppState::default();
    // A dataset given on the command line must load; File → Open failures
    // only go to the status bar.
    if let Some(path) = &data {
        state.set_table(data::loader::load_table(path)?);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ski Resort Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(SkiExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}

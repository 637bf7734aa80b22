use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{
    Collaborators, Config, Coordinates, FileStore, Phase, SearchOrchestrator, TemperatureUnit,
    provider::fixed::FixedLocation,
};
use inquire::{CustomType, Text};
use std::path::PathBuf;

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Place search with a multi-day forecast chart")]
pub struct Cli {
    /// Display unit for this run ("c" or "f"); also saved as the new preference.
    #[arg(long, global = true)]
    pub unit: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a place and show its forecast.
    Search {
        /// Place name. Defaults to the most recent search.
        query: Option<String>,

        /// Write the chart to this SVG file.
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Show the forecast for the current location.
    Here {
        /// Latitude override (decimal).
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude override (decimal).
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Write the chart to this SVG file.
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Set the display unit ("c" or "f").
    Unit { unit: String },

    /// List recent searches.
    Recent {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Set the startup search and home location interactively.
    Configure,
}

impl Cli {
    pub async fn run(self, mut config: Config) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Search { query: None, svg: None });

        let store_path = Config::store_file_path()?;
        let store = FileStore::open(&store_path)?;

        let mut collaborators = Collaborators::from_config(&config);
        if let Command::Here { lat: Some(lat), lon: Some(lon), .. } = &command {
            collaborators = collaborators
                .with_locator(Box::new(FixedLocation::new(Some(Coordinates::new(*lat, *lon)))));
        }

        let orchestrator = SearchOrchestrator::new(
            collaborators,
            Box::new(store),
            Box::new(|message: &str| eprintln!("! {message}")),
            config.chart,
        )
        .with_locale(config.label_locale());

        if let Some(unit) = self.unit.as_deref() {
            orchestrator.toggle_unit(TemperatureUnit::try_from(unit)?);
        }

        match command {
            Command::Search { query, svg } => {
                let query = query.unwrap_or_else(|| orchestrator.initial_query(&config.default_query));
                orchestrator.submit_query(&query).await;
                finish(&orchestrator, &config, svg)
            }
            Command::Here { svg, .. } => {
                orchestrator.use_current_location().await;
                finish(&orchestrator, &config, svg)
            }
            Command::Unit { unit } => {
                let unit = TemperatureUnit::try_from(unit.as_str())?;
                orchestrator.toggle_unit(unit);
                println!("Temperatures will be shown in {unit}");
                Ok(())
            }
            Command::Recent { clear } => {
                if clear {
                    orchestrator.clear_recent();
                    println!("Recent searches cleared");
                } else {
                    report::print_recent(&orchestrator.recent());
                }
                Ok(())
            }
            Command::Configure => configure(&mut config),
        }
    }
}

fn finish(orchestrator: &SearchOrchestrator, config: &Config, svg: Option<PathBuf>) -> anyhow::Result<()> {
    let display = orchestrator.display();
    report::print_display(&display, orchestrator.locale());

    if let Some(path) = svg {
        if display.chart.is_empty() {
            eprintln!("No chart to write");
        } else {
            let document = report::chart_svg(&display.chart, config.chart);
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write chart: {}", path.display()))?;
            println!("Chart written to {}", path.display());
        }
    }

    if orchestrator.phase() == Phase::Failed {
        bail!("Forecast lookup did not complete");
    }
    Ok(())
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let query = Text::new("Search on startup:")
        .with_default(&config.default_query)
        .prompt()?;
    config.default_query = query;

    let lat = CustomType::<f64>::new("Home latitude (blank to skip):")
        .with_error_message("Enter a decimal number, e.g. 48.85")
        .prompt_skippable()?;
    let lon = CustomType::<f64>::new("Home longitude (blank to skip):")
        .with_error_message("Enter a decimal number, e.g. 2.35")
        .prompt_skippable()?;

    if let (Some(lat), Some(lon)) = (lat, lon) {
        config.set_home(lat, lon);
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use skycheck_core::{Config, Geolocator, WeatherClient, WeatherCoordinator};

use crate::geolocate::EnvGeolocator;
use crate::history::SearchHistory;
use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycheck", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the upstream API key in the config file.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "Jakarta".
        city: String,
    },

    /// Look up weather for the device's position (SKYCHECK_LAT/SKYCHECK_LON).
    Here,

    /// Prompt for cities in a loop, keeping a short search history.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Here => here().await,
            Command::Interactive => interactive().await,
        }
    }
}

fn coordinator() -> Result<WeatherCoordinator> {
    let config = Config::load()?;
    let settings = config.client_settings()?;
    Ok(WeatherCoordinator::new(WeatherClient::new(settings)))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key from prompt")?;

    if api_key.trim().is_empty() {
        bail!("API key cannot be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> Result<()> {
    let city = city.trim();
    // The coordinator treats input validation as the caller's job.
    if city.is_empty() {
        bail!("City name cannot be empty");
    }

    let coordinator = coordinator()?;
    tracing::debug!(city, "dispatching name lookup");
    coordinator.fetch_weather(city).await;
    report(&coordinator)
}

async fn here() -> Result<()> {
    // Geolocation failures surface immediately as user-facing messages;
    // they never pass through the request state.
    let coords = match EnvGeolocator.current_coordinates().await {
        Ok(coords) => coords,
        Err(err) => bail!("{err}"),
    };

    let coordinator = coordinator()?;
    tracing::debug!(lat = coords.lat, lon = coords.lon, "dispatching coordinate lookup");
    coordinator.fetch_weather_by_coords(coords.lat, coords.lon).await;
    report(&coordinator)
}

async fn interactive() -> Result<()> {
    let coordinator = coordinator()?;
    let mut history = SearchHistory::default();

    loop {
        let recent = history.recent().join(", ");
        let mut prompt = Text::new("City (empty to quit):");
        if !history.is_empty() {
            prompt = prompt.with_help_message(&recent);
        }

        let input = prompt
            .prompt_skippable()
            .context("Failed to read city from prompt")?;

        let Some(city) = input else { break };
        let city = city.trim().to_string();
        if city.is_empty() {
            break;
        }

        coordinator.fetch_weather(&city).await;

        let state = coordinator.state();
        match state.error {
            Some(message) => println!("{message}"),
            None => {
                history.record(&city);
                if let (Some(weather), Some(forecast)) = (&state.weather, &state.forecast) {
                    output::print_report(weather, forecast);
                }
            }
        }
        println!();
    }

    Ok(())
}

/// Print the settled state, or fail with the coordinator's fixed message.
fn report(coordinator: &WeatherCoordinator) -> Result<()> {
    let state = coordinator.state();

    if let Some(message) = state.error {
        bail!("{message}");
    }

    let (Some(weather), Some(forecast)) = (&state.weather, &state.forecast) else {
        // Unreachable after a settled fetch, but don't panic over it.
        bail!("No weather data available");
    };

    output::print_report(weather, forecast);
    Ok(())
}

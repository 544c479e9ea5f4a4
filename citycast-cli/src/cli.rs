use anyhow::Context;
use citycast_core::{Config, WeatherLookup};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};

use crate::{logging, tui};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Chat with the weather from your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive chat (the default).
    Chat,

    /// Print the current weather for a city and exit.
    Show {
        /// City name, e.g. "Raipur" or "Paris,FR".
        city: String,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Chat) {
            Command::Chat => {
                logging::init_to_file()?;
                let config = Config::load()?;
                let lookup = WeatherLookup::from_config(&config)?;

                let last_input = tui::run(&lookup).await?;
                println!("{last_input}");
            }
            Command::Show { city } => {
                logging::init_to_stderr();
                let config = Config::load()?;
                let lookup = WeatherLookup::from_config(&config)?;

                println!("{}", lookup.report(&city).await);
            }
            Command::Configure => {
                logging::init_to_stderr();
                configure()?;
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    // Read the file alone so an env override never gets written back.
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    log::info!("saved API key to {}", path.display());
    println!("Saved configuration to {}", path.display());

    Ok(())
}

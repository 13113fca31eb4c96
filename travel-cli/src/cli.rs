use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use travel_core::{Config, SearchOrchestrator, SearchOutcome};

use crate::terminal::TerminalSink;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "travel", version, about = "Weather and sights for any city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a city: current weather, nearby attractions and a map link.
    Search {
        /// City name; several words are joined with spaces.
        #[arg(required = true)]
        city: Vec<String>,

        /// How many attractions to show (overrides the config file).
        #[arg(long)]
        max: Option<usize>,

        /// Proximity search radius in metres (overrides the config file).
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Interactively edit the config file.
    Configure,

    /// Print the config file location and the effective settings.
    Config,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Search { city, max, radius } => {
                let config = Config::load()?.with_overrides(max, radius)?;
                search(&config, &city.join(" ")).await
            }
            Command::Configure => configure(),
            Command::Config => show_config(),
        }
    }
}

async fn search(config: &Config, query: &str) -> anyhow::Result<()> {
    let orchestrator = SearchOrchestrator::from_config(config)?;
    let sink = TerminalSink::stdout();

    match orchestrator.run_search(query, &sink).await {
        SearchOutcome::Applied(status) if status.is_error() => bail!("search failed"),
        _ => Ok(()),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.attractions.max_results = CustomType::<usize>::new("How many attractions to show?")
        .with_default(config.attractions.max_results)
        .with_validator(|n: &usize| {
            Ok(if *n >= 1 {
                inquire::validator::Validation::Valid
            } else {
                inquire::validator::Validation::Invalid("Must be at least 1".into())
            })
        })
        .prompt()
        .context("Failed to read attraction count")?;

    config.attractions.search_radius_m = CustomType::<u32>::new("Search radius in metres?")
        .with_default(config.attractions.search_radius_m)
        .with_help_message("Wikipedia caps proximity searches at 10000 m")
        .prompt()
        .context("Failed to read search radius")?;

    config.http.user_agent = Text::new("User agent sent to public APIs:")
        .with_default(&config.http.user_agent)
        .with_help_message("Nominatim asks for an app name with a contact address")
        .prompt()
        .context("Failed to read user agent")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn show_config() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let config = Config::load()?;

    println!("# {}", path.display());
    if !path.exists() {
        println!("# (file not found, showing defaults)");
    }
    print!("{}", config.to_toml()?);

    Ok(())
}

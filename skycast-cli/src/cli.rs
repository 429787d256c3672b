use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;

use skycast_core::{Config, OpenMeteoClient, build_report, normalize_query};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather and air quality for a city.
    Show {
        /// City name, e.g. "Oslo" or "Buenos Aires".
        city: Vec<String>,
    },

    /// Interactive mode: search repeatedly until interrupted.
    Prompt,

    /// Configure the request timeout.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city } => show(&city.join(" ")).await,
            Command::Prompt => prompt_loop().await,
            Command::Configure => configure(),
        }
    }
}

/// One-shot lookup. Validation happens before the client is built, so
/// an empty argument never issues a request.
async fn show(raw_city: &str) -> anyhow::Result<()> {
    let city = normalize_query(raw_city)?;

    let config = Config::load()?;
    let client = OpenMeteoClient::new(config)?;

    let report = search(&client, city).await?;
    println!("{}", render::render_report(&report));

    Ok(())
}

/// Interactive loop: any failure prints one message and returns to the
/// prompt; an empty submission re-prompts without a network call.
async fn prompt_loop() -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = OpenMeteoClient::new(config)?;

    loop {
        let input = match Text::new("City:").prompt() {
            Ok(input) => input,
            // Esc or Ctrl-C ends the session.
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let city = match normalize_query(&input) {
            Ok(city) => city.to_owned(),
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match search(&client, &city).await {
            Ok(report) => println!("{}", render::render_report(&report)),
            Err(e) => eprintln!("{e}"),
        }
    }
}

async fn search(
    client: &OpenMeteoClient,
    city: &str,
) -> Result<skycast_core::WeatherReport, skycast_core::Error> {
    let coords = client.resolve(city).await?;
    let snapshot = client.fetch_weather(&coords).await?;
    Ok(build_report(&coords.display_name, &snapshot))
}

/// Interactive timeout configuration, persisted to the config file.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let answer = Text::new("Request timeout in seconds:")
        .with_initial_value(&config.timeout_secs.to_string())
        .prompt()?;

    let timeout: u64 = answer
        .trim()
        .parse()
        .with_context(|| format!("'{answer}' is not a valid number of seconds"))?;

    config.timeout_secs = timeout;
    config.save()?;

    println!(
        "Saved. Config file: {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

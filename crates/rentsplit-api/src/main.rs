use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rentsplit_api::{
    config::{CONFIG_PATH_ENV, RentSplitConfig},
    create_app_with_config, service,
    tracing_setup::init_tracing,
};
use rentsplit_types::BillScenario;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "rentsplit", version, about = "Shared-rent bill splitting calculator")]
struct Cli {
    /// Configuration file (defaults to $RENTSPLIT_CONFIG_PATH, then rentsplit.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP service (default)
    Serve,
    /// Split the bill described by a JSON or TOML scenario file
    Split {
        file: PathBuf,
        /// Include the per-room breakdown
        #[arg(long)]
        detailed: bool,
    },
    /// Print the demo scenario as JSON
    Demo,
    /// Explain how the bill is split
    Explain,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RentSplitConfig::load_from(path)?.apply_env_overrides(),
        None => RentSplitConfig::load()?,
    };
    init_tracing(&config.logging)?;

    match &config.loaded_from {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => warn!(
            env = CONFIG_PATH_ENV,
            "Configuration file not found, using default configuration"
        ),
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => start_server(config).await,
        Command::Split { file, detailed } => split_command(&config, &file, detailed),
        Command::Demo => {
            println!("{}", serde_json::to_string_pretty(&BillScenario::demo())?);
            Ok(())
        }
        Command::Explain => {
            explain_command();
            Ok(())
        }
    }
}

fn split_command(config: &RentSplitConfig, file: &Path, detailed: bool) -> anyhow::Result<()> {
    let scenario = service::read_scenario_file(file)?;
    let response = service::validate_and_split(scenario, &config.limits, detailed)
        .with_context(|| format!("Scenario '{}' was rejected", file.display()))?;

    if response.results.is_empty() {
        warn!("Nothing to split: the amount, the total area or the total presence is zero");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn explain_command() {
    println!("rentsplit - how the bill is split");
    println!();
    println!("1. The amount is cut into two pools:");
    println!("     area pool        = amount x area weight");
    println!("     person-days pool = amount x person-days weight");
    println!();
    println!("2. Every room takes its share of both pools:");
    println!("     area cost        = area pool x room area / total area");
    println!("     person-day cost  = person-days pool x room person-days / total person-days");
    println!("     room cost        = area cost + person-day cost");
    println!();
    println!("3. The room cost is shared among the room's occupants:");
    println!("     by days present, when anyone in the room was present;");
    println!("     equally, when every occupant recorded zero days;");
    println!("     not at all, when the room has no occupants.");
    println!();
    println!("Nothing is produced while the amount is not positive, the total area is");
    println!("zero or nobody was present. Weights are used as given: if they do not add");
    println!("up to 1, neither do the shares.");
}

async fn start_server(config: RentSplitConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    info!(%addr, "Configuring web server");

    let app = create_app_with_config(config)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "rentsplit server started");
    axum::serve(listener, app).await?;

    Ok(())
}

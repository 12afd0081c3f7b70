use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A terminal portfolio with particles, reveals and smooth scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of ~/.config/folio/config.toml
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the portfolio (default)
    Run {
        /// Portfolio TOML file, overrides `general.content_path`
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Write a default config and an editable sample portfolio
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Run the particle simulator headless and report statistics
    Simulate {
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Frames to simulate
        #[arg(long, default_value_t = 1000)]
        ticks: u64,
        /// Fixed pointer position, e.g. `400,300`
        #[arg(long)]
        pointer: Option<String>,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available themes
    Themes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // The TUI owns the terminal, so its logs go to a file
    let is_tui = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, is_tui)?;

    match cli.command {
        Some(Commands::Run { content }) => commands::run::run(config, content).await,
        None => commands::run::run(config, None).await,
        Some(Commands::Init { force }) => commands::init::run(&config, &config_path, force),
        Some(Commands::Simulate {
            width,
            height,
            ticks,
            pointer,
            seed,
            json,
        }) => {
            let options = commands::simulate::SimulateOptions {
                width,
                height,
                ticks,
                pointer: pointer.as_deref().map(commands::simulate::parse_pointer).transpose()?,
                seed,
                json,
            };
            commands::simulate::run(&config, &options)
        }
        Some(Commands::Themes) => commands::themes::run(&config),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

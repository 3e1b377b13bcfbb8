//! cite-bridge CLI - Main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cite_bridge::BridgeConfig;

mod commands;

#[derive(Parser)]
#[command(name = "cite-bridge")]
#[command(version)]
#[command(about = "Translate records to CSL-JSON and assemble bibliographies", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map records from a JSON export to CSL-JSON items
    Map {
        /// JSON file holding an array of records
        records: PathBuf,

        /// Record to map (repeatable; defaults to every record)
        #[arg(long = "id")]
        ids: Vec<u64>,
    },

    /// Assemble an engine's bibliography output
    Bibliography {
        /// JSON file holding the engine's [metadata, entries] pair
        input: PathBuf,

        /// Output format: text, html or rtf
        #[arg(short = 't', long, default_value = "text")]
        to: String,

        /// JSON object mapping entry ids to replacement text
        #[arg(long)]
        overrides: Option<PathBuf>,
    },

    /// Print the month names of a locale
    Months {
        /// Locale identifier (defaults to the configured default locale)
        #[arg(short, long)]
        locale: Option<String>,

        /// Month form: long or short
        #[arg(long, default_value = "long")]
        form: String,

        /// Directory of locales-<id>.xml files (defaults to the bundled locales)
        #[arg(long)]
        locales_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<BridgeConfig> {
    match path {
        Some(path) => BridgeConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(BridgeConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cite_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Map { records, ids } => {
            commands::map::execute(commands::map::MapArgs { records, ids }, &config)
        }
        Commands::Bibliography {
            input,
            to,
            overrides,
        } => commands::bibliography::execute(commands::bibliography::BibliographyArgs {
            input,
            to,
            overrides,
        }),
        Commands::Months {
            locale,
            form,
            locales_dir,
        } => commands::months::execute(
            commands::months::MonthsArgs {
                locale,
                form,
                locales_dir,
            },
            &config,
        ),
    }
}

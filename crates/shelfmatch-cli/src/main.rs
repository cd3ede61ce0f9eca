mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shelfmatch_core::Environment;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfmatch")]
#[command(about = "Cross-marketplace product search and fulfillment extraction")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the search strategy plan for a reference product without searching
    Strategies {
        /// Reference product record (JSON)
        #[arg(long)]
        reference: PathBuf,

        /// Free-text query for the last-resort strategy (defaults to the title)
        #[arg(long)]
        fallback: Option<String>,
    },
    /// Search the catalog for a reference product and annotate results
    Search {
        /// Reference product record (JSON)
        #[arg(long)]
        reference: PathBuf,

        /// Free-text query for the last-resort strategy (defaults to the title)
        #[arg(long)]
        fallback: Option<String>,

        /// Maximum results to return (defaults to SHELFMATCH_MAX_RESULTS)
        #[arg(long)]
        max_results: Option<usize>,

        /// Skip listing detail fetches; only inline text is used for fulfillment
        #[arg(long)]
        no_details: bool,
    },
    /// Extract seller/shipper facts from a listing record
    Extract {
        /// Listing record (JSON)
        #[arg(long)]
        listing: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Strategies {
            reference,
            fallback,
        }) => {
            init_tracing("info", LogStyle::default())?;
            commands::run_strategies(&reference, fallback.as_deref())?;
        }
        Some(Commands::Search {
            reference,
            fallback,
            max_results,
            no_details,
        }) => {
            let config = shelfmatch_core::load_app_config()?;
            init_tracing(&config.log_level, LogStyle::for_env(&config.env))?;
            tracing::debug!(?config, "configuration loaded");
            commands::run_search(
                &config,
                &reference,
                fallback.as_deref(),
                max_results,
                no_details,
            )
            .await?;
        }
        Some(Commands::Extract { listing }) => {
            init_tracing("info", LogStyle::default())?;
            commands::run_extract(&listing)?;
        }
        None => println!("shelfmatch: run with --help to list commands"),
    }

    Ok(())
}

/// Log line format. Development gets coloured, target-tagged lines; test and
/// production get plain compact lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogStyle {
    ansi: bool,
    compact: bool,
}

impl LogStyle {
    fn for_env(env: &Environment) -> Self {
        match env {
            Environment::Development => Self {
                ansi: true,
                compact: false,
            },
            Environment::Test | Environment::Production => Self {
                ansi: false,
                compact: true,
            },
        }
    }
}

impl Default for LogStyle {
    fn default() -> Self {
        Self::for_env(&Environment::Development)
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so stdout
/// stays valid JSON.
fn init_tracing(default_level: &str, style: LogStyle) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(style.ansi);
    if style.compact {
        builder.compact().with_target(false).init();
    } else {
        builder.init();
    }
    Ok(())
}

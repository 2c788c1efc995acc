//! GreenBasket CLI - Seed data and demo tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a YAML product seed file
//! gb-cli seed check -f seed/products.yaml
//!
//! # Run the scripted storefront walkthrough against the in-memory backend
//! gb-cli demo
//!
//! # Same, seeded from a file
//! gb-cli demo -p seed/products.yaml
//! ```
//!
//! # Commands
//!
//! - `seed check` - Validate product seed data
//! - `demo` - Scripted shopper + admin session (catalog, cart, checkout,
//!   orders, user management, dashboard)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "gb-cli")]
#[command(author, version, about = "GreenBasket CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with seed data
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Run the scripted storefront walkthrough
    Demo {
        /// YAML file of products to seed (defaults to built-in sample data)
        #[arg(short, long)]
        products: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Validate a YAML product seed file
    Check {
        /// Seed file path (falls back to `GREENBASKET_SEED_FILE`)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = CliConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gb_cli=info,greenbasket_storefront=info,greenbasket_admin=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { action } => match action {
            SeedAction::Check { file } => {
                let path = file.or_else(|| config.seed_file.clone()).ok_or(
                    "no seed file given; pass --file or set GREENBASKET_SEED_FILE",
                )?;
                commands::seed::check(&path).await?;
            }
        },
        Commands::Demo { products } => {
            commands::demo::run(config, products.as_deref()).await?;
        }
    }
    Ok(())
}

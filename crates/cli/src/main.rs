//! Pocket Store CLI - drive the storefront client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List category tabs and their keys
//! pocket-store categories
//!
//! # Fetch one category
//! pocket-store products --category mens-watches
//!
//! # Sign in and show the profile
//! pocket-store login -u emilys -p emilyspass
//!
//! # Sign in, load a category, then create, edit and delete a product
//! pocket-store demo -u emilys -p emilyspass
//! ```
//!
//! # Environment Variables
//!
//! See `pocket_store_client::config`. `RUST_LOG` overrides the default log
//! filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pocket_store_client::config::ClientConfig;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "pocket-store")]
#[command(author, version, about = "Pocket Store storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List category tabs and their keys
    Categories,
    /// Fetch and list the products of one category
    Products {
        /// Category key, e.g. `mens-shirts`
        #[arg(short, long)]
        category: String,
    },
    /// Sign in and show the profile
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign in, load a category, then create, edit and delete a product
    Demo {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        /// Category to load instead of the first tab's default
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Initialize Sentry error tracking.
///
/// Returns a guard that must be kept alive for the duration of the program.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
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

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::failure(&e.to_string());
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pocket_store_client=info,pocket_store_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        e.report();
        output::failure(&e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> pocket_store_client::Result<()> {
    match cli.command {
        Commands::Categories => commands::catalog::categories(),
        Commands::Products { category } => commands::catalog::products(config, &category).await?,
        Commands::Login { username, password } => {
            commands::session::login(config, &username, &password).await?;
        }
        Commands::Demo {
            username,
            password,
            category,
        } => commands::demo::run(config, &username, &password, category.as_deref()).await?,
    }
    Ok(())
}

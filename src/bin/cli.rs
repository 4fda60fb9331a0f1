//! walkscrape CLI
//!
//! Local execution entry point for the catalog and Mars pipelines.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use walkscrape::{
    browser::{self, Browser},
    error::Result,
    models::{Config, DriverKind, OpenMode, PersistencePolicy},
    pipeline,
    storage::{LocalStorage, SnapshotStore},
    utils::http,
};

/// walkscrape - Book catalog and Mars news scraper
#[derive(Parser, Debug)]
#[command(
    name = "walkscrape",
    version,
    about = "Browser-driven catalog and Mars snapshot scraper"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "walkscrape.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Browser session to drive
    #[arg(long, value_enum)]
    driver: Option<DriverArg>,

    /// Run the WebDriver browser headless
    #[arg(long, conflicts_with = "no_headless")]
    headless: bool,

    /// Show the WebDriver browser window
    #[arg(long)]
    no_headless: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the book catalog into a CSV file
    Catalog {
        /// First listing page (default: catalog.start_url)
        #[arg(long)]
        start_url: Option<String>,

        /// Output CSV path (default: catalog.output_path)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite the output instead of appending
        #[arg(long)]
        truncate: bool,
    },

    /// Scrape the Mars sources and store the snapshot
    Mars {
        /// Number of news articles to keep
        #[arg(long)]
        articles: Option<usize>,

        /// How snapshots are persisted
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },

    /// Print the current Mars snapshot as JSON
    Show,

    /// Validate the configuration
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DriverArg {
    Static,
    Webdriver,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Replace,
    History,
}

impl From<DriverArg> for DriverKind {
    fn from(arg: DriverArg) -> Self {
        match arg {
            DriverArg::Static => DriverKind::Static,
            DriverArg::Webdriver => DriverKind::Webdriver,
        }
    }
}

impl From<PolicyArg> for PersistencePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Replace => PersistencePolicy::Replace,
            PolicyArg::History => PersistencePolicy::History,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Apply the session flags shared by every command.
fn apply_browser_flags(cli: &Cli, config: &mut Config) {
    if let Some(driver) = cli.driver {
        config.browser.driver = driver.into();
    }
    if cli.headless {
        config.browser.headless = true;
    }
    if cli.no_headless {
        config.browser.headless = false;
    }
}

/// Close a finished session, logging rather than failing the run.
async fn close_session(mut session: Box<dyn Browser>) {
    if let Err(e) = session.close().await {
        log::warn!("Browser session did not close cleanly: {}", e);
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("walkscrape starting...");

    let mut config = Config::load_or_default(&cli.config);
    apply_browser_flags(&cli, &mut config);
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Catalog {
            start_url,
            output,
            truncate,
        } => {
            if let Some(url) = start_url {
                config.catalog.start_url = url;
            }
            if let Some(path) = output {
                config.catalog.output_path = path;
            }
            if truncate {
                config.catalog.open_mode = OpenMode::Truncate;
            }
            config.validate()?;

            let client = http::create_async_client(&config.browser)?;
            let mut session = browser::open(&config.browser, &client).await?;
            let result = pipeline::run_catalog(&config, session.as_mut()).await;
            close_session(session).await;
            let summary = result?;

            log::info!(
                "Catalog walk done: {} records, {} items skipped",
                summary.records_written,
                summary.items_skipped
            );
        }

        Command::Mars { articles, policy } => {
            if let Some(n) = articles {
                config.mars.n_articles = n;
            }
            if let Some(policy) = policy {
                config.store.policy = policy.into();
            }
            config.validate()?;

            let client = http::create_async_client(&config.browser)?;
            let store = LocalStorage::new(&config.store.dir, config.store.policy);
            let mut session = browser::open(&config.browser, &client).await?;
            let result = pipeline::run_mars(&config, session.as_mut(), &client, &store).await;
            close_session(session).await;
            let metadata = result?;

            log::info!("Snapshot timestamp: {}", metadata.timestamp);
        }

        Command::Show => {
            let store = LocalStorage::new(&config.store.dir, config.store.policy);
            match store.load_current().await? {
                Some(document) => println!("{}", serde_json::to_string_pretty(&document)?),
                None => log::info!("No snapshot found yet."),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}

//! rustcrossref - CrossRef article search
//!
//! Searches CrossRef by title, lists the hits newest first, opens links and
//! saves the results to a spreadsheet.
//!
//! ## Usage
//!
//! ### Interactive Mode
//! ```bash
//! rustcrossref
//! > search protein folding
//! > open 3
//! > save results.xlsx
//! ```
//!
//! ### One-shot Mode
//! ```bash
//! rustcrossref search "protein folding" --export results.xlsx
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rustcrossref::{
    app::{App, Flow, SearchOutcome},
    commands,
    config::{self, ClientConfig, CROSSREF_API_URL, DEFAULT_ROWS, DEFAULT_TIMEOUT_SECS},
    crossref::CrossrefClient,
    surface::{Surface, SystemBrowser, TerminalSurface},
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// CrossRef article search - rank by year, open links, export to spreadsheet
#[derive(Parser)]
#[command(name = "rustcrossref")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Crossref works endpoint
    #[arg(long, global = true, env = "CROSSREF_API_URL", default_value = CROSSREF_API_URL)]
    api_url: String,

    /// Results requested per search (first page only)
    #[arg(long, global = true, default_value_t = DEFAULT_ROWS)]
    rows: u32,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Contact email for CrossRef's polite pool
    #[arg(long, global = true, env = "CROSSREF_MAILTO")]
    mailto: Option<String>,

    /// Directory for saved spreadsheets (default: Downloads)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Interactive,

    /// Run one search and print the results
    Search {
        /// Title search term
        term: String,

        /// Also save the results (.xlsx or .csv)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

const BANNER: &str = "Enter a term with 'search <term>' to find articles by title. \
Uses the free CrossRef API. Type 'help' for commands.";

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(io::stderr);

    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let client_config = ClientConfig {
        works_url: cli.api_url,
        rows: cli.rows,
        timeout: Duration::from_secs(cli.timeout),
        mailto: cli.mailto,
    };
    let client = CrossrefClient::new(&client_config).context("Invalid client configuration")?;
    let export_dir = cli.output_dir.unwrap_or_else(config::default_export_dir);
    debug!(export_dir = %export_dir.display(), "Export directory");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(client, export_dir).await,
        Commands::Search {
            term,
            export,
            format,
        } => run_search(client, export_dir, term, export, format).await,
    }
}

// ============================================================================
// Interactive Session
// ============================================================================

async fn run_interactive(client: CrossrefClient, export_dir: PathBuf) -> Result<()> {
    let mut app = App::new(client, TerminalSurface::stdout(), SystemBrowser, export_dir);
    app.surface_mut().print(BANNER);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        match commands::parse_line(&input) {
            Ok(Some(action)) => {
                if app.dispatch(action).await == Flow::Exit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => app.report(&e),
        }
    }

    app.surface_mut().print(&format!(
        "{} {} - powered by the CrossRef REST API",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    Ok(())
}

// ============================================================================
// One-shot Search
// ============================================================================

async fn run_search(
    client: CrossrefClient,
    export_dir: PathBuf,
    term: String,
    export: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut app = App::new(client, TerminalSurface::stdout(), SystemBrowser, export_dir);
            search_and_save(&mut app, &term, export).await
        }
        OutputFormat::Json => {
            let mut app = App::new(client, TerminalSurface::new(io::sink()), SystemBrowser, export_dir);
            search_and_save(&mut app, &term, export).await?;
            println!("{}", serde_json::to_string_pretty(app.store().records())?);
            Ok(())
        }
    }
}

async fn search_and_save<S: Surface>(
    app: &mut App<S, SystemBrowser>,
    term: &str,
    export: Option<PathBuf>,
) -> Result<()> {
    if app.search(term).await? == SearchOutcome::NoResults {
        eprintln!("No articles found for the search term.");
    }

    if let Some(path) = export {
        let written = app.save(Some(path))?;
        eprintln!("Saved: {}", written.display());
    }

    Ok(())
}

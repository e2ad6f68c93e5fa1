use std::{io::Write, path::PathBuf};

use clap::{builder::ArgAction, Parser, Subcommand};
use console::{style, Emoji};
use errors::PubFetchCliError;
use pubfetch::{output, Config, DetailMode, PaperFetcher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static BUG: Emoji<'_, '_> = Emoji("🐛 ", "");
static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

#[derive(Parser)]
#[command(author, version, about = "Find PubMed papers with industry-affiliated authors")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Fetch PubMed papers matching a query
  Fetch {
    /// Search query for PubMed
    query:       String,
    /// Save the results as CSV to this file instead of printing them
    #[arg(long, short)]
    file:        Option<PathBuf>,
    /// Maximum number of results to fetch
    #[arg(long, short, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    max_results: u32,
    /// Print identifiers and request parameters, and log at debug level
    #[arg(long, short)]
    debug:       bool,
    /// Use document summaries only (no author affiliations)
    #[arg(long)]
    summary:     bool,
    /// Path to a TOML configuration file
    #[arg(long, short)]
    config:      Option<PathBuf>,
  },
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8, debug: bool) {
  let level = match (verbosity, debug) {
    (0, false) => "warn",
    (1, false) => "info",
    (0..=2, _) => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(format!("warn,pubfetch={level},pubfetch_cli={level}")));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

#[tokio::main]
async fn main() -> Result<(), PubFetchCliError> {
  let cli = Cli::parse();
  let debug_mode = matches!(cli.command, Commands::Fetch { debug: true, .. });
  setup_logging(cli.verbose, debug_mode);

  match cli.command {
    Commands::Fetch { query, file, max_results, debug, summary, config } => {
      let config = Config::load(config.as_deref())?;
      let mode = if summary { DetailMode::Summary } else { DetailMode::Full };
      let fetcher = PaperFetcher::new(&config)?.with_mode(mode);
      let max_results = max_results as usize;

      eprintln!("{} Searching PubMed for: {}", style(LOOKING_GLASS).cyan(), style(&query).yellow());
      if debug {
        eprintln!(
          "{} Parameters: query={:?} max_results={} mode={:?} base_url={} keywords={:?}",
          style(BUG).magenta(),
          query,
          max_results,
          mode,
          config.base_url,
          config.industry_keywords
        );
      }

      let ids = fetcher.search_ids(&query, max_results).await;
      if debug {
        eprintln!("{} Fetched IDs: {:?}", style(BUG).magenta(), ids);
      }

      let papers = fetcher.fetch_details(&ids).await;
      debug!("Retrieved {} papers", papers.len());

      if papers.is_empty() {
        println!("No papers found.");
      }

      match file {
        Some(path) => match output::write_csv(&papers, &path) {
          Ok(()) => println!(
            "{} Saved {} papers to '{}'.",
            style(SAVE).green(),
            style(papers.len()).yellow(),
            path.display()
          ),
          Err(e) => println!(
            "{} Failed to write '{}': {}",
            style(WARNING).red(),
            path.display(),
            style(e).red()
          ),
        },
        None => {
          let mut stdout = std::io::stdout().lock();
          for paper in &papers {
            writeln!(stdout, "{paper}")?;
          }
        },
      }
      Ok(())
    },
  }
}

//! The best-effort pipeline: search, then retrieve details, never failing.
//!
//! [`PaperFetcher`] wraps the three endpoint clients. Its staged methods catch network and
//! parse errors, log them with `warn!`, and degrade to an empty list, which suits a CLI that
//! should always complete. Callers that want typed failures use the clients directly.
//!
//! # Examples
//!
//! ```no_run
//! use pubfetch::{Config, DetailMode, PaperFetcher};
//!
//! # async fn example() -> Result<(), pubfetch::PubFetchError> {
//! let fetcher = PaperFetcher::new(&Config::default())?.with_mode(DetailMode::Summary);
//! let ids = fetcher.search_ids("malaria vaccine", 10).await;
//! let papers = fetcher.fetch_details(&ids).await;
//! assert_eq!(papers.len(), ids.len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// Which endpoint the detail stage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
  /// EFetch full records, falling back to ESummary if EFetch fails
  #[default]
  Full,
  /// ESummary only; authorship is always unknown
  Summary,
}

/// Runs the search → detail pipeline with best-effort error handling.
pub struct PaperFetcher {
  /// Identifier search client
  search:  ESearchClient,
  /// Full-record client
  fetch:   EFetchClient,
  /// Summary client used as fallback
  summary: ESummaryClient,
  /// Detail endpoint selection
  mode:    DetailMode,
}

impl PaperFetcher {
  /// Build every client from `config`.
  ///
  /// # Errors
  ///
  /// Fails only on local problems: an invalid base URL or an HTTP client that can't be built.
  pub fn new(config: &Config) -> Result<Self, PubFetchError> {
    Ok(Self {
      search:  ESearchClient::new(config)?,
      fetch:   EFetchClient::new(config)?,
      summary: ESummaryClient::new(config)?,
      mode:    DetailMode::default(),
    })
  }

  /// Use `mode` for the detail stage.
  pub fn with_mode(mut self, mode: DetailMode) -> Self {
    self.mode = mode;
    self
  }

  /// Search for up to `max_results` identifiers; any failure yields an empty list.
  pub async fn search_ids(&self, query: &str, max_results: usize) -> Vec<String> {
    match self.search.search_ids(query, max_results).await {
      Ok(ids) => ids,
      Err(e) => {
        warn!("Search for {query:?} failed: {e}");
        Vec::new()
      },
    }
  }

  /// Retrieve one record per identifier, in order.
  ///
  /// In [`DetailMode::Full`] a failed EFetch request is retried once through ESummary. If the
  /// remaining path fails too, the result is empty.
  pub async fn fetch_details(&self, ids: &[String]) -> Vec<PaperRecord> {
    if ids.is_empty() {
      return Vec::new();
    }

    if self.mode == DetailMode::Full {
      match self.fetch.fetch_records(ids).await {
        Ok(records) => return records,
        Err(e) => warn!("Full record retrieval failed, falling back to summaries: {e}"),
      }
    }

    match self.summary.fetch_records(ids).await {
      Ok(records) => records,
      Err(e) => {
        warn!("Summary retrieval failed: {e}");
        Vec::new()
      },
    }
  }

  /// Search for `query` and retrieve the details of every match.
  pub async fn fetch_papers(&self, query: &str, max_results: usize) -> Vec<PaperRecord> {
    let ids = self.search_ids(query, max_results).await;
    debug!("Fetched IDs: {ids:?}");
    self.fetch_details(&ids).await
  }
}

//! Clients for the NCBI E-utilities endpoints used by the pipeline.
//!
//! Each submodule wraps one endpoint and owns the logic for:
//! - Building the request parameters
//! - Issuing a single GET request with the configured timeout
//! - Converting the response into identifiers or [`PaperRecord`]s
//!
//! # Endpoints
//!
//! - [`esearch`] - query → PubMed identifiers (JSON)
//! - [`efetch`] - identifiers → full article records (XML), the canonical detail path
//! - [`esummary`] - identifiers → document summaries (JSON), the degraded detail path
//!
//! The clients return typed errors; [`PaperFetcher`](crate::PaperFetcher) layers the
//! best-effort policy on top.
//!
//! # Examples
//!
//! ```no_run
//! use pubfetch::{Config, EFetchClient, ESearchClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let ids = ESearchClient::new(&config)?.search_ids("crispr", 3).await?;
//! let records = EFetchClient::new(&config)?.fetch_records(&ids).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod efetch;
pub mod esearch;
pub mod esummary;

pub use efetch::EFetchClient;
pub use esearch::ESearchClient;
pub use esummary::ESummaryClient;

use super::*;

/// Database parameter sent with every request.
const DATABASE: &str = "pubmed";

/// Send a GET request and return the body of a successful response.
async fn get_text(
  client: &reqwest::Client,
  url: &Url,
  params: &[(&str, &str)],
) -> Result<String, PubFetchError> {
  debug!("GET {url} with params {params:?}");
  let response = client.get(url.clone()).query(params).send().await?.error_for_status()?;
  let body = response.text().await?;
  trace!("Response from {url}: {body}");
  Ok(body)
}

/// Reorder `records` to follow `ids`, filling in identifiers the response didn't cover.
fn align_to_ids(ids: &[String], records: Vec<PaperRecord>) -> Vec<PaperRecord> {
  let by_id: HashMap<String, PaperRecord> =
    records.into_iter().map(|record| (record.pubmed_id.clone(), record)).collect();

  ids
    .iter()
    .map(|id| {
      by_id.get(id).cloned().unwrap_or_else(|| {
        warn!("No record returned for PubMed ID {id}");
        PaperRecord::unresolved(id.clone())
      })
    })
    .collect()
}

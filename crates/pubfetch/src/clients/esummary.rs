//! Client for the ESummary endpoint, the degraded detail path.
//!
//! Document summaries carry a title and a free-text `pubdate` but no affiliations, so every
//! record produced here has [`Authorship::Unknown`] and renders `NA` in the classification
//! columns. It is used when EFetch is unavailable, or when the caller asks for it.

use super::*;
use crate::paper::normalize_summary_date;

/// Top level of the ESummary JSON response.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
  /// `uids` plus one document object per identifier, keyed by identifier
  result: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The fields read from one document summary.
#[derive(Debug, Deserialize)]
struct DocumentSummary {
  /// Article title
  #[serde(default)]
  title:   String,
  /// Free-text publication date, e.g. `2023 Jan 5`
  #[serde(default)]
  pubdate: String,
  /// Set instead of the other fields for identifiers ESummary can't resolve
  error:   Option<String>,
}

/// Client for the ESummary endpoint.
pub struct ESummaryClient {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// Fully resolved `esummary.fcgi` URL.
  endpoint: Url,
}

impl ESummaryClient {
  /// Creates a client for the base URL and timeout in `config`.
  pub fn new(config: &Config) -> Result<Self, PubFetchError> {
    Ok(Self { client: config.http_client()?, endpoint: config.endpoint("esummary.fcgi")? })
  }

  /// Fetch summary records for `ids` in one batched request.
  ///
  /// Like [`EFetchClient::fetch_records`], the result follows the order of `ids` and an empty
  /// `ids` makes no request.
  ///
  /// # Errors
  ///
  /// - [`PubFetchError::Network`] if the request fails or returns a non-2xx status
  /// - [`PubFetchError::Json`] if the body is not JSON
  /// - [`PubFetchError::ApiError`] if the body has no `result` block
  pub async fn fetch_records(&self, ids: &[String]) -> Result<Vec<PaperRecord>, PubFetchError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let id_list = ids.join(",");
    let body = get_text(&self.client, &self.endpoint, &[
      ("db", DATABASE),
      ("id", id_list.as_str()),
      ("retmode", "json"),
    ])
    .await?;

    let records = parse_summaries(&body)?;
    debug!("ESummary parsed {} documents for {} identifiers", records.len(), ids.len());
    Ok(align_to_ids(ids, records))
  }
}

/// Parse an ESummary JSON body into unclassified records.
fn parse_summaries(body: &str) -> Result<Vec<PaperRecord>, PubFetchError> {
  let response: SummaryResponse = serde_json::from_str(body)?;
  let mut result = response
    .result
    .ok_or_else(|| PubFetchError::ApiError("ESummary response has no result block".into()))?;

  let uids: Vec<String> = match result.remove("uids") {
    Some(uids) => serde_json::from_value(uids)?,
    None => Vec::new(),
  };

  let mut records = Vec::with_capacity(uids.len());
  for uid in uids {
    let Some(document) = result.remove(&uid) else { continue };
    let summary: DocumentSummary = serde_json::from_value(document)?;
    if let Some(error) = summary.error {
      warn!("ESummary could not resolve {uid}: {error}");
      continue;
    }
    records.push(PaperRecord {
      pubmed_id:        uid,
      title:            summary.title.trim().to_string(),
      publication_date: normalize_summary_date(&summary.pubdate),
      authorship:       Authorship::Unknown,
    });
  }
  Ok(records)
}

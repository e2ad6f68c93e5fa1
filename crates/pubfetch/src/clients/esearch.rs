//! Client for the ESearch endpoint, which turns a free-text query into PubMed identifiers.
//!
//! The request asks for a JSON response:
//! `esearch.fcgi?db=pubmed&term=<query>&retmax=<n>&retmode=json`.
//!
//! # Examples
//!
//! ```no_run
//! use pubfetch::{Config, ESearchClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ESearchClient::new(&Config::default())?;
//! let ids = client.search_ids("cancer immunotherapy", 20).await?;
//! assert!(ids.len() <= 20);
//! # Ok(())
//! # }
//! ```

use super::*;

/// Top level of the ESearch JSON response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
  /// The search result block; absent in some error responses
  esearchresult: Option<SearchResult>,
}

/// The `esearchresult` block.
#[derive(Debug, Deserialize)]
struct SearchResult {
  /// Matching identifiers, most relevant first
  #[serde(default)]
  idlist: Vec<String>,
  /// Error message reported by the search backend
  #[serde(rename = "ERROR")]
  error:  Option<String>,
}

/// Client for the ESearch endpoint.
pub struct ESearchClient {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// Fully resolved `esearch.fcgi` URL.
  endpoint: Url,
}

impl ESearchClient {
  /// Creates a client for the base URL and timeout in `config`.
  pub fn new(config: &Config) -> Result<Self, PubFetchError> {
    Ok(Self { client: config.http_client()?, endpoint: config.endpoint("esearch.fcgi")? })
  }

  /// Search PubMed for `query`, returning at most `max_results` identifiers.
  ///
  /// A response without an identifier list is an empty result, not an error.
  ///
  /// # Errors
  ///
  /// - [`PubFetchError::Network`] if the request fails or returns a non-2xx status
  /// - [`PubFetchError::Json`] if the body is not JSON of the expected shape
  /// - [`PubFetchError::ApiError`] if the search backend reports an error
  pub async fn search_ids(
    &self,
    query: &str,
    max_results: usize,
  ) -> Result<Vec<String>, PubFetchError> {
    let retmax = max_results.to_string();
    let body = get_text(&self.client, &self.endpoint, &[
      ("db", DATABASE),
      ("term", query),
      ("retmax", retmax.as_str()),
      ("retmode", "json"),
    ])
    .await?;

    let ids = parse_search_response(&body, max_results)?;
    debug!("ESearch returned {} identifiers for {query:?}", ids.len());
    Ok(ids)
  }
}

/// Extract the identifier list from an ESearch JSON body, truncated to `max_results`.
fn parse_search_response(body: &str, max_results: usize) -> Result<Vec<String>, PubFetchError> {
  let response: SearchResponse = serde_json::from_str(body)?;
  let Some(result) = response.esearchresult else {
    return Ok(Vec::new());
  };

  if let Some(error) = result.error {
    return Err(PubFetchError::ApiError(error));
  }

  let mut ids = result.idlist;
  ids.truncate(max_results);
  Ok(ids)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_search_response() {
    let body = r#"{
      "header": {"type": "esearch", "version": "0.3"},
      "esearchresult": {
        "count": "2", "retmax": "2", "retstart": "0",
        "idlist": ["111", "222"],
        "translationset": [], "querytranslation": "cancer immunotherapy"
      }
    }"#;
    assert_eq!(parse_search_response(body, 20).unwrap(), vec!["111", "222"]);
  }

  #[test]
  fn test_parse_search_response_truncates() {
    let body = r#"{"esearchresult": {"idlist": ["1", "2", "3", "4"]}}"#;
    assert_eq!(parse_search_response(body, 2).unwrap(), vec!["1", "2"]);
  }

  #[test]
  fn test_parse_search_response_missing_fields_is_empty() {
    assert!(parse_search_response(r#"{"esearchresult": {"count": "0"}}"#, 5).unwrap().is_empty());
    assert!(parse_search_response(r#"{"header": {}}"#, 5).unwrap().is_empty());
  }

  #[test]
  fn test_parse_search_response_errors() {
    let err = parse_search_response(r#"{"esearchresult": {"ERROR": "Invalid query"}}"#, 5)
      .unwrap_err();
    assert!(matches!(err, PubFetchError::ApiError(ref msg) if msg == "Invalid query"));

    let err = parse_search_response("<html>busy</html>", 5).unwrap_err();
    assert!(err.is_parse());
  }
}

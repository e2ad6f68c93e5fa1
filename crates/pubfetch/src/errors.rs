//! Error types for the pubfetch library.
//!
//! Every fallible operation in the library returns [`PubFetchError`]. The variants fall into
//! three families:
//! - Network failures: the request could not complete, timed out, or returned a non-2xx status
//! - Parse failures: the response body is not valid XML/JSON or lacks the expected structure
//! - Local failures: configuration, filesystem, and CSV writing problems
//!
//! The staged helpers on [`PaperFetcher`](crate::PaperFetcher) catch network and parse failures
//! and degrade to empty results; the typed clients surface them for callers that want strict
//! handling.
//!
//! # Examples
//!
//! ```no_run
//! use pubfetch::{errors::PubFetchError, Config, ESearchClient};
//!
//! # async fn example() -> Result<(), PubFetchError> {
//! let client = ESearchClient::new(&Config::default())?;
//! match client.search_ids("cancer immunotherapy", 20).await {
//!   Ok(ids) => println!("{} identifiers", ids.len()),
//!   Err(e) if e.is_network() => println!("PubMed unreachable: {e}"),
//!   Err(e) => println!("Unexpected response: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors that can occur while fetching, parsing, or writing papers.
#[derive(Error, Debug)]
pub enum PubFetchError {
  /// A network request failed.
  ///
  /// This covers DNS and connection errors, timeouts, and non-2xx responses (converted through
  /// `error_for_status`).
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The XML document returned by EFetch could not be read.
  #[error("Failed to parse XML: {0}")]
  Xml(#[from] quick_xml::Error),

  /// A JSON body returned by ESearch or ESummary could not be decoded.
  #[error("Failed to parse JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// The API answered, but the body reports an error or lacks the expected structure.
  #[error("API error: {0}")]
  ApiError(String),

  /// The configured base URL (or an endpoint derived from it) is not a valid URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// The configuration file is not valid TOML or has fields of the wrong type.
  #[error("Invalid configuration: {0}")]
  Config(#[from] toml::de::Error),

  /// Writing a CSV row failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A filesystem operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),
}

impl PubFetchError {
  /// Whether this error means the remote service could not be reached or refused the request.
  pub fn is_network(&self) -> bool { matches!(self, PubFetchError::Network(_)) }

  /// Whether this error means a response arrived but could not be understood.
  pub fn is_parse(&self) -> bool {
    matches!(self, PubFetchError::Xml(_) | PubFetchError::Json(_) | PubFetchError::ApiError(_))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_taxonomy() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = PubFetchError::from(json);
    assert!(err.is_parse());
    assert!(!err.is_network());

    let err = PubFetchError::ApiError("Search Backend failed".into());
    assert!(err.is_parse());
    assert_eq!(err.to_string(), "API error: Search Backend failed");

    let err = PubFetchError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
    assert!(!err.is_parse());
    assert!(!err.is_network());
  }
}

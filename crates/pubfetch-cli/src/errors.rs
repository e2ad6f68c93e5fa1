//! Error types for the pubfetch command line tool.
//!
//! Almost nothing is fatal for the CLI: search and retrieval problems degrade inside the
//! library, and a failed CSV write is reported on the console. What remains are problems that
//! stop the run before any request is made, such as an unreadable configuration file or an
//! invalid base URL.

use thiserror::Error;

/// Errors that end a CLI run.
///
/// Variants are transparent so the underlying message reaches the user unchanged.
#[derive(Error, Debug)]
pub enum PubFetchCliError {
  /// Errors from the underlying pubfetch library
  #[error(transparent)]
  PubFetch(#[from] pubfetch::PubFetchError),

  /// Console IO errors
  #[error(transparent)]
  IO(#[from] std::io::Error),
}

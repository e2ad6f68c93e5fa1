//! A library for searching PubMed, retrieving paper metadata, and flagging authors whose
//! affiliations look like for-profit companies.
//!
//! The work happens in three forward-only stages:
//! 1. [`ESearchClient`] turns a free-text query into a bounded list of PubMed identifiers.
//! 2. [`EFetchClient`] retrieves the full records for those identifiers in one batched request
//!    ([`ESummaryClient`] is the degraded fallback without author data).
//! 3. [`Classifier`] scans each author's affiliations for industry keywords.
//!
//! [`PaperFetcher`] wires the stages together and never fails: network and parse problems are
//! logged and degrade to an empty result.
//!
//! # Example
//! ```rust,no_run
//! use pubfetch::{Config, PaperFetcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let fetcher = PaperFetcher::new(&Config::default())?;
//!   let papers = fetcher.fetch_papers("cancer immunotherapy", 5).await;
//!   for paper in &papers {
//!     println!("{paper}");
//!   }
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;
use url::Url;

pub mod classify;
pub mod clients;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod output;
pub mod paper;

pub use classify::{Classification, Classifier};
pub use clients::{EFetchClient, ESearchClient, ESummaryClient};
pub use config::Config;
pub use errors::PubFetchError;
pub use fetcher::{DetailMode, PaperFetcher};
use paper::{compose_date, Authorship};
pub use paper::PaperRecord;

//! Paper records and the helpers that shape their fields.
//!
//! A [`PaperRecord`] is the unit of output: one per identifier returned by the search stage.
//! Authorship data is either [`Authorship::Classified`] (the full EFetch record was available)
//! or [`Authorship::Unknown`] (summary fallback, or the identifier was missing from the
//! response), in which case every classification column renders as [`UNKNOWN_MARKER`].
//!
//! # Examples
//!
//! ```
//! use pubfetch::paper::compose_date;
//!
//! assert_eq!(compose_date(Some("2023"), Some("Jan"), Some("05")), "2023-Jan-05");
//! assert_eq!(compose_date(Some("2023"), None, None), "2023");
//! assert_eq!(compose_date(None, Some("Mar"), None), "Mar");
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

/// Marker written in place of classification data that could not be retrieved.
pub const UNKNOWN_MARKER: &str = "NA";

/// Separator used when a list of names or affiliations is rendered into a single cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Authorship findings for a single paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorship {
  /// Authors and affiliations were available and have been classified
  Classified(Classification),
  /// The retrieval path did not provide author data
  Unknown,
}

/// The structured result for one PubMed paper.
///
/// ```
/// use pubfetch::{paper::Authorship, Classification, PaperRecord};
///
/// let record = PaperRecord {
///   pubmed_id:        "111".into(),
///   title:            "A study".into(),
///   publication_date: "2023-Jan".into(),
///   authorship:       Authorship::Classified(Classification {
///     non_academic_authors: vec!["Jane Doe".into()],
///     company_affiliations: vec!["Acme Pharma Inc.".into()],
///     email:                String::new(),
///   }),
/// };
/// assert_eq!(record.non_academic_authors_cell(), "Jane Doe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// PubMed identifier (PMID)
  pub pubmed_id:        String,
  /// Article title, empty when absent
  pub title:            String,
  /// Publication date with missing parts omitted (e.g. `2023`, `2023-Jan`, `2023-Jan-05`)
  pub publication_date: String,
  /// Industry classification of the paper's authors
  pub authorship:       Authorship,
}

impl PaperRecord {
  /// A record for an identifier the detail stage returned nothing for.
  pub fn unresolved(pubmed_id: impl Into<String>) -> Self {
    Self {
      pubmed_id:        pubmed_id.into(),
      title:            String::new(),
      publication_date: String::new(),
      authorship:       Authorship::Unknown,
    }
  }

  /// Classification data, if the retrieval path provided it.
  pub fn classification(&self) -> Option<&Classification> {
    match &self.authorship {
      Authorship::Classified(classification) => Some(classification),
      Authorship::Unknown => None,
    }
  }

  /// Non-academic author names joined into one cell.
  pub fn non_academic_authors_cell(&self) -> String {
    self
      .classification()
      .map(|c| c.non_academic_authors.join(LIST_SEPARATOR))
      .unwrap_or_else(|| UNKNOWN_MARKER.to_string())
  }

  /// Company affiliations joined into one cell.
  pub fn company_affiliations_cell(&self) -> String {
    self
      .classification()
      .map(|c| c.company_affiliations.join(LIST_SEPARATOR))
      .unwrap_or_else(|| UNKNOWN_MARKER.to_string())
  }

  /// Corresponding author email cell.
  pub fn email_cell(&self) -> String {
    self.classification().map(|c| c.email.clone()).unwrap_or_else(|| UNKNOWN_MARKER.to_string())
  }
}

impl fmt::Display for PaperRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let title = if self.title.is_empty() { "(untitled)" } else { &self.title };
    write!(f, "[{}] {}", self.pubmed_id, title)?;
    if !self.publication_date.is_empty() {
      write!(f, " ({})", self.publication_date)?;
    }
    write!(
      f,
      " | Non-academic: {} | Companies: {} | Email: {}",
      self.non_academic_authors_cell(),
      self.company_affiliations_cell(),
      self.email_cell()
    )
  }
}

/// Join the present date parts with hyphens, skipping absent or blank parts entirely.
pub fn compose_date(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> String {
  [year, month, day]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("-")
}

/// Bring an ESummary `pubdate` such as `"2023 Jan 5"` into the same shape as EFetch dates.
///
/// Dates that don't look like `YEAR [MON [DAY]]` (seasons, ranges) are kept as given.
pub fn normalize_summary_date(pubdate: &str) -> String {
  lazy_static! {
    static ref SUMMARY_DATE: Regex =
      Regex::new(r"^(\d{4})(?:\s+([A-Za-z]{3}))?(?:\s+(\d{1,2}))?$").unwrap();
  }

  let pubdate = pubdate.trim();
  match SUMMARY_DATE.captures(pubdate) {
    Some(caps) => compose_date(
      caps.get(1).map(|m| m.as_str()),
      caps.get(2).map(|m| m.as_str()),
      caps.get(3).map(|m| m.as_str()),
    ),
    None => pubdate.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn classified(authors: &[&str], affiliations: &[&str], email: &str) -> Authorship {
    Authorship::Classified(Classification {
      non_academic_authors: authors.iter().map(|s| s.to_string()).collect(),
      company_affiliations: affiliations.iter().map(|s| s.to_string()).collect(),
      email:                email.to_string(),
    })
  }

  #[test]
  fn test_compose_date_omits_missing_parts() {
    assert_eq!(compose_date(Some("2023"), Some("Jan"), Some("05")), "2023-Jan-05");
    assert_eq!(compose_date(Some("2023"), Some("Jan"), None), "2023-Jan");
    assert_eq!(compose_date(Some("2023"), None, None), "2023");
    assert_eq!(compose_date(Some("2023"), None, Some("05")), "2023-05");
    assert_eq!(compose_date(None, None, Some("05")), "05");
    assert_eq!(compose_date(None, None, None), "");
    assert_eq!(compose_date(Some(" 2023 "), Some(""), Some("  ")), "2023");
  }

  #[test]
  fn test_composed_dates_have_no_stray_hyphens() {
    let parts = [None, Some(""), Some("2021"), Some("Feb"), Some("9")];
    for year in parts {
      for month in parts {
        for day in parts {
          let date = compose_date(year, month, day);
          assert!(!date.starts_with('-'), "{date}");
          assert!(!date.ends_with('-'), "{date}");
          assert!(!date.contains("--"), "{date}");
        }
      }
    }
  }

  #[test]
  fn test_normalize_summary_date() {
    assert_eq!(normalize_summary_date("2023 Jan 5"), "2023-Jan-5");
    assert_eq!(normalize_summary_date("2023 Jan"), "2023-Jan");
    assert_eq!(normalize_summary_date("2023"), "2023");
    assert_eq!(normalize_summary_date(" 2019 Dec 31 "), "2019-Dec-31");
    assert_eq!(normalize_summary_date("2022 Winter"), "2022 Winter");
    assert_eq!(normalize_summary_date("2020 Jan-Feb"), "2020 Jan-Feb");
    assert_eq!(normalize_summary_date(""), "");
  }

  #[test]
  fn test_cells_for_classified_record() {
    let record = PaperRecord {
      pubmed_id:        "111".into(),
      title:            "Title".into(),
      publication_date: "2023".into(),
      authorship:       classified(
        &["Ann Lee", "Ann Lee"],
        &["Acme Pharma Inc.", "Beta Biotech Ltd"],
        "ann@acme.com",
      ),
    };
    assert_eq!(record.non_academic_authors_cell(), "Ann Lee; Ann Lee");
    assert_eq!(record.company_affiliations_cell(), "Acme Pharma Inc.; Beta Biotech Ltd");
    assert_eq!(record.email_cell(), "ann@acme.com");
  }

  #[test]
  fn test_unknown_authorship_renders_marker() {
    let record = PaperRecord::unresolved("999");
    assert_eq!(record.non_academic_authors_cell(), "NA");
    assert_eq!(record.company_affiliations_cell(), "NA");
    assert_eq!(record.email_cell(), "NA");
    assert!(record.classification().is_none());
  }

  #[test]
  fn test_display_is_single_line() {
    let record = PaperRecord {
      pubmed_id:        "222".into(),
      title:            "State of things".into(),
      publication_date: "2024-Mar".into(),
      authorship:       classified(&[], &[], ""),
    };
    let line = record.to_string();
    assert_eq!(
      line,
      "[222] State of things (2024-Mar) | Non-academic:  | Companies:  | Email: "
    );
    assert!(!line.contains('\n'));

    let line = PaperRecord::unresolved("333").to_string();
    assert_eq!(line, "[333] (untitled) | Non-academic: NA | Companies: NA | Email: NA");
  }
}

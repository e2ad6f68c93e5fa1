//! Tabular output of paper records.
//!
//! Records are written as comma-separated rows under a fixed six-column header. The header is
//! always written, so an empty result produces a header-only file. List-valued cells join their
//! entries with `"; "`, and records without authorship data carry `NA` in the classification
//! columns.
//!
//! # Examples
//!
//! ```
//! use pubfetch::{output, PaperRecord};
//!
//! let mut buffer = Vec::new();
//! output::write_records(&[PaperRecord::unresolved("111")], &mut buffer).unwrap();
//! let text = String::from_utf8(buffer).unwrap();
//! assert_eq!(text.lines().nth(1), Some("111,,,NA,NA,NA"));
//! ```

use std::{fs::File, io};

use super::*;

/// Column header of the output table.
pub const COLUMNS: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academic Author(s)",
  "Company Affiliation(s)",
  "Corresponding Author Email",
];

/// Write the header and one row per record to `writer`.
pub fn write_records<W: io::Write>(
  records: &[PaperRecord],
  writer: W,
) -> Result<(), PubFetchError> {
  let mut csv = csv::Writer::from_writer(writer);
  csv.write_record(COLUMNS)?;

  for record in records {
    let authors = record.non_academic_authors_cell();
    let affiliations = record.company_affiliations_cell();
    let email = record.email_cell();
    csv.write_record([
      record.pubmed_id.as_str(),
      record.title.as_str(),
      record.publication_date.as_str(),
      authors.as_str(),
      affiliations.as_str(),
      email.as_str(),
    ])?;
  }

  csv.flush()?;
  Ok(())
}

/// Create or overwrite the file at `path` with the records as CSV.
pub fn write_csv(records: &[PaperRecord], path: impl AsRef<Path>) -> Result<(), PubFetchError> {
  let path = path.as_ref();
  debug!("Writing {} records to {}", records.len(), path.display());
  let file = File::create(path)?;
  write_records(records, file)
}

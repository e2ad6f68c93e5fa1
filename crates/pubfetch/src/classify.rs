//! Affiliation classification.
//!
//! An affiliation is treated as industry when its lower-cased text contains any of the
//! configured keywords. This is a heuristic: "corp" also matches "corporation" in an
//! innocuous sentence, and unlisted forms such as "GmbH" are missed unless configured.
//!
//! # Examples
//!
//! ```
//! use pubfetch::Classifier;
//!
//! let classifier = Classifier::default();
//! assert!(classifier.is_industry("Acme PHARMA Inc., Boston"));
//! assert!(!classifier.is_industry("Department of Biology, State University"));
//! ```

use super::*;

/// One author as read from the detail record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorEntry {
  /// Display name, `"<ForeName> <LastName>"`
  pub name:         String,
  /// Declared affiliation strings in document order
  pub affiliations: Vec<String>,
}

/// Result of classifying every author of one paper.
///
/// `non_academic_authors[i]` is the author whose affiliation is `company_affiliations[i]`; an
/// author with several industry affiliations appears once per affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
  /// Names of authors with an industry affiliation, one entry per matching affiliation
  pub non_academic_authors: Vec<String>,
  /// The matching affiliation strings, verbatim
  pub company_affiliations: Vec<String>,
  /// Best-effort corresponding author email, empty when none was found
  pub email:                String,
}

/// Keyword based industry classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
  /// Lower-cased, non-empty keywords
  keywords: Vec<String>,
}

impl Classifier {
  /// Build a classifier from a keyword list. Matching is case-insensitive; empty keywords are
  /// ignored.
  pub fn new<I, S>(keywords: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>, {
    let keywords = keywords
      .into_iter()
      .map(|k| k.as_ref().trim().to_lowercase())
      .filter(|k| !k.is_empty())
      .collect();
    Self { keywords }
  }

  /// Classifier using the keywords from `config`.
  pub fn from_config(config: &Config) -> Self { Self::new(&config.industry_keywords) }

  /// The active keywords, lower-cased.
  pub fn keywords(&self) -> &[String] { &self.keywords }

  /// Whether `affiliation` contains any industry keyword.
  pub fn is_industry(&self, affiliation: &str) -> bool {
    let affiliation = affiliation.to_lowercase();
    self.keywords.iter().any(|keyword| affiliation.contains(keyword.as_str()))
  }

  /// Pair `name` with each of its industry affiliations.
  pub fn classify_author(&self, name: &str, affiliations: &[String]) -> Vec<(String, String)> {
    affiliations
      .iter()
      .filter(|affiliation| self.is_industry(affiliation))
      .map(|affiliation| (name.to_string(), affiliation.clone()))
      .collect()
  }

  /// Classify every author of a paper and pick out the corresponding author email.
  pub fn classify(&self, authors: &[AuthorEntry]) -> Classification {
    let mut classification = Classification::default();
    for author in authors {
      for (name, affiliation) in self.classify_author(&author.name, &author.affiliations) {
        classification.non_academic_authors.push(name);
        classification.company_affiliations.push(affiliation);
      }
    }
    classification.email =
      extract_email(authors.iter().flat_map(|a| a.affiliations.iter().map(String::as_str)));
    classification
  }
}

impl Default for Classifier {
  fn default() -> Self { Self::new(config::DEFAULT_INDUSTRY_KEYWORDS) }
}

/// Take the last whitespace-separated token of the first affiliation containing `@`.
///
/// Only the first such affiliation is looked at, and the token is returned untouched (a
/// trailing period stays). Returns an empty string when no affiliation contains `@`.
pub fn extract_email<'a>(affiliations: impl IntoIterator<Item = &'a str>) -> String {
  affiliations
    .into_iter()
    .find(|affiliation| affiliation.contains('@'))
    .and_then(|affiliation| affiliation.split_whitespace().last())
    .unwrap_or_default()
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn author(name: &str, affiliations: &[&str]) -> AuthorEntry {
    AuthorEntry {
      name:         name.to_string(),
      affiliations: affiliations.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn test_every_default_keyword_matches_case_insensitively() {
    let classifier = Classifier::default();
    for keyword in config::DEFAULT_INDUSTRY_KEYWORDS {
      let lower = format!("Department at {keyword} somewhere");
      let upper = format!("Department at {} somewhere", keyword.to_uppercase());
      assert!(classifier.is_industry(&lower), "{lower}");
      assert!(classifier.is_industry(&upper), "{upper}");
    }
  }

  #[test]
  fn test_academic_affiliations_do_not_match() {
    let classifier = Classifier::default();
    for affiliation in [
      "State University",
      "Department of Oncology, University of Oxford, Oxford, UK.",
      "Karolinska Institutet, Stockholm, Sweden",
      "Max Planck Institute GmbH",
    ] {
      assert!(!classifier.is_industry(affiliation), "{affiliation}");
    }
  }

  #[test]
  fn test_classify_author_keeps_affiliation_verbatim() {
    let classifier = Classifier::default();
    let affiliations = vec![
      "Acme Pharma Inc., contact: a.b@acme.com".to_string(),
      "State University".to_string(),
      "Genentech BIOTECH campus".to_string(),
    ];
    let pairs = classifier.classify_author("Alice Brown", &affiliations);
    assert_eq!(pairs, vec![
      ("Alice Brown".to_string(), "Acme Pharma Inc., contact: a.b@acme.com".to_string()),
      ("Alice Brown".to_string(), "Genentech BIOTECH campus".to_string()),
    ]);
  }

  #[test]
  fn test_classify_aligns_names_and_affiliations() {
    let classifier = Classifier::default();
    let authors = vec![
      author("Alice Brown", &["Acme Pharma Inc.", "Beta Therapeutics"]),
      author("Bob Green", &["State University"]),
      author("Carol White", &[]),
      author("Dan Black", &["Gamma Laboratories, Paris"]),
    ];

    let classification = classifier.classify(&authors);
    assert_eq!(classification.non_academic_authors, vec!["Alice Brown", "Alice Brown", "Dan Black"]);
    assert_eq!(classification.company_affiliations, vec![
      "Acme Pharma Inc.",
      "Beta Therapeutics",
      "Gamma Laboratories, Paris"
    ]);
    assert_eq!(classification.email, "");
  }

  #[test]
  fn test_custom_keywords() {
    let classifier = Classifier::new(["GmbH", " AG ", ""]);
    assert_eq!(classifier.keywords(), ["gmbh", "ag"]);
    assert!(classifier.is_industry("Roche Diagnostics GmbH"));
    assert!(!classifier.is_industry("Acme Pharma Inc."));

    let config = Config { industry_keywords: vec!["Hospital".into()], ..Config::default() };
    assert!(Classifier::from_config(&config).is_industry("General hospital"));
  }

  #[test]
  fn test_extract_email_first_match_last_token() {
    assert_eq!(extract_email(["Acme Pharma Inc., contact: a.b@acme.com"]), "a.b@acme.com");
    assert_eq!(
      extract_email(["State University", "Lab, x@uni.edu and y@uni.edu", "z@corp.com"]),
      "y@uni.edu"
    );
    assert_eq!(extract_email(["Electronic address: jdoe@example.org."]), "jdoe@example.org.");
    assert_eq!(extract_email(["No email here", "Still none"]), "");
    assert_eq!(extract_email(Vec::<&str>::new()), "");
  }

  #[test]
  fn test_classify_email_scans_all_authors_in_order() {
    let classifier = Classifier::default();
    let authors = vec![
      author("Alice Brown", &["State University"]),
      author("Bob Green", &["Clinic, bob@clinic.org", "Acme Corp, bob@acme.com"]),
    ];
    let classification = classifier.classify(&authors);
    assert_eq!(classification.email, "bob@clinic.org");
    assert_eq!(classification.non_academic_authors, vec!["Bob Green"]);
  }
}

//! Client for the EFetch endpoint, the canonical detail path.
//!
//! EFetch returns a `PubmedArticleSet` XML document with the full citation for every requested
//! identifier, including per-author affiliations. The document is read with a streaming
//! [`quick_xml::Reader`] so inline markup inside titles (`<i>`, `<sup>`, ...) and the many
//! elements this crate doesn't care about never get in the way.
//!
//! Fields read per `PubmedArticle`:
//!
//! | field       | path                                                                 |
//! |-------------|----------------------------------------------------------------------|
//! | PMID        | `MedlineCitation/PMID`                                               |
//! | title       | `MedlineCitation/Article/ArticleTitle`                               |
//! | date        | `Article/Journal/JournalIssue/PubDate/{Year,Month,Day,MedlineDate}`  |
//! | author name | `Article/AuthorList/Author/{ForeName,LastName,CollectiveName}`       |
//! | affiliation | `Article/AuthorList/Author/AffiliationInfo/Affiliation`              |

use quick_xml::{events::Event, Reader};

use super::*;
use crate::classify::AuthorEntry;

/// Client for the EFetch endpoint.
pub struct EFetchClient {
  /// Internal web client used to connect to the API.
  client:     reqwest::Client,
  /// Fully resolved `efetch.fcgi` URL.
  endpoint:   Url,
  /// Classifier applied to each article's authors.
  classifier: Classifier,
}

impl EFetchClient {
  /// Creates a client for the base URL, timeout, and industry keywords in `config`.
  pub fn new(config: &Config) -> Result<Self, PubFetchError> {
    Ok(Self {
      client:     config.http_client()?,
      endpoint:   config.endpoint("efetch.fcgi")?,
      classifier: Classifier::from_config(config),
    })
  }

  /// Fetch and classify the full records for `ids` in one batched request.
  ///
  /// The result has one record per identifier, in the order given. Identifiers the response
  /// doesn't contain come back as [`PaperRecord::unresolved`]. An empty `ids` returns
  /// immediately without a request.
  ///
  /// # Errors
  ///
  /// - [`PubFetchError::Network`] if the request fails or returns a non-2xx status
  /// - [`PubFetchError::Xml`] if the body is not well-formed XML
  /// - [`PubFetchError::ApiError`] if the body is not a `PubmedArticleSet`
  pub async fn fetch_records(&self, ids: &[String]) -> Result<Vec<PaperRecord>, PubFetchError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let id_list = ids.join(",");
    let body = get_text(&self.client, &self.endpoint, &[
      ("db", DATABASE),
      ("id", id_list.as_str()),
      ("retmode", "xml"),
    ])
    .await?;

    let records = parse_articles(&body, &self.classifier)?;
    debug!("EFetch parsed {} articles for {} identifiers", records.len(), ids.len());
    Ok(align_to_ids(ids, records))
  }
}

/// Text fields captured from the article XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
  /// `MedlineCitation/PMID`
  Pmid,
  /// `Article/ArticleTitle`
  Title,
  /// `PubDate/Year`
  Year,
  /// `PubDate/Month`
  Month,
  /// `PubDate/Day`
  Day,
  /// `PubDate/MedlineDate`, free text used when Year/Month/Day are absent
  MedlineDate,
  /// `Author/ForeName`
  ForeName,
  /// `Author/LastName`
  LastName,
  /// `Author/CollectiveName`, used for group authors without personal names
  CollectiveName,
  /// `Author/AffiliationInfo/Affiliation`
  Affiliation,
}

impl Field {
  /// The field an element opens, given the element path from the document root.
  fn at(path: &[String]) -> Option<Self> {
    const PUB_DATE: &[&str] = &["Article", "Journal", "JournalIssue", "PubDate"];
    const AUTHOR: &[&str] = &["Article", "AuthorList", "Author"];

    let (last, parent) = path.split_last()?;
    let field = match last.as_str() {
      "PMID" if ends_with(parent, &["PubmedArticle", "MedlineCitation"]) => Field::Pmid,
      "ArticleTitle" if ends_with(parent, &["MedlineCitation", "Article"]) => Field::Title,
      "Year" if ends_with(parent, PUB_DATE) => Field::Year,
      "Month" if ends_with(parent, PUB_DATE) => Field::Month,
      "Day" if ends_with(parent, PUB_DATE) => Field::Day,
      "MedlineDate" if ends_with(parent, PUB_DATE) => Field::MedlineDate,
      "ForeName" if ends_with(parent, AUTHOR) => Field::ForeName,
      "LastName" if ends_with(parent, AUTHOR) => Field::LastName,
      "CollectiveName" if ends_with(parent, AUTHOR) => Field::CollectiveName,
      "Affiliation" if ends_with(parent, &["AuthorList", "Author", "AffiliationInfo"]) =>
        Field::Affiliation,
      _ => return None,
    };
    Some(field)
  }
}

/// Whether the element path ends with `suffix`.
fn ends_with(path: &[String], suffix: &[&str]) -> bool {
  path.len() >= suffix.len()
    && path[path.len() - suffix.len()..]
      .iter()
      .zip(suffix)
      .all(|(name, want)| name.as_str() == *want)
}

/// Author fields collected while inside an `Author` element.
#[derive(Debug, Default)]
struct AuthorBuilder {
  /// Given name
  fore_name:       Option<String>,
  /// Family name
  last_name:       Option<String>,
  /// Group author name
  collective_name: Option<String>,
  /// Non-empty affiliation texts
  affiliations:    Vec<String>,
}

impl AuthorBuilder {
  /// Finish the author; the display name is `"<ForeName> <LastName>"`.
  fn build(self) -> AuthorEntry {
    let name = format!(
      "{} {}",
      self.fore_name.unwrap_or_default(),
      self.last_name.unwrap_or_default()
    )
    .trim()
    .to_string();
    let name = if name.is_empty() { self.collective_name.unwrap_or_default() } else { name };
    AuthorEntry { name, affiliations: self.affiliations }
  }
}

/// Article fields collected while inside a `PubmedArticle` element.
#[derive(Debug, Default)]
struct ArticleBuilder {
  /// PubMed identifier
  pmid:         Option<String>,
  /// First article title
  title:        Option<String>,
  /// Publication year
  year:         Option<String>,
  /// Publication month
  month:        Option<String>,
  /// Publication day
  day:          Option<String>,
  /// Free-text publication date
  medline_date: Option<String>,
  /// Finished authors, in document order
  authors:      Vec<AuthorEntry>,
  /// Author currently being read
  author:       Option<AuthorBuilder>,
}

impl ArticleBuilder {
  /// Store the text of a finished field element.
  fn set(&mut self, field: Field, text: String) {
    /// Keep the first value seen.
    fn first(slot: &mut Option<String>, text: String) {
      if slot.is_none() {
        *slot = Some(text);
      }
    }

    match field {
      Field::Pmid => first(&mut self.pmid, text),
      Field::Title => first(&mut self.title, text),
      Field::Year => first(&mut self.year, text),
      Field::Month => first(&mut self.month, text),
      Field::Day => first(&mut self.day, text),
      Field::MedlineDate => first(&mut self.medline_date, text),
      Field::ForeName | Field::LastName | Field::CollectiveName | Field::Affiliation => {
        let Some(author) = self.author.as_mut() else { return };
        match field {
          Field::ForeName => first(&mut author.fore_name, text),
          Field::LastName => first(&mut author.last_name, text),
          Field::CollectiveName => first(&mut author.collective_name, text),
          _ if !text.is_empty() => author.affiliations.push(text),
          _ => {},
        }
      },
    }
  }

  /// Finish the article. Articles without a PMID can't be matched to a request and are dropped.
  fn build(self, classifier: &Classifier) -> Option<PaperRecord> {
    let Some(pubmed_id) = self.pmid.filter(|id| !id.is_empty()) else {
      warn!("Skipping PubmedArticle without a PMID");
      return None;
    };

    let publication_date =
      match (self.year.as_deref(), self.month.as_deref(), self.day.as_deref()) {
        (None, None, None) => self.medline_date.unwrap_or_default(),
        (year, month, day) => compose_date(year, month, day),
      };

    Some(PaperRecord {
      pubmed_id,
      title: self.title.unwrap_or_default(),
      publication_date,
      authorship: Authorship::Classified(classifier.classify(&self.authors)),
    })
  }
}

/// Parse every `PubmedArticle` in an EFetch document into a classified record, in document
/// order.
pub fn parse_articles(
  xml: &str,
  classifier: &Classifier,
) -> Result<Vec<PaperRecord>, PubFetchError> {
  let mut reader = Reader::from_str(xml);
  let mut path: Vec<String> = Vec::new();
  let mut records = Vec::new();
  let mut article: Option<ArticleBuilder> = None;
  // Field being captured, the path depth of its element, and the text so far.
  let mut capture: Option<(Field, usize, String)> = None;
  let mut saw_article_set = false;

  loop {
    match reader.read_event()? {
      Event::Start(element) => {
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        path.push(name);

        match path.last().map(String::as_str) {
          Some("PubmedArticleSet") if path.len() == 1 => saw_article_set = true,
          Some("PubmedArticle") => article = Some(ArticleBuilder::default()),
          Some("Author") if ends_with(&path, &["Article", "AuthorList", "Author"]) =>
            if let Some(article) = article.as_mut() {
              article.author = Some(AuthorBuilder::default());
            },
          _ => {},
        }

        if capture.is_none() && article.is_some() {
          capture = Field::at(&path).map(|field| (field, path.len(), String::new()));
        }
      },
      Event::End(_) => {
        if let Some((field, depth, text)) = capture.take() {
          if depth == path.len() {
            if let Some(article) = article.as_mut() {
              article.set(field, text.trim().to_string());
            }
          } else {
            capture = Some((field, depth, text));
          }
        }

        match path.pop().as_deref() {
          Some("PubmedArticle") =>
            if let Some(record) = article.take().and_then(|a| a.build(classifier)) {
              records.push(record);
            },
          Some("Author") =>
            if let Some(article) = article.as_mut() {
              if let Some(author) = article.author.take() {
                article.authors.push(author.build());
              }
            },
          _ => {},
        }
      },
      Event::Empty(element) if path.is_empty() =>
        if element.name().as_ref() == b"PubmedArticleSet" {
          saw_article_set = true;
        },
      Event::Text(text) =>
        if let Some((_, _, buffer)) = capture.as_mut() {
          buffer.push_str(&text.unescape()?);
        },
      Event::CData(data) =>
        if let Some((_, _, buffer)) = capture.as_mut() {
          buffer.push_str(&String::from_utf8_lossy(&data.into_inner()));
        },
      Event::Eof => break,
      _ => {},
    }
  }

  if !saw_article_set {
    return Err(PubFetchError::ApiError("EFetch response is not a PubmedArticleSet".into()));
  }
  Ok(records)
}

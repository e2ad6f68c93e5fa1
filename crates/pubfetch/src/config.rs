//! Runtime configuration: where E-utilities lives, how long to wait for it, and which words mark
//! an affiliation as industry.
//!
//! Configuration is read from a TOML file. Every field is optional and falls back to the
//! defaults below, so an empty file is valid:
//!
//! ```toml
//! base_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/"
//! timeout_secs = 30
//! industry_keywords = ["pharma", "biotech", "gmbh"]
//! ```

use super::*;

/// Base URL of the NCBI E-utilities service.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keywords whose presence in an affiliation (case-insensitive) flags it as industry.
pub const DEFAULT_INDUSTRY_KEYWORDS: &[&str] =
  &["pharma", "biotech", "therapeutics", "laboratories", "inc.", "corp", "company", "ltd"];

/// Settings shared by every client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// E-utilities base URL; endpoint names are joined onto it
  pub base_url:          String,
  /// Timeout applied to every outbound request
  pub timeout_secs:      u64,
  /// Industry keywords used by the [`Classifier`](crate::Classifier)
  pub industry_keywords: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url:          DEFAULT_BASE_URL.to_string(),
      timeout_secs:      DEFAULT_TIMEOUT_SECS,
      industry_keywords: DEFAULT_INDUSTRY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    }
  }
}

impl Config {
  /// Default config location in the user's config directory.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("pubfetch").join("config.toml")
  }

  /// Load configuration.
  ///
  /// An explicit `path` must exist. Without one, [`Config::default_path`] is read when present
  /// and the built-in defaults are used otherwise.
  pub fn load(path: Option<&Path>) -> Result<Self, PubFetchError> {
    let path = match path {
      Some(path) => path.to_path_buf(),
      None => {
        let path = Self::default_path();
        if !path.exists() {
          debug!("No config file at {}, using defaults", path.display());
          return Ok(Self::default());
        }
        path
      },
    };

    debug!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(&path)?;
    Self::from_toml(&text)
  }

  /// Parse configuration from TOML text.
  pub fn from_toml(text: &str) -> Result<Self, PubFetchError> { Ok(toml::from_str(text)?) }

  /// Resolve an E-utilities endpoint (e.g. `esearch.fcgi`) against the base URL.
  pub fn endpoint(&self, name: &str) -> Result<Url, PubFetchError> {
    let mut base = self.base_url.clone();
    if !base.ends_with('/') {
      base.push('/');
    }
    Ok(Url::parse(&base)?.join(name)?)
  }

  /// Build the HTTP client every E-utilities client shares settings with.
  pub(crate) fn http_client(&self) -> Result<reqwest::Client, PubFetchError> {
    Ok(
      reqwest::Client::builder()
        .user_agent(concat!("pubfetch/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(self.timeout_secs))
        .build()?,
    )
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.industry_keywords.len(), 8);
    assert!(config.industry_keywords.contains(&"inc.".to_string()));
  }

  #[test]
  fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(r#"industry_keywords = ["GmbH", "AG"]"#).unwrap();
    assert_eq!(config.industry_keywords, vec!["GmbH", "AG"]);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

    assert_eq!(Config::from_toml("").unwrap(), Config::default());
  }

  #[test]
  fn test_invalid_toml() {
    let err = Config::from_toml("timeout_secs = \"soon\"").unwrap_err();
    assert!(matches!(err, PubFetchError::Config(_)));
  }

  #[test]
  fn test_load_explicit_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "base_url = \"http://localhost:9999\"\ntimeout_secs = 5\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.base_url, "http://localhost:9999");
    assert_eq!(config.timeout_secs, 5);

    let missing = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
    assert!(matches!(missing, PubFetchError::Path(_)));
  }

  #[test]
  fn test_endpoint_join() {
    let config = Config { base_url: "http://localhost:1234/eutils".into(), ..Config::default() };
    assert_eq!(
      config.endpoint("esearch.fcgi").unwrap().as_str(),
      "http://localhost:1234/eutils/esearch.fcgi"
    );

    let config = Config::default();
    assert_eq!(
      config.endpoint("efetch.fcgi").unwrap().as_str(),
      "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi"
    );

    let config = Config { base_url: "not a url".into(), ..Config::default() };
    assert!(matches!(config.endpoint("efetch.fcgi"), Err(PubFetchError::InvalidUrl(_))));
  }
}

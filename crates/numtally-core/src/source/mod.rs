//! Text sources: where the pipeline gets the text it scans.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpSource;

use std::future::Future;
use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Something that can produce the text to scan.
pub trait TextSource {
    /// Retrieve the full text.
    fn fetch_text(&self) -> impl Future<Output = Result<String>> + Send;

    /// Short human-readable name used in reports, e.g. `script.js`.
    fn describe(&self) -> String;
}

/// A fixed string.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
    label: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: "input".to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl TextSource for StaticSource {
    async fn fetch_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// A file on local disk. Invalid UTF-8 is replaced rather than rejected.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileSource {
    async fn fetch_text(&self) -> Result<String> {
        debug!("Reading {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Parse an address, accepting only http and https.
pub fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Last non-empty path segment of a URL, falling back to the host.
pub fn resource_label(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "input".to_string())
}

/// Label for a raw address, even one `parse_url` would reject.
pub fn label_for(raw: &str) -> String {
    Url::parse(raw)
        .map(|url| resource_label(&url))
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_resource_label() {
        let url = parse_url("https://sanand0.github.io/tdsdata/js_table/script.js").unwrap();
        assert_eq!(resource_label(&url), "script.js");

        let url = parse_url("https://sanand0.github.io/tdsdata/js_table/?seed=23").unwrap();
        assert_eq!(resource_label(&url), "js_table");

        let url = parse_url("http://example.com/").unwrap();
        assert_eq!(resource_label(&url), "example.com");
    }

    #[test]
    fn test_label_for_unsupported_scheme() {
        assert_eq!(label_for("ftp://example.com/data/script.js"), "script.js");
        assert_eq!(label_for("nonsense"), "nonsense");
    }

    #[test]
    fn test_parse_url_rejects_other_schemes() {
        assert!(matches!(
            parse_url("ftp://example.com/script.js"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(parse_url("not a url"), Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new("a 1 b 2").with_label("inline");
        assert_eq!(source.fetch_text().await.unwrap(), "a 1 b 2");
        assert_eq!(source.describe(), "inline");
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
        write!(file, "var x = 42;").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.fetch_text().await.unwrap(), "var x = 42;");
        assert!(source.describe().ends_with(".js"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.js"));
        assert!(matches!(source.fetch_text().await, Err(FetchError::Io { .. })));
    }
}

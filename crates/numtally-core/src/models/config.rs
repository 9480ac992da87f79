//! Configuration structures for the fetch/extract/report pipeline.

use serde::{Deserialize, Serialize};

use crate::error::NumtallyError;

/// Page that links the script.
pub const BASE_PAGE_URL: &str = "https://sanand0.github.io/tdsdata/js_table/?seed=23";

/// Script fetched by default.
pub const SCRIPT_URL: &str = "https://sanand0.github.io/tdsdata/js_table/script.js";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 15.0;

/// Default number of characters shown in the preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 1200;

/// Main configuration for numtally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumtallyConfig {
    /// Where the text comes from.
    pub source: SourceConfig,

    /// Token extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report rendering configuration.
    pub report: ReportConfig,
}

/// Text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Address of the script to download.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout_secs: f64,

    /// User agent sent with the request.
    pub user_agent: String,

    /// Honor proxy settings from the environment.
    pub system_proxy: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: SCRIPT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("numtally/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        }
    }
}

/// Token extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Thousands separator stripped before parsing.
    pub grouping_separator: char,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of characters of source text to preview.
    pub preview_chars: usize,

    /// Print the preview block at all.
    pub show_preview: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
            show_preview: true,
        }
    }
}

impl NumtallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.source.timeout_secs.is_finite() || self.source.timeout_secs <= 0.0 {
            return Err(NumtallyError::Config(format!(
                "timeout_secs must be a positive number, got {}",
                self.source.timeout_secs
            )));
        }
        crate::extract::check_separator(self.extraction.grouping_separator)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_point_at_script() {
        let config = NumtallyConfig::default();
        assert_eq!(config.source.url, SCRIPT_URL);
        assert_eq!(config.source.timeout_secs, 15.0);
        assert_eq!(config.extraction.grouping_separator, ',');
        assert_eq!(config.report.preview_chars, 1200);
        assert!(config.report.show_preview);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"report": {"preview_chars": 80}}"#).unwrap();

        let config = NumtallyConfig::from_file(&path).unwrap();
        assert_eq!(config.report.preview_chars, 80);
        assert_eq!(config.source.url, SCRIPT_URL);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = NumtallyConfig::default();
        config.extraction.grouping_separator = '_';
        config.save(&path).unwrap();

        let loaded = NumtallyConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.grouping_separator, '_');
    }

    #[test]
    fn test_source_section_keys() {
        let json = serde_json::to_value(NumtallyConfig::default()).unwrap();
        let mut keys: Vec<&str> = json["source"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["system_proxy", "timeout_secs", "url", "user_agent"]);
    }

    #[test]
    fn test_older_file_with_extra_keys_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, format!(r#"{{"source": {{"base_page": "{BASE_PAGE_URL}"}}}}"#))
            .unwrap();

        let config = NumtallyConfig::from_file(&path).unwrap();
        assert_eq!(config.source.url, SCRIPT_URL);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = NumtallyConfig::default();
        config.source.timeout_secs = 0.0;
        assert!(matches!(config.validate(), Err(NumtallyError::Config(_))));

        let mut config = NumtallyConfig::default();
        config.extraction.grouping_separator = '.';
        assert!(matches!(config.validate(), Err(NumtallyError::Config(_))));
    }
}

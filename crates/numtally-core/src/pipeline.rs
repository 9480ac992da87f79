//! Fetch, extract, aggregate.

use tracing::{debug, info};

use crate::error::FetchError;
use crate::extract::NumberExtractor;
use crate::models::report::{Aggregate, Outcome, Report};
use crate::report::preview;
use crate::source::TextSource;

/// Fetch text from `source` and analyze it.
///
/// A fetch failure ends the run; the caller decides how to show it.
pub async fn run<S: TextSource>(
    source: &S,
    extractor: &NumberExtractor,
    preview_chars: usize,
) -> Result<Report, FetchError> {
    let resource = source.describe();
    let text = source.fetch_text().await?;
    info!("Fetched {} ({} characters)", resource, text.chars().count());
    Ok(analyze(&resource, &text, extractor, preview_chars))
}

/// Extract and aggregate numbers from text that is already in hand.
pub fn analyze(
    resource: &str,
    text: &str,
    extractor: &NumberExtractor,
    preview_chars: usize,
) -> Report {
    let tokens = extractor.extract_all(text);
    debug!("Extracted {} numeric tokens", tokens.len());

    let values: Vec<f64> = tokens.iter().map(|t| t.value).collect();
    let outcome = match Aggregate::from_values(&values) {
        Some(aggregate) => Outcome::Found { tokens, aggregate },
        None => Outcome::Empty,
    };

    Report {
        resource: resource.to_string(),
        preview: preview(text, preview_chars).to_string(),
        preview_chars,
        outcome,
    }
}

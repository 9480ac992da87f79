//! Sum command - fetch the script, extract numbers, print the report.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use numtally_core::models::config::NumtallyConfig;
use numtally_core::report::{to_json, write_failure, write_text};
use numtally_core::source::label_for;
use numtally_core::{FileSource, HttpSource, NumberExtractor, Report, TextSource, pipeline};

use super::config::{default_config_path, load_or_default};

/// Arguments for the sum command.
#[derive(Args, Default)]
pub struct SumArgs {
    /// Script URL to download
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read a local file instead of downloading
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<f64>,

    /// Number of characters to preview
    #[arg(long)]
    preview_chars: Option<usize>,

    /// Skip the preview block
    #[arg(long)]
    no_preview: bool,

    /// Thousands separator stripped before parsing
    #[arg(short, long)]
    separator: Option<char>,

    /// Ignore proxy settings from the environment
    #[arg(long)]
    no_proxy: bool,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Preview plus count and sum
    #[default]
    Text,
    /// JSON summary with every token
    Json,
    /// One CSV row per token
    Csv,
}

pub async fn run(args: SumArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = resolve_config(&args, config_path)?;
    let extractor = NumberExtractor::with_separator(config.extraction.grouping_separator)?;

    let result = match &args.file {
        Some(path) => execute(&FileSource::new(path), &extractor, &config).await,
        None => match HttpSource::from_config(&config.source) {
            Ok(source) => execute(&source, &extractor, &config).await,
            Err(e) => Err((label_for(&config.source.url), e)),
        },
    };

    let mut stdout = io::stdout().lock();
    match result {
        Ok(report) => write_report(&report, &config, args.format, &mut stdout)?,
        Err((resource, e)) => {
            warn!("Fetch failed: {}", e);
            write_failure(&resource, &e, &mut stdout)?;
        }
    }
    stdout.flush()?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Merge the config file with command-line overrides.
fn resolve_config(args: &SumArgs, config_path: Option<&str>) -> anyhow::Result<NumtallyConfig> {
    let mut config = match config_path {
        Some(path) => NumtallyConfig::from_file(Path::new(path))?,
        None => load_or_default(&default_config_path())?,
    };

    if let Some(url) = &args.url {
        config.source.url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.source.timeout_secs = timeout;
    }
    if args.no_proxy {
        config.source.system_proxy = false;
    }
    if let Some(separator) = args.separator {
        config.extraction.grouping_separator = separator;
    }
    if let Some(preview_chars) = args.preview_chars {
        config.report.preview_chars = preview_chars;
    }
    if args.no_preview {
        config.report.show_preview = false;
    }

    config.validate()?;
    Ok(config)
}

async fn execute<S: TextSource>(
    source: &S,
    extractor: &NumberExtractor,
    config: &NumtallyConfig,
) -> Result<Report, (String, numtally_core::FetchError)> {
    let resource = source.describe();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Fetching {}...", resource));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline::run(source, extractor, config.report.preview_chars).await;
    pb.finish_and_clear();

    result.map_err(|e| (resource, e))
}

fn write_report<W: Write>(
    report: &Report,
    config: &NumtallyConfig,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => write_text(report, config.report.show_preview, out)?,
        OutputFormat::Json => writeln!(out, "{}", to_json(report)?)?,
        OutputFormat::Csv => out.write_all(format_csv(report)?.as_bytes())?,
    }
    Ok(())
}

fn format_csv(report: &Report) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["index", "start", "end", "source", "value"])?;

    for (i, token) in report.tokens().iter().enumerate() {
        wtr.write_record([
            &i.to_string(),
            &token.start.to_string(),
            &token.end.to_string(),
            &token.source,
            &token.value.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use numtally_core::pipeline::analyze;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_csv() {
        let report = analyze("script.js", "a 1,234 b -2.5", &NumberExtractor::new(), 1200);
        let csv = format_csv(&report).unwrap();
        assert_eq!(
            csv,
            "index,start,end,source,value\n0,2,7,\"1,234\",1234\n1,10,14,-2.5,-2.5\n"
        );
    }

    #[test]
    fn test_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        NumtallyConfig::default().save(&path).unwrap();

        let args = SumArgs {
            url: Some("http://127.0.0.1:1/data.js".to_string()),
            timeout: Some(3.0),
            separator: Some('_'),
            no_preview: true,
            ..SumArgs::default()
        };
        let config = resolve_config(&args, path.to_str()).unwrap();
        assert_eq!(config.source.url, "http://127.0.0.1:1/data.js");
        assert_eq!(config.source.timeout_secs, 3.0);
        assert_eq!(config.extraction.grouping_separator, '_');
        assert!(!config.report.show_preview);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        NumtallyConfig::default().save(&path).unwrap();

        let args = SumArgs {
            timeout: Some(-1.0),
            ..SumArgs::default()
        };
        assert!(resolve_config(&args, path.to_str()).is_err());
    }
}

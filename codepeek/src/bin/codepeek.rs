//! Command-line preview of code-related links.
//!
//! ```text
//! codepeek [--config FILE] [--settings FILE] [--page FILE] [URL...]
//! ```
//!
//! Each URL is fetched and its preview printed as one JSON line, together
//! with the collapsed view a result card would show first. With
//! `--page`, a saved search-results page is scanned for candidate links
//! first.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codepeek::pipeline::SnippetView;
use codepeek::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "codepeek", version, about = "Preview code snippets behind search result links")]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "CODEPEEK_CONFIG")]
    config: Option<PathBuf>,

    /// Persisted user settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Saved search-results page to scan for candidate links
    #[arg(long)]
    page: Option<PathBuf>,

    /// Links to preview
    #[arg(required_unless_present = "page")]
    urls: Vec<String>,
}

#[derive(Serialize)]
struct PreviewLine<'a> {
    #[serde(flatten)]
    preview: &'a Preview,
    collapsed: SnippetView,
}

/// Prints every rendered preview as a JSON line, with its collapsed view.
struct StdoutTarget {
    page: PageConfig,
}

impl PreviewTarget for StdoutTarget {
    fn is_attached(&self) -> bool {
        true
    }

    fn render(&self, preview: &Preview) {
        let line = PreviewLine {
            preview,
            collapsed: preview.collapsed_view(&self.page),
        };
        match serde_json::to_string(&line) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "Could not serialize preview"),
        }
    }

    fn discard(&self) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("codepeek=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CodepeekConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CodepeekConfig::default(),
    };
    let settings = cli.settings.as_ref().map(Settings::load).unwrap_or_default();

    let pipeline = PreviewPipeline::from_config(&config)
        .await?
        .with_settings(settings)
        .with_event_sink(Arc::new(LoggingEventSink::default()));

    let mut candidates = Vec::new();
    if let Some(path) = &cli.page {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("reading results page {}", path.display()))?;
        candidates.extend(scan_page(&html, &config, pipeline.classifier())?);
    }
    for url in &cli.urls {
        match CandidateLink::parse(url) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => tracing::warn!(url = %url, error = %e, "Skipping argument"),
        }
    }

    let session = PreviewSession::new();
    let target: Arc<dyn PreviewTarget> = Arc::new(StdoutTarget {
        page: config.page.clone(),
    });
    let outcomes = pipeline
        .process_page(
            &session,
            candidates
                .into_iter()
                .map(|candidate| (candidate, Arc::clone(&target)))
                .collect(),
        )
        .await;

    for (candidate, outcome) in &outcomes {
        if !outcome.is_rendered() {
            tracing::info!(url = %candidate, outcome = ?outcome, "No preview");
        }
    }
    Ok(())
}

#[cfg(feature = "discovery")]
fn scan_page(
    html: &str,
    config: &CodepeekConfig,
    classifier: &UrlClassifier,
) -> anyhow::Result<Vec<CandidateLink>> {
    let scanner = SearchPageScanner::new(&config.page)?;
    Ok(scanner.candidates(html, classifier))
}

#[cfg(not(feature = "discovery"))]
fn scan_page(
    _html: &str,
    _config: &CodepeekConfig,
    _classifier: &UrlClassifier,
) -> anyhow::Result<Vec<CandidateLink>> {
    anyhow::bail!("--page requires the \"discovery\" feature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_urls_or_page_required() {
        assert!(Cli::try_parse_from(["codepeek"]).is_err());

        let cli = Cli::try_parse_from(["codepeek", "--page", "results.html"]).unwrap();
        assert!(cli.urls.is_empty());

        let cli = Cli::try_parse_from([
            "codepeek",
            "--settings",
            "settings.json",
            "https://stackoverflow.com/questions/1",
        ])
        .unwrap();
        assert_eq!(cli.urls, vec!["https://stackoverflow.com/questions/1"]);
        assert_eq!(cli.settings, Some(PathBuf::from("settings.json")));
    }
}

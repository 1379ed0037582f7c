//! Search-results page scanning.
//!
//! Finds the outbound link of each organic result so the pipeline can be
//! fed without a browser. Result containers are located by trying the
//! configured selectors in order; the first selector that matches anything
//! wins, since search engines rename their markup from time to time.

use scraper::{Html, Selector};

use crate::classifier::UrlClassifier;
use crate::config::PageConfig;
use crate::errors::{CodepeekError, Result};
use crate::pipeline::CandidateLink;

const RESULT_LINK: &str = r#"a[href^="http"]"#;

/// Extracts result links from a search-results page.
#[derive(Debug)]
pub struct SearchPageScanner {
    containers: Vec<Selector>,
    link: Selector,
}

impl SearchPageScanner {
    /// Compiles the configured result selectors.
    pub fn new(config: &PageConfig) -> Result<Self> {
        let containers = config
            .result_selectors
            .iter()
            .map(|source| parse_selector(source))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            containers,
            link: parse_selector(RESULT_LINK)?,
        })
    }

    /// Returns the first absolute link of every result, in page order.
    #[must_use]
    pub fn scan(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        for container in &self.containers {
            let results: Vec<_> = document.select(container).collect();
            if results.is_empty() {
                continue;
            }

            tracing::debug!(results = results.len(), "Found search results");
            return results
                .into_iter()
                .filter_map(|result| result.select(&self.link).next())
                .filter_map(|anchor| anchor.value().attr("href"))
                .map(str::to_string)
                .collect();
        }

        tracing::debug!("No search results found");
        Vec::new()
    }

    /// Scans the page and keeps the code-related links.
    ///
    /// Links that do not parse as absolute http(s) URLs are dropped.
    #[must_use]
    pub fn candidates(&self, html: &str, classifier: &UrlClassifier) -> Vec<CandidateLink> {
        self.scan(html)
            .into_iter()
            .filter(|href| classifier.is_code_url(href))
            .filter_map(|href| match CandidateLink::parse(&href) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::trace!(href = %href, error = %e, "Skipping result link");
                    None
                }
            })
            .collect()
    }
}

fn parse_selector(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|e| CodepeekError::selector(source, e.to_string()))
}

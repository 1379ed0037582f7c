//! The per-candidate preview pipeline.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::candidate::CandidateLink;
use super::preview::{content_fingerprint, Preview};
use super::session::PreviewSession;
use crate::classifier::UrlClassifier;
use crate::config::{CodepeekConfig, PageConfig, Settings};
use crate::errors::Result;
use crate::events::{event_types, EventSink, EventSinkFetchObserver, NoOpEventSink};
use crate::extract::{AnswerExtractor, AnswerLinkExtractor};
use crate::fetch::FetchResolver;
use crate::language::LanguageDetector;
use crate::normalize::SnippetNormalizer;

/// Where a preview goes. Implemented by the renderer.
pub trait PreviewTarget: Send + Sync {
    /// Whether the insertion point still exists.
    fn is_attached(&self) -> bool;

    /// Shows the preview.
    fn render(&self, preview: &Preview);

    /// Removes any placeholder (loading indicator) for this candidate.
    fn discard(&self);
}

/// Why a candidate ended without a preview, when that is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Previews are switched off.
    Disabled,
    /// The link is not code-related.
    NotCodeUrl,
    /// The link was already processed in this session.
    DuplicateUrl,
    /// The page has no usable code.
    NoCode,
    /// An identical snippet is already shown.
    DuplicateContent,
    /// The target went away before rendering.
    Detached,
}

impl SkipReason {
    /// Returns the reason name used in events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::NotCodeUrl => "not_code_url",
            Self::DuplicateUrl => "duplicate_url",
            Self::NoCode => "no_code",
            Self::DuplicateContent => "duplicate_content",
            Self::Detached => "detached",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one candidate ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PreviewOutcome {
    /// The preview was rendered.
    Rendered {
        /// The rendered preview.
        preview: Preview,
    },
    /// Nothing to show.
    Skipped {
        /// Why.
        reason: SkipReason,
    },
    /// Every fetch strategy failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl PreviewOutcome {
    /// Returns true if a preview was rendered.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// The rendered preview, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        match self {
            Self::Rendered { preview } => Some(preview),
            _ => None,
        }
    }

    /// The skip reason, if skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// Fetch, extract, normalize and detect for candidate links.
pub struct PreviewPipeline {
    resolver: FetchResolver,
    classifier: UrlClassifier,
    extractor: AnswerExtractor,
    links: AnswerLinkExtractor,
    normalizer: SnippetNormalizer,
    settings: Settings,
    page: PageConfig,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for PreviewPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewPipeline")
            .field("resolver", &self.resolver)
            .field("extractor", &self.extractor)
            .field("settings", &self.settings)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

impl PreviewPipeline {
    /// Creates a pipeline around a resolver.
    #[must_use]
    pub fn new(resolver: FetchResolver, config: &CodepeekConfig) -> Self {
        Self {
            resolver,
            classifier: UrlClassifier::default(),
            extractor: AnswerExtractor::new(&config.extraction),
            links: AnswerLinkExtractor::default(),
            normalizer: SnippetNormalizer::new(LanguageDetector::new(&config.detection)),
            settings: Settings::default(),
            page: config.page.clone(),
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Builds the HTTP-backed pipeline: remote proxy lookup, `reqwest`
    /// transport and a background privileged worker.
    #[cfg(feature = "http")]
    pub async fn from_config(config: &CodepeekConfig) -> Result<Self> {
        use crate::fetch::{load_proxy_config, BackgroundFetchService, HttpFetcher};

        let fetcher: Arc<dyn crate::fetch::Fetcher> = Arc::new(HttpFetcher::new(&config.fetch)?);
        let mut resolver = FetchResolver::new(Arc::clone(&fetcher), &config.fetch);

        if let Some(config_url) = &config.fetch.proxy_config_url {
            let proxy = load_proxy_config(fetcher.as_ref(), config_url).await;
            resolver = resolver.with_primary_proxy(Some(proxy));
        }

        let (privileged, _worker) = BackgroundFetchService::new(fetcher).spawn(config.page.max_concurrent);
        Ok(Self::new(resolver.with_privileged(Arc::new(privileged)), config))
    }

    /// Replaces the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: UrlClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replaces the answer extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: AnswerExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Applies user settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the event sink. Fetch attempts are reported to it as well.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.resolver = self
            .resolver
            .with_observer(Arc::new(EventSinkFetchObserver::new(Arc::clone(&sink))));
        self.sink = sink;
        self
    }

    /// The page configuration in use.
    #[must_use]
    pub fn page_config(&self) -> &PageConfig {
        &self.page
    }

    /// The classifier in use.
    #[must_use]
    pub fn classifier(&self) -> &UrlClassifier {
        &self.classifier
    }

    /// Fetches a page and builds its preview, with no dedup or rendering.
    ///
    /// `Ok(None)` means the page has no usable code.
    pub async fn preview(&self, url: &str) -> Result<Option<Preview>> {
        let html = self.resolver.resolve(url).await?;
        Ok(self.build_preview(crate::fetch::strip_fragment(url), &html))
    }

    /// Builds a preview from already fetched HTML.
    #[must_use]
    pub fn build_preview(&self, source_url: &str, html: &str) -> Option<Preview> {
        let fragment = self.extractor.extract(html)?;
        let snippet = self.normalizer.normalize(&fragment);
        if snippet.is_empty() {
            return None;
        }

        Some(Preview {
            source_url: source_url.to_string(),
            fingerprint: content_fingerprint(&snippet.text, self.page.fingerprint_chars),
            answer_url: self.links.extract(html),
            language: snippet.language,
            confidence: snippet.confidence,
            html_as_code: snippet.html_as_code,
            snippet: snippet.text,
        })
    }

    /// Runs one candidate end to end.
    ///
    /// The URL is claimed before the first await. Every path that does not
    /// render calls [`PreviewTarget::discard`].
    pub async fn process(
        &self,
        session: &PreviewSession,
        candidate: &CandidateLink,
        target: &dyn PreviewTarget,
    ) -> PreviewOutcome {
        let url = candidate.normalized_url();
        self.sink.emit(
            event_types::PREVIEW_STARTED,
            Some(serde_json::json!({"url": url, "session": session.id().to_string()})),
        );

        if !self.settings.enabled {
            return self.skip(url, target, SkipReason::Disabled);
        }
        if !self.classifier.is_code_url(candidate.absolute_url()) {
            return self.skip(url, target, SkipReason::NotCodeUrl);
        }
        if !session.claim_url(url) {
            return self.skip(url, target, SkipReason::DuplicateUrl);
        }

        let html = match self.resolver.resolve(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Preview fetch failed");
                target.discard();
                self.sink.emit(
                    event_types::PREVIEW_FAILED,
                    Some(serde_json::json!({"url": url, "error": e.to_dict()})),
                );
                return PreviewOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let Some(preview) = self.build_preview(url, &html) else {
            return self.skip(url, target, SkipReason::NoCode);
        };
        if !target.is_attached() {
            return self.skip(url, target, SkipReason::Detached);
        }
        if !session.claim_fingerprint(&preview.fingerprint) {
            return self.skip(url, target, SkipReason::DuplicateContent);
        }

        target.render(&preview);
        tracing::debug!(url = %url, language = %preview.language, "Preview rendered");
        self.sink.emit(
            event_types::PREVIEW_RENDERED,
            Some(serde_json::json!({
                "url": url,
                "language": preview.language,
                "answer_url": preview.answer_url,
                "lines": preview.snippet.lines().count(),
            })),
        );
        PreviewOutcome::Rendered { preview }
    }

    /// Runs many candidates concurrently, at most `max_concurrent` at a time.
    ///
    /// Results arrive in completion order. One candidate's failure never
    /// affects another.
    pub async fn process_page(
        &self,
        session: &PreviewSession,
        candidates: Vec<(CandidateLink, Arc<dyn PreviewTarget>)>,
    ) -> Vec<(CandidateLink, PreviewOutcome)> {
        let limit = self.page.max_concurrent.max(1);
        tracing::debug!(candidates = candidates.len(), limit, "Processing results page");

        stream::iter(candidates)
            .map(|(candidate, target)| async move {
                let outcome = self.process(session, &candidate, target.as_ref()).await;
                (candidate, outcome)
            })
            .buffer_unordered(limit)
            .collect()
            .await
    }

    fn skip(&self, url: &str, target: &dyn PreviewTarget, reason: SkipReason) -> PreviewOutcome {
        target.discard();
        tracing::trace!(url = %url, reason = %reason, "Preview skipped");
        self.sink.emit(
            event_types::PREVIEW_SKIPPED,
            Some(serde_json::json!({"url": url, "reason": reason.as_str()})),
        );
        PreviewOutcome::Skipped { reason }
    }
}

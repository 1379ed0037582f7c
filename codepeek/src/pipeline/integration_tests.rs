//! End-to-end tests of the preview pipeline against stub fetchers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::{CodepeekConfig, FetchConfig, PageConfig, Settings};
    use crate::events::{event_types, CollectingEventSink};
    use crate::fetch::{Fetcher, FetchResolver};
    use crate::language::Language;
    use crate::pipeline::{
        CandidateLink, PreviewOutcome, PreviewPipeline, PreviewSession, PreviewTarget, SkipReason,
    };
    use crate::testing::fixtures::{
        BLOG_POST_PAGE, GITHUB_ISSUE_PAGE, NO_CODE_PAGE, STACK_OVERFLOW_ANSWER_PAGE,
    };
    use crate::testing::{
        assert_failed, assert_language, assert_rendered, assert_skipped, FailingFetcher,
        RecordingTarget, StaticFetcher, StaticPrivilegedFetcher,
    };

    const SO_URL: &str = "https://stackoverflow.com/questions/4743730/how-do-i-print";
    const GITHUB_URL: &str = "https://github.com/example/tool/issues/1234";
    const BLOG_URL: &str = "https://myblog.dev/blog/reading-files";

    fn direct_only_config() -> CodepeekConfig {
        CodepeekConfig::new().with_fetch(FetchConfig {
            primary_proxy: None,
            fallback_proxies: Vec::new(),
            ..FetchConfig::default()
        })
    }

    fn pipeline_with(fetcher: Arc<dyn Fetcher>, config: &CodepeekConfig) -> PreviewPipeline {
        PreviewPipeline::new(FetchResolver::new(fetcher, &config.fetch), config)
    }

    fn candidate(url: &str) -> CandidateLink {
        CandidateLink::parse(url).unwrap()
    }

    fn outcome_for<'a>(results: &'a [(CandidateLink, PreviewOutcome)], url: &str) -> &'a PreviewOutcome {
        &results
            .iter()
            .find(|(c, _)| c.normalized_url() == url)
            .unwrap()
            .1
    }

    #[tokio::test]
    async fn test_stack_overflow_answer_end_to_end() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let pipeline = pipeline_with(fetcher, &direct_only_config());
        let session = PreviewSession::new();
        let target = RecordingTarget::new();

        let outcome = pipeline
            .process(&session, &candidate(&format!("{SO_URL}#answer-1")), &target)
            .await;

        let preview = assert_rendered(&outcome);
        assert!(preview.snippet.contains("console.log(\"hi\");"));
        assert_eq!(preview.language, Language::Javascript);
        assert_eq!(preview.source_url, SO_URL);
        assert_eq!(
            preview.answer_url.as_deref(),
            Some("https://stackoverflow.com/questions/4743730")
        );
        assert_eq!(target.rendered().len(), 1);
        assert_eq!(target.discard_count(), 0);
    }

    #[tokio::test]
    async fn test_github_comment_and_generic_blog() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(GITHUB_URL, GITHUB_ISSUE_PAGE)
                .with_page(BLOG_URL, BLOG_POST_PAGE),
        );
        let pipeline = pipeline_with(fetcher, &direct_only_config());
        let session = PreviewSession::new();

        let github = pipeline
            .process(&session, &candidate(GITHUB_URL), &RecordingTarget::new())
            .await;
        let preview = assert_rendered(&github);
        assert!(preview.snippet.contains("cargo build --release"));
        assert_eq!(preview.answer_url.as_deref(), Some(GITHUB_URL));

        let blog = pipeline
            .process(&session, &candidate(BLOG_URL), &RecordingTarget::new())
            .await;
        assert_language(&blog, Language::Python);
        assert!(blog.preview().unwrap().snippet.contains("def read_all(path):"));
    }

    #[tokio::test]
    async fn test_same_url_fetched_once_per_session() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let pipeline = pipeline_with(fetcher.clone(), &direct_only_config());
        let session = PreviewSession::new();

        let first = pipeline
            .process(&session, &candidate(SO_URL), &RecordingTarget::new())
            .await;
        let second_target = RecordingTarget::new();
        let second = pipeline
            .process(&session, &candidate(&format!("{SO_URL}#top")), &second_target)
            .await;

        assert!(first.is_rendered());
        assert_skipped(&second, SkipReason::DuplicateUrl);
        assert_eq!(second_target.discard_count(), 1);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_identical_snippet_rendered_once() {
        let other = "https://stackoverflow.com/questions/1/duplicate-question";
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE)
                .with_page(other, STACK_OVERFLOW_ANSWER_PAGE),
        );
        let pipeline = pipeline_with(fetcher.clone(), &direct_only_config());
        let session = PreviewSession::new();

        let first = pipeline
            .process(&session, &candidate(SO_URL), &RecordingTarget::new())
            .await;
        let second = pipeline
            .process(&session, &candidate(other), &RecordingTarget::new())
            .await;

        assert!(first.is_rendered());
        assert_skipped(&second, SkipReason::DuplicateContent);
        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(session.fingerprint_count(), 1);
    }

    #[tokio::test]
    async fn test_detached_target_never_rendered() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let pipeline = pipeline_with(fetcher, &direct_only_config());
        let session = PreviewSession::new();
        let target = RecordingTarget::detached();

        let outcome = pipeline.process(&session, &candidate(SO_URL), &target).await;

        assert_skipped(&outcome, SkipReason::Detached);
        assert!(target.rendered().is_empty());
        assert_eq!(target.discard_count(), 1);
        // A detached render must not consume the fingerprint.
        assert_eq!(session.fingerprint_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_settings_skip_without_fetching() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let pipeline = pipeline_with(fetcher.clone(), &direct_only_config()).with_settings(Settings {
            enabled: false,
            ..Settings::default()
        });

        let outcome = pipeline
            .process(&PreviewSession::new(), &candidate(SO_URL), &RecordingTarget::new())
            .await;

        assert_skipped(&outcome, SkipReason::Disabled);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_code_url_is_ignored() {
        let fetcher = Arc::new(StaticFetcher::new());
        let pipeline = pipeline_with(fetcher.clone(), &direct_only_config());
        let session = PreviewSession::new();

        let outcome = pipeline
            .process(&session, &candidate("https://www.bbc.co.uk/news"), &RecordingTarget::new())
            .await;

        assert_skipped(&outcome, SkipReason::NotCodeUrl);
        assert_eq!(fetcher.call_count(), 0);
        assert_eq!(session.url_count(), 0);
    }

    #[tokio::test]
    async fn test_page_without_code() {
        let url = "https://stackoverflow.com/questions/2/recipes";
        let fetcher = Arc::new(StaticFetcher::new().with_page(url, NO_CODE_PAGE));
        let pipeline = pipeline_with(fetcher, &direct_only_config());
        let target = RecordingTarget::new();

        let outcome = pipeline
            .process(&PreviewSession::new(), &candidate(url), &target)
            .await;

        assert_skipped(&outcome, SkipReason::NoCode);
        assert_eq!(target.discard_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_discards_placeholder() {
        let fetcher = Arc::new(FailingFetcher::new());
        let config = CodepeekConfig::new().with_fetch(
            FetchConfig::new()
                .with_primary_proxy("https://proxy.example/?url=")
                .with_fallback_proxies(vec!["https://backup.example/raw?".to_string()]),
        );
        let resolver = FetchResolver::new(fetcher.clone(), &config.fetch)
            .with_privileged(Arc::new(StaticPrivilegedFetcher::failing("blocked")));
        let sink = Arc::new(CollectingEventSink::new());
        let pipeline = PreviewPipeline::new(resolver, &config).with_event_sink(sink.clone());
        let target = RecordingTarget::new();

        let outcome = pipeline
            .process(&PreviewSession::new(), &candidate(SO_URL), &target)
            .await;

        assert_failed(&outcome);
        assert_eq!(target.discard_count(), 1);
        assert_eq!(fetcher.call_count(), 3);
        let failed = sink.events_of_type(event_types::PREVIEW_FAILED);
        assert_eq!(failed.len(), 1);
        let data = failed[0].1.as_ref().unwrap();
        assert_eq!(data["error"]["type"], "FetchExhausted");
    }

    #[tokio::test]
    async fn test_privileged_fallback_renders() {
        let privileged = Arc::new(StaticPrivilegedFetcher::serving(STACK_OVERFLOW_ANSWER_PAGE));
        let resolver = FetchResolver::new(Arc::new(FailingFetcher::new()), &direct_only_config().fetch)
            .with_privileged(privileged.clone());
        let pipeline = PreviewPipeline::new(resolver, &direct_only_config());

        let outcome = pipeline
            .process(&PreviewSession::new(), &candidate(SO_URL), &RecordingTarget::new())
            .await;

        assert_language(&outcome, Language::Javascript);
        assert_eq!(privileged.call_count(), 1);
    }

    #[tokio::test]
    async fn test_process_page_isolates_failures() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE)
                .with_page(GITHUB_URL, GITHUB_ISSUE_PAGE),
        );
        let pipeline = pipeline_with(fetcher, &direct_only_config());
        let session = PreviewSession::new();

        let targets: Vec<Arc<RecordingTarget>> = (0..4).map(|_| Arc::new(RecordingTarget::new())).collect();
        let urls = [
            SO_URL,
            "https://stackoverflow.com/questions/404/missing",
            GITHUB_URL,
            "https://www.bbc.co.uk/news",
        ];
        let candidates = urls
            .iter()
            .zip(&targets)
            .map(|(url, target)| (candidate(url), target.clone() as Arc<dyn PreviewTarget>))
            .collect();

        let results = pipeline.process_page(&session, candidates).await;

        assert_eq!(results.len(), 4);
        assert!(outcome_for(&results, SO_URL).is_rendered());
        assert!(outcome_for(&results, GITHUB_URL).is_rendered());
        assert_failed(outcome_for(&results, "https://stackoverflow.com/questions/404/missing"));
        assert_skipped(
            outcome_for(&results, "https://www.bbc.co.uk/news"),
            SkipReason::NotCodeUrl,
        );

        let rendered: usize = targets.iter().map(|t| t.rendered().len()).sum();
        assert_eq!(rendered, 2);
    }

    #[tokio::test]
    async fn test_process_page_runs_concurrently() {
        let urls: Vec<String> = (0..4)
            .map(|i| format!("https://stackoverflow.com/questions/{i}/q"))
            .collect();
        let mut fetcher = StaticFetcher::new().with_delay(Duration::from_millis(100));
        for url in &urls {
            fetcher = fetcher.with_page(url.clone(), NO_CODE_PAGE);
        }
        let config = direct_only_config().with_page(PageConfig::default().with_max_concurrent(4));
        let pipeline = pipeline_with(Arc::new(fetcher), &config);

        let candidates = urls
            .iter()
            .map(|url| (candidate(url), Arc::new(RecordingTarget::new()) as Arc<dyn PreviewTarget>))
            .collect();

        let start = std::time::Instant::now();
        let results = pipeline.process_page(&PreviewSession::new(), candidates).await;

        assert_eq!(results.len(), 4);
        assert!(start.elapsed() < Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_lifecycle_events_emitted() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let sink = Arc::new(CollectingEventSink::new());
        let pipeline = pipeline_with(fetcher, &direct_only_config()).with_event_sink(sink.clone());
        let session = PreviewSession::new();

        pipeline
            .process(&session, &candidate(SO_URL), &RecordingTarget::new())
            .await;
        pipeline
            .process(&session, &candidate(SO_URL), &RecordingTarget::new())
            .await;

        let lifecycle: Vec<String> = sink
            .events_of_type("preview.")
            .into_iter()
            .map(|(event_type, _)| event_type)
            .collect();
        assert_eq!(
            lifecycle,
            vec![
                event_types::PREVIEW_STARTED,
                event_types::PREVIEW_RENDERED,
                event_types::PREVIEW_STARTED,
                event_types::PREVIEW_SKIPPED,
            ]
        );
        assert_eq!(sink.events_of_type(event_types::FETCH_COMPLETED).len(), 1);
        let rendered = &sink.events_of_type(event_types::PREVIEW_RENDERED)[0];
        assert_eq!(rendered.1.as_ref().unwrap()["language"], "javascript");
    }

    #[tokio::test]
    async fn test_session_reset_allows_reprocessing() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let pipeline = pipeline_with(fetcher.clone(), &direct_only_config());
        let session = PreviewSession::new();

        pipeline
            .process(&session, &candidate(SO_URL), &RecordingTarget::new())
            .await;
        session.reset();
        let again = pipeline
            .process(&session, &candidate(SO_URL), &RecordingTarget::new())
            .await;

        assert!(again.is_rendered());
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_preview_without_session() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(SO_URL, STACK_OVERFLOW_ANSWER_PAGE));
        let pipeline = pipeline_with(fetcher, &direct_only_config());

        let preview = pipeline.preview(SO_URL).await.unwrap().unwrap();
        assert_eq!(preview.highlight_class(), "language-javascript");

        let missing = pipeline.preview("https://stackoverflow.com/questions/9/x").await;
        assert!(missing.is_err());
    }
}

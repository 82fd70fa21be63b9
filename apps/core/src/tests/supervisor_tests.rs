use crate::actors::enricher::{KeywordEnricher, DESCRIPTION_SOURCE_SUFFIX, OUTLINE_CLOSING_LINE};
use crate::actors::messages::{AppError, EnrichmentOutcome, LinguisticSummary, OrganicResult};
use crate::actors::supervisor::BriefActorHandle;
use crate::actors::traits::{LinguisticAnalyzer, SearchProvider};
use crate::brain::BrainAnalyzer;
use crate::brief::store::{BriefStore, MemorySlot};
use crate::models::{BestPractice, ContentType, FieldChange, Topic};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::{timeout, Duration};

// --- Mock Components ---

struct StaticSearch {
    results: Vec<OrganicResult>,
    calls: AtomicUsize,
}

impl StaticSearch {
    fn new(results: Vec<OrganicResult>) -> Self {
        Self {
            results,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, _query: &str, num: usize) -> Result<Vec<OrganicResult>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.iter().take(num).cloned().collect())
    }
}

struct FailingSearch;

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn search(&self, _query: &str, _num: usize) -> Result<Vec<OrganicResult>, AppError> {
        Err(AppError::Enrichment("connection refused".to_string()))
    }
}

/// Fails until `failing` is switched off.
struct FlakySearch {
    failing: AtomicBool,
}

#[async_trait]
impl SearchProvider for FlakySearch {
    async fn search(&self, _query: &str, _num: usize) -> Result<Vec<OrganicResult>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::Enrichment("timed out".to_string()))
        } else {
            Ok(vec![])
        }
    }
}

/// Blocks inside `search` until the test releases it.
struct GatedSearch {
    started: Arc<Notify>,
    release: Arc<Notify>,
    calls: AtomicUsize,
}

#[async_trait]
impl SearchProvider for GatedSearch {
    async fn search(&self, query: &str, _num: usize) -> Result<Vec<OrganicResult>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(vec![OrganicResult {
            title: format!("Guide: {}", query),
            snippet: "Gated snippet.".to_string(),
        }])
    }
}

struct FailingAnalyzer;

#[async_trait]
impl LinguisticAnalyzer for FailingAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<LinguisticSummary, AppError> {
        Err(AppError::Enrichment("analyzer unavailable".to_string()))
    }
}

fn result(title: &str, snippet: &str) -> OrganicResult {
    OrganicResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
    }
}

async fn spawn_with<S: SearchProvider>(search: Arc<S>) -> BriefActorHandle {
    let store = BriefStore::open(Box::new(MemorySlot::new())).await;
    BriefActorHandle::spawn(store, KeywordEnricher::new(search, Arc::new(BrainAnalyzer::new())))
}

async fn spawn_static(results: Vec<OrganicResult>) -> BriefActorHandle {
    spawn_with(Arc::new(StaticSearch::new(results))).await
}

// --- Tests ---

#[tokio::test]
async fn test_opinion_piece_options() {
    let actor = spawn_static(vec![]).await;

    let view = actor
        .apply_change(FieldChange::CoreTopic(Some(Topic::ContentCreationPractices)))
        .await
        .unwrap();
    assert_eq!(
        view.content_types,
        vec![ContentType::OpinionPiece, ContentType::Infographic]
    );
    assert!(!view.practices_enabled);

    let view = actor
        .apply_change(FieldChange::ContentType(Some(ContentType::OpinionPiece)))
        .await
        .unwrap();
    assert!(view.practices_enabled);
    assert_eq!(
        view.best_practices,
        vec![BestPractice::UserIntent, BestPractice::SchemaMarkup]
    );
}

#[tokio::test]
async fn test_listicle_prunes_schema_markup() {
    let actor = spawn_static(vec![]).await;
    actor
        .apply_changes(vec![
            FieldChange::CoreTopic(Some(Topic::WhatIsTopicalAuthority)),
            FieldChange::ContentType(Some(ContentType::InDepthGuide)),
        ])
        .await
        .unwrap();
    let view = actor.toggle_practice(BestPractice::SchemaMarkup).await.unwrap();
    assert!(view.brief.best_practices.contains(&BestPractice::SchemaMarkup));

    let view = actor
        .apply_change(FieldChange::ContentType(Some(ContentType::Listicle)))
        .await
        .unwrap();

    assert!(view.brief.best_practices.is_empty());
    assert_eq!(
        view.best_practices,
        vec![BestPractice::SemanticSeo, BestPractice::InternalLinking]
    );
}

#[tokio::test]
async fn test_toggle_twice_restores_selection() {
    let actor = spawn_static(vec![]).await;

    actor.toggle_practice(BestPractice::InternalLinking).await.unwrap();
    let view = actor.toggle_practice(BestPractice::InternalLinking).await.unwrap();

    assert!(view.brief.best_practices.is_empty());
}

#[tokio::test]
async fn test_generate_outline_replaces_outline() {
    let actor = spawn_static(vec![]).await;
    actor
        .apply_change(FieldChange::Outline("hand written".to_string()))
        .await
        .unwrap();
    actor
        .apply_change(FieldChange::CoreTopic(Some(Topic::CommonMistakes)))
        .await
        .unwrap();

    let view = actor.generate_outline().await.unwrap();

    let lines: Vec<&str> = view.brief.outline.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "Introduction: Define Common Mistakes and How to Avoid Them"
    );
}

#[tokio::test]
async fn test_analyze_requires_keyword() {
    let search = Arc::new(StaticSearch::new(vec![]));
    let actor = spawn_with(Arc::clone(&search)).await;

    let result = actor.analyze_keyword().await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    assert!(!actor.snapshot().await.unwrap().busy);
}

#[tokio::test]
async fn test_zero_results_uses_overview_title() {
    let actor = spawn_static(vec![]).await;
    actor
        .apply_change(FieldChange::Keyword("topical authority".to_string()))
        .await
        .unwrap();

    let outcome = actor.analyze_keyword().await.unwrap();

    let EnrichmentOutcome::Applied(brief) = outcome else {
        panic!("Expected Applied, got {:?}", outcome);
    };
    assert_eq!(brief.title, "Comprehensive Overview of topical authority");
    assert_eq!(brief.description, DESCRIPTION_SOURCE_SUFFIX);
    let lines: Vec<&str> = brief.outline.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Introduction: Understanding topical authority");
    assert_eq!(lines[3], OUTLINE_CLOSING_LINE);

    let view = actor.snapshot().await.unwrap();
    assert_eq!(view.brief, brief);
    assert!(!view.busy);
    assert!(view.last_error.is_none());
}

#[tokio::test]
async fn test_enrichment_merges_only_three_fields() {
    let actor = spawn_static(vec![
        result("Semrush: Topical Authority", "Depth beats breadth."),
        result("Ahrefs Guide: Topic Clusters", "Cluster your content."),
    ])
    .await;
    let before = actor
        .apply_changes(vec![
            FieldChange::Keyword("topical authority".to_string()),
            FieldChange::TargetAudience("Content strategists".to_string()),
            FieldChange::WordCount(2500),
        ])
        .await
        .unwrap()
        .brief;

    let outcome = actor.analyze_keyword().await.unwrap();

    let EnrichmentOutcome::Applied(after) = outcome else {
        panic!("Expected Applied, got {:?}", outcome);
    };
    assert_eq!(
        after.title,
        "Ultimate Guide to topical authority in 2025: Insights from Semrush:"
    );
    assert_eq!(
        after.description,
        format!("Depth beats breadth. Cluster your content.{}", DESCRIPTION_SOURCE_SUFFIX)
    );
    assert!(after.outline.contains("\nSemrush\n"));
    assert!(after.outline.contains("\nAhrefs Guide\n"));
    assert_eq!(after.target_audience, before.target_audience);
    assert_eq!(after.word_count, before.word_count);
    assert_eq!(after.keyword, before.keyword);
}

#[tokio::test]
async fn test_network_failure_leaves_brief_unchanged() {
    let actor = spawn_with(Arc::new(FailingSearch)).await;
    let before = actor
        .apply_changes(vec![
            FieldChange::Keyword("topical authority".to_string()),
            FieldChange::Title("My title".to_string()),
            FieldChange::Description("My description".to_string()),
            FieldChange::Outline("My outline".to_string()),
        ])
        .await
        .unwrap()
        .brief;

    let result = actor.analyze_keyword().await;

    assert!(matches!(result, Err(AppError::Enrichment(_))));
    let view = actor.snapshot().await.unwrap();
    assert_eq!(view.brief, before);
    assert!(!view.busy);
    let message = view.last_error.expect("error message is recorded");
    assert!(!message.is_empty());
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn test_analyzer_failure_aborts_before_search() {
    let search = Arc::new(StaticSearch::new(vec![result("a", "b")]));
    let store = BriefStore::open(Box::new(MemorySlot::new())).await;
    let actor = BriefActorHandle::spawn(
        store,
        KeywordEnricher::new(Arc::clone(&search), Arc::new(FailingAnalyzer)),
    );
    actor
        .apply_change(FieldChange::Keyword("seo".to_string()))
        .await
        .unwrap();

    assert!(actor.analyze_keyword().await.is_err());
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_error_is_cleared_on_next_trigger() {
    let search = Arc::new(FlakySearch {
        failing: AtomicBool::new(true),
    });
    let actor = spawn_with(Arc::clone(&search)).await;
    actor
        .apply_change(FieldChange::Keyword("seo".to_string()))
        .await
        .unwrap();
    assert!(actor.analyze_keyword().await.is_err());
    assert!(actor.snapshot().await.unwrap().last_error.is_some());

    search.failing.store(false, Ordering::SeqCst);
    let outcome = actor.analyze_keyword().await.unwrap();

    assert!(matches!(outcome, EnrichmentOutcome::Applied(_)));
    let view = actor.snapshot().await.unwrap();
    assert!(view.last_error.is_none());
    assert!(!view.busy);
}

#[tokio::test]
async fn test_trigger_while_busy_is_ignored() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let search = Arc::new(GatedSearch {
        started: Arc::clone(&started),
        release: Arc::clone(&release),
        calls: AtomicUsize::new(0),
    });
    let actor = spawn_with(Arc::clone(&search)).await;
    actor
        .apply_change(FieldChange::Keyword("topical authority".to_string()))
        .await
        .unwrap();

    let first = {
        let actor = actor.clone();
        tokio::spawn(async move { actor.analyze_keyword().await })
    };
    timeout(Duration::from_secs(5), started.notified())
        .await
        .expect("search started");

    assert!(actor.snapshot().await.unwrap().busy);
    let second = actor.analyze_keyword().await.unwrap();
    assert_eq!(second, EnrichmentOutcome::AlreadyRunning);

    release.notify_one();
    let outcome = first.await.unwrap().unwrap();

    assert!(matches!(outcome, EnrichmentOutcome::Applied(_)));
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    assert!(!actor.snapshot().await.unwrap().busy);
}

#[tokio::test]
async fn test_edits_while_busy_are_kept_and_stale_result_discarded() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let search = Arc::new(GatedSearch {
        started: Arc::clone(&started),
        release: Arc::clone(&release),
        calls: AtomicUsize::new(0),
    });
    let actor = spawn_with(search).await;
    actor
        .apply_change(FieldChange::Keyword("topical authority".to_string()))
        .await
        .unwrap();

    let pending = {
        let actor = actor.clone();
        tokio::spawn(async move { actor.analyze_keyword().await })
    };
    timeout(Duration::from_secs(5), started.notified())
        .await
        .expect("search started");

    let view = actor
        .apply_changes(vec![
            FieldChange::Keyword("content clusters".to_string()),
            FieldChange::TargetAudience("Editors".to_string()),
        ])
        .await
        .unwrap();
    assert!(view.busy);

    release.notify_one();
    let outcome = pending.await.unwrap().unwrap();

    assert_eq!(outcome, EnrichmentOutcome::Stale);
    let view = actor.snapshot().await.unwrap();
    assert!(view.brief.title.is_empty());
    assert_eq!(view.brief.keyword, "content clusters");
    assert_eq!(view.brief.target_audience, "Editors");
    assert!(!view.busy);
}

#[tokio::test]
async fn test_non_keyword_edits_while_busy_still_merge() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let search = Arc::new(GatedSearch {
        started: Arc::clone(&started),
        release: Arc::clone(&release),
        calls: AtomicUsize::new(0),
    });
    let actor = spawn_with(search).await;
    actor
        .apply_change(FieldChange::Keyword("seo".to_string()))
        .await
        .unwrap();

    let pending = {
        let actor = actor.clone();
        tokio::spawn(async move { actor.analyze_keyword().await })
    };
    timeout(Duration::from_secs(5), started.notified())
        .await
        .expect("search started");
    actor.apply_change(FieldChange::WordCount(900)).await.unwrap();

    release.notify_one();
    let outcome = pending.await.unwrap().unwrap();

    let EnrichmentOutcome::Applied(brief) = outcome else {
        panic!("Expected Applied, got {:?}", outcome);
    };
    assert_eq!(brief.word_count, 900);
    assert!(brief.title.contains("Insights from Guide:"));
}

#[tokio::test]
async fn test_shutdown_closes_handle() {
    let actor = spawn_static(vec![]).await;

    actor.shutdown().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(matches!(actor.snapshot().await, Err(AppError::Actor(_))));
}

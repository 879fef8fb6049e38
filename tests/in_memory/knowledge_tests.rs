//! In-memory integration tests for insight ingestion and search.

use std::sync::Arc;

use super::helpers::{MinuteClock, replying};
use kortana::analysis::adapters::ScriptedTextAnalyzer;
use kortana::knowledge::{
    adapters::memory::InMemoryInsightRepository,
    domain::{InsightId, Tag, UpsertOutcome},
    services::{IngestRequest, KnowledgeService, SearchQuery},
};
use rstest::{fixture, rstest};

type TestService = KnowledgeService<InMemoryInsightRepository, ScriptedTextAnalyzer, MinuteClock>;

struct World {
    analyzer: Arc<ScriptedTextAnalyzer>,
    service: TestService,
}

#[fixture]
fn world() -> World {
    let (analyzer, analysis) = replying("Prefer small focused modules");
    World {
        analyzer,
        service: KnowledgeService::new(
            Arc::new(InMemoryInsightRepository::new()),
            analysis,
            Arc::new(MinuteClock::new()),
        ),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upsert_replaces_analysis_and_keeps_identity(world: World) -> eyre::Result<()> {
    let request = IngestRequest::new("Moved the deploy script into docker").with_source("commits");
    let first = world.service.ingest(request.clone()).await?;
    world.analyzer.set_reply("Performance improved after the fix")?;
    let second = world.service.ingest(request).await?;

    assert_eq!(first.status, UpsertOutcome::Ingested);
    assert_eq!(second.status, UpsertOutcome::Updated);
    assert_eq!(second.insight.id(), first.insight.id());
    assert_eq!(
        second.insight.id(),
        &InsightId::derive("commits", "Moved the deploy script into docker")
    );
    assert!(second.insight.tags().contains(&Tag::Performance));
    assert!(!first.insight.tags().contains(&Tag::Performance));

    let everything = world.service.search(&SearchQuery::new("")).await?;
    assert_eq!(everything.total_results, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_orders_newest_first_and_honours_limit(world: World) -> eyre::Result<()> {
    let mut ids = Vec::new();
    for content in ["cache warmup t1", "cache warmup t2", "cache warmup t3"] {
        let ingested = world
            .service
            .ingest(IngestRequest::new(content).with_source("notes"))
            .await?;
        ids.push(ingested.insight.id().clone());
    }

    let found = world
        .service
        .search(&SearchQuery::new("Cache Warmup").with_limit(2))
        .await?;

    let returned: Vec<&InsightId> = found.results.iter().map(|insight| insight.id()).collect();
    eyre::ensure!(ids.len() == 3, "three insights expected");
    assert_eq!(returned, [&ids[2], &ids[1]]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_analysis_still_stores_insight(world: World) -> eyre::Result<()> {
    world.analyzer.set_failing_status(500)?;

    let ingested = world
        .service
        .ingest(IngestRequest::new("pytest coverage report"))
        .await?;

    assert!(ingested.insight.insights().is_degraded());
    assert_eq!(ingested.insight.insights().text(), "Failed to analyze content");
    assert!(ingested.insight.tags().contains(&Tag::Testing));

    let found = world
        .service
        .search(&SearchQuery::new("coverage").with_tags([Tag::Testing]))
        .await?;
    assert_eq!(found.total_results, 1);
    Ok(())
}

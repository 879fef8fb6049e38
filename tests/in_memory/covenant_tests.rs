//! In-memory integration tests for rituals and the covenant snapshot.

use std::sync::Arc;

use super::helpers::{MinuteClock, replying};
use chrono::TimeDelta;
use kortana::analysis::adapters::ScriptedTextAnalyzer;
use kortana::knowledge::{
    adapters::memory::{InMemoryInsightRepository, InMemoryRitualRepository},
    domain::{AutonomyStatus, Tag},
    services::{CovenantService, IngestRequest, KnowledgeService, RitualService},
};
use kortana::task::adapters::memory::InMemoryTaskRepository;
use rstest::{fixture, rstest};

struct World {
    clock: Arc<MinuteClock>,
    knowledge: KnowledgeService<InMemoryInsightRepository, ScriptedTextAnalyzer, MinuteClock>,
    rituals: RitualService<InMemoryRitualRepository, ScriptedTextAnalyzer, MinuteClock>,
    covenant: CovenantService<
        InMemoryInsightRepository,
        InMemoryRitualRepository,
        InMemoryTaskRepository,
        MinuteClock,
    >,
}

#[fixture]
fn world() -> World {
    let clock = Arc::new(MinuteClock::new());
    let insights = Arc::new(InMemoryInsightRepository::new());
    let rituals = Arc::new(InMemoryRitualRepository::new());
    let (_, analysis) = replying("A new star joins the constellation");

    World {
        knowledge: KnowledgeService::new(
            Arc::clone(&insights),
            analysis.clone(),
            Arc::clone(&clock),
        ),
        rituals: RitualService::new(Arc::clone(&rituals), analysis, Arc::clone(&clock)),
        covenant: CovenantService::new(
            insights,
            rituals,
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&clock),
        ),
        clock,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rituals_number_sequentially_and_feed_the_covenant(world: World) -> eyre::Result<()> {
    let first = world.rituals.generate("Autonomy awakens", "first cycle").await?;
    let second = world.rituals.generate("Autonomy awakens", "first cycle").await?;

    assert_eq!(first.id(), "ritual_17");
    assert_eq!(second.id(), "ritual_18");
    assert_ne!(first.timestamp(), second.timestamp());

    let snapshot = world.covenant.covenant().await?;
    assert_eq!(snapshot.ritual_count, 2);
    assert_eq!(snapshot.autonomy_status, AutonomyStatus::Initializing);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn covenant_tracks_recent_knowledge(world: World) -> eyre::Result<()> {
    world
        .knowledge
        .ingest(IngestRequest::new("docker deploy pipeline").with_source("ops"))
        .await?;
    world.clock.advance(TimeDelta::days(8));
    world
        .knowledge
        .ingest(IngestRequest::new("react component library").with_source("ui"))
        .await?;

    let snapshot = world.covenant.covenant().await?;
    let stats = world.covenant.stats().await?;

    assert_eq!(snapshot.autonomy_status, AutonomyStatus::Active);
    assert_eq!(snapshot.knowledge_base_size, 2);
    assert_eq!(snapshot.knowledge_stats.recent_insights, 1);
    assert_eq!(
        snapshot.knowledge_stats.unique_tags,
        [Tag::Deployment, Tag::Frontend]
    );
    assert_eq!(stats.source_distribution.get("ops"), Some(&1));
    assert_eq!(stats.task_status.total_tasks, 0);
    Ok(())
}

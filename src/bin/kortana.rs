//! Drives one in-process autonomy cycle from the command line.
//!
//! Stores live for the duration of a single invocation; every run starts
//! empty.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kortana::{
    analysis::{adapters::HttpTextAnalyzer, services::AnalysisClient},
    config::KortanaConfig,
    knowledge::{
        adapters::memory::{InMemoryInsightRepository, InMemoryRitualRepository},
        services::{CovenantService, IngestRequest, KnowledgeService, RitualService},
    },
    task::{
        adapters::{
            github::{GitHubBranchProvisioner, GitHubClient, GitHubIssueSource},
            memory::InMemoryTaskRepository,
        },
        services::{BranchTarget, TaskExecutionService, TaskQueueService},
    },
    telemetry,
};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "kortana")]
#[command(about = "Kortana autonomy core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue open issues, execute every pending task and print the queue
    Cycle,

    /// Analyse and store one piece of development content
    Learn {
        /// Origin label of the content
        #[arg(short, long)]
        source: Option<String>,

        /// Content to learn from
        content: String,
    },

    /// Generate a milestone ritual
    Ritual {
        /// Milestone being marked
        #[arg(short, long)]
        milestone: String,

        /// Additional context for the ritual
        #[arg(short, long, default_value = "")]
        context: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose).context("failed to install tracing subscriber")?;

    let config = KortanaConfig::from_env();
    let analysis = AnalysisClient::new(Arc::new(HttpTextAnalyzer::new(&config.backend_url)));
    let clock = Arc::new(DefaultClock);
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let insights = Arc::new(InMemoryInsightRepository::new());
    let rituals = Arc::new(InMemoryRitualRepository::new());

    match cli.command {
        Commands::Cycle => {
            let repository = config.repository()?;
            let github = GitHubClient::new(&config.github_api_url, config.github_token.clone());
            let queue = TaskQueueService::new(Arc::clone(&tasks), Arc::clone(&clock));
            let engine = TaskExecutionService::new(
                Arc::clone(&tasks),
                analysis,
                Arc::new(GitHubBranchProvisioner::new(github.clone())),
                BranchTarget::new(repository.clone(), config.base_branch()?),
                clock,
            );

            queue
                .queue_open_issues(&GitHubIssueSource::new(github), &repository)
                .await
                .with_context(|| format!("failed to queue open issues of {repository}"))?;
            engine.execute_pending().await?;
            emit(&queue.status().await?)
        }
        Commands::Learn { source, content } => {
            let knowledge =
                KnowledgeService::new(Arc::clone(&insights), analysis, Arc::clone(&clock));
            let covenant = CovenantService::new(insights, rituals, tasks, clock);

            let mut request = IngestRequest::new(content);
            request.source = source;
            let ingested = knowledge.ingest(request).await?;
            emit(&serde_json::json!({
                "learned": ingested,
                "covenant": covenant.covenant().await?,
            }))
        }
        Commands::Ritual { milestone, context } => {
            let service = RitualService::new(rituals, analysis, clock);
            emit(&service.generate(&milestone, &context).await?)
        }
    }
}

fn emit(value: &impl Serialize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

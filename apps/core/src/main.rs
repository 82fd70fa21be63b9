// Briefsmith CLI entry point

use anyhow::Context;
use briefsmith_core::brain::BrainAnalyzer;
use briefsmith_core::brief::{render_json, render_markdown, MemorySlot, SnapshotSlot};
use briefsmith_core::catalog;
use briefsmith_core::database::{self, SqliteSlot};
use briefsmith_core::preflight::run_preflight_checks;
use briefsmith_core::telemetry::{init_tracing, LogFormat};
use briefsmith_core::{
    AppConfig, BestPractice, BriefActorHandle, BriefStore, BriefView, EnrichmentOutcome,
    FieldChange, KeywordEnricher, SearchBackend,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "briefsmith")]
#[command(about = "Build SEO content briefs from a keyword and a few choices")]
struct Cli {
    /// Keep the brief in memory for this run instead of the local database
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check storage and search configuration
    Doctor,
    #[command(flatten)]
    Brief(BriefCommand),
}

/// Commands that run against the live brief.
#[derive(Subcommand)]
enum BriefCommand {
    /// Print the current brief
    Show,
    /// List the choices valid for the current brief
    Options,
    /// Set a single field (e.g. `set coreTopic "Common Mistakes"`)
    Set {
        /// Field name, camelCase or snake_case
        field: String,
        /// New value; empty clears topic and content type
        value: String,
    },
    /// Toggle a best practice on or off
    Toggle {
        /// Practice label, e.g. "Schema Markup"
        practice: String,
    },
    /// Replace the outline with the standard template
    Outline,
    /// Analyze the keyword and merge title, description and outline
    Analyze,
    /// Render the brief for sharing
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Md)]
        format: ExportFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Md,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing(LogFormat::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Doctor => doctor(&config).await,
        Commands::Brief(command) => session(&config, cli.ephemeral, command).await,
    }
}

async fn session(config: &AppConfig, ephemeral: bool, command: BriefCommand) -> anyhow::Result<()> {
    let slot: Box<dyn SnapshotSlot> = if ephemeral {
        info!("Ephemeral session, brief will not be saved to disk");
        Box::new(MemorySlot::new())
    } else {
        let pool = database::init_db(&config.data_dir)
            .await
            .context("Failed to open brief database")?;
        Box::new(SqliteSlot::brief(pool))
    };

    let store = BriefStore::open(slot).await;
    let enricher = KeywordEnricher::with_result_count(
        Arc::new(SearchBackend::from_config(config)),
        Arc::new(BrainAnalyzer::new()),
        config.search_result_count,
    );
    let actor = BriefActorHandle::spawn(store, enricher);

    let result = run(&actor, command).await;
    if let Err(e) = actor.shutdown().await {
        error!("Failed to stop brief actor: {}", e);
    }
    result
}

async fn run(actor: &BriefActorHandle, command: BriefCommand) -> anyhow::Result<()> {
    match command {
        BriefCommand::Show => {
            let view = actor.snapshot().await?;
            print_brief(&view);
        }
        BriefCommand::Options => {
            let view = actor.snapshot().await?;
            print_options(&view);
        }
        BriefCommand::Set { field, value } => {
            let change = FieldChange::parse(&field, &value)?;
            let view = actor.apply_change(change).await?;
            print_brief(&view);
        }
        BriefCommand::Toggle { practice } => {
            let practice: BestPractice = practice.parse()?;
            actor.snapshot().await?.ensure_toggleable(practice)?;
            let view = actor.toggle_practice(practice).await?;
            print_brief(&view);
        }
        BriefCommand::Outline => {
            let view = actor.generate_outline().await?;
            println!("{}", view.brief.outline);
        }
        BriefCommand::Analyze => match actor.analyze_keyword().await? {
            EnrichmentOutcome::Applied(brief) => {
                println!("Title: {}", brief.title);
                println!("Description: {}", brief.description);
                println!("Outline:\n{}", brief.outline);
            }
            EnrichmentOutcome::AlreadyRunning => println!("Keyword analysis is already running."),
            EnrichmentOutcome::Stale => {
                println!("Keyword changed during analysis; suggestion discarded.")
            }
        },
        BriefCommand::Export { format } => {
            let view = actor.snapshot().await?;
            match format {
                ExportFormat::Md => println!("{}", render_markdown(&view.brief)),
                ExportFormat::Json => println!("{}", render_json(&view.brief)?),
            }
        }
    }
    Ok(())
}

async fn doctor(config: &AppConfig) -> anyhow::Result<()> {
    let report = run_preflight_checks(config).await;
    for check in &report.checks {
        let mark = if check.passed { "ok  " } else { "FAIL" };
        println!("[{}] {}: {}", mark, check.name, check.message);
        if let Some(details) = &check.details {
            println!("       {}", details);
        }
    }
    println!("{}", report.summary);

    if !report.ready_to_start {
        anyhow::bail!("storage checks failed");
    }
    Ok(())
}

fn print_brief(view: &BriefView) {
    println!("{}", render_markdown(&view.brief));
    if let Some(err) = &view.last_error {
        println!("Last analysis error: {}", err);
    }
}

fn print_options(view: &BriefView) {
    let topic = view.brief.core_topic;
    println!("Core topics:");
    for t in catalog::topics() {
        let mark = if Some(*t) == topic { "*" } else { " " };
        println!(" {} {}", mark, t);
    }

    println!("Content types:");
    for c in &view.content_types {
        let mark = if Some(*c) == view.brief.content_type { "*" } else { " " };
        println!(" {} {}", mark, c);
    }

    if view.practices_enabled {
        println!("Best practices:");
        for p in &view.best_practices {
            let mark = if view.brief.best_practices.contains(p) { "x" } else { " " };
            println!(" [{}] {}", mark, p);
        }
    } else {
        println!("Best practices: choose a content type first");
    }
}

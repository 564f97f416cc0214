//! brewlog-mg - Migration CLI entry point
//!
//! Runs one migration script against the brewlog database:
//! field normalization passes (origin, processing method, grinder model,
//! grinder setting, filtering tool, water temperature) and schema
//! evolution scripts (CVA Descriptive rename, evaluation-system
//! allow-list widening). Each script supports analyze / migrate /
//! rollback; rollback always refuses with a restore-from-backup message.

use std::path::PathBuf;

use anyhow::{Context, Result};
use brewlog_common::config::resolve_database_path;
use brewlog_common::db::connect;
use brewlog_common::domains::Domain;
use clap::{Parser, ValueEnum};
use tracing::info;

use brewlog_mg::{orchestrator, report, schema};

/// Command-line arguments for brewlog-mg
#[derive(Parser, Debug)]
#[command(name = "brewlog-mg")]
#[command(about = "Data migration tooling for the brewlog recipe database")]
#[command(version)]
struct Args {
    /// Migration script to run
    #[arg(value_enum)]
    script: Script,

    /// Action to perform
    #[arg(value_enum)]
    action: Action,

    /// Path to the brewlog database (overrides BREWLOG_DATABASE and config)
    #[arg(short, long, env = "BREWLOG_DATABASE")]
    database: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Script {
    Origin,
    ProcessingMethod,
    GrinderModel,
    GrinderSetting,
    FilteringTool,
    WaterTemperature,
    CvaDescriptive,
    EvaluationSystem,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Action {
    /// Dry run: report what would change without writing
    Analyze,
    /// Apply the migration
    Migrate,
    /// Always refuses: restore from backup instead
    Rollback,
}

impl Script {
    fn field_domain(self) -> Option<Domain> {
        match self {
            Script::Origin => Some(Domain::Origin),
            Script::ProcessingMethod => Some(Domain::ProcessingMethod),
            Script::GrinderModel => Some(Domain::GrinderModel),
            Script::GrinderSetting => Some(Domain::GrinderSetting),
            Script::FilteringTool => Some(Domain::FilteringTool),
            Script::WaterTemperature => Some(Domain::WaterTemperature),
            Script::CvaDescriptive | Script::EvaluationSystem => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting brewlog-mg v{}", env!("CARGO_PKG_VERSION"));

    let db_path = resolve_database_path(args.database.as_deref().and_then(|p| p.to_str()))
        .context("Failed to resolve database path")?;
    info!("Database path: {}", db_path.display());

    let pool = connect(&db_path)
        .await
        .context("Failed to connect to database")?;

    match (args.script, args.action) {
        (Script::CvaDescriptive, Action::Analyze) => {
            let summary = schema::cva_descriptive::analyze(&pool).await?;
            report::print_cva_analyze_report(&summary);
        }
        (Script::CvaDescriptive, Action::Migrate) => {
            schema::cva_descriptive::migrate(&pool).await?;
            println!("CVA Descriptive schema migration complete.");
        }
        (Script::CvaDescriptive, Action::Rollback) => {
            schema::cva_descriptive::rollback()?;
        }
        (Script::EvaluationSystem, Action::Analyze) => {
            let summary = schema::evaluation_system::analyze(&pool).await?;
            report::print_allow_list_analyze_report(&summary);
        }
        (Script::EvaluationSystem, Action::Migrate) => {
            schema::evaluation_system::migrate(&pool).await?;
            println!("evaluation_system allow-list migration complete.");
        }
        (Script::EvaluationSystem, Action::Rollback) => {
            schema::evaluation_system::rollback()?;
        }
        (script, action) => {
            // Field migration scripts share the orchestrator
            let domain = script
                .field_domain()
                .expect("schema scripts handled above");
            match action {
                Action::Analyze => {
                    let summary = orchestrator::analyze(&pool, domain).await?;
                    report::print_analyze_report(domain.label(), &summary);
                }
                Action::Migrate => {
                    let summary = orchestrator::migrate(&pool, domain).await?;
                    report::print_migration_report(domain.label(), &summary);
                }
                Action::Rollback => orchestrator::rollback()?,
            }
        }
    }

    Ok(())
}

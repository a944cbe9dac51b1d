// ABOUTME: Entry point for the reviewdesk binary.
// ABOUTME: Loads configuration, runs a review session against the simulated collaborators and writes the exports.

use anyhow::Context;
use reviewdesk_app::{DeskConfig, ReviewDesk};
use reviewdesk_core::{DocumentInput, Tab, sample_submission};
use reviewdesk_store::StorageManager;

/// Agents queued for the session's workflow, in run order.
const WORKFLOW: &[&str] = &["1", "2", "3", "4"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reviewdesk=debug")),
        )
        .init();

    let config = DeskConfig::from_env().context("invalid configuration")?;
    tracing::info!(home = %config.home.display(), language = config.language.code(), "reviewdesk starting up");

    let storage = StorageManager::new(config.home.clone())
        .with_context(|| format!("cannot prepare {}", config.home.display()))?;
    let mut desk = ReviewDesk::new(&config);

    desk.set_tab(Tab::Studio);
    let document = sample_submission().to_document_text();
    desk.analyze(DocumentInput::Text(document.clone())).await?;

    desk.set_tab(Tab::Orchestration);
    for id in WORKFLOW {
        if desk.stage_agent(id) {
            desk.orchestrator_mut().add_step();
        }
    }
    let summary = desk.run_workflow().await;
    for row in desk.step_rows().await {
        tracing::info!(agent = %row.agent_name, status = %row.status, "step finished");
    }

    desk.set_tab(Tab::Pdf);
    let report = desk.generate_report(DocumentInput::Text(document)).await?.to_string();

    desk.set_tab(Tab::Agents);
    let agents_path = storage.export_agents(desk.registry())?;
    let steps = desk.orchestrator().steps().await;
    let run_path = storage.save_run(&steps, desk.registry().list())?;
    let report_path = storage.save_report(&report)?;

    desk.set_tab(Tab::Dashboard);
    let overview = desk.dashboard().await;
    tracing::info!(
        agents = overview.agent_count,
        completed = summary.completed,
        failed = summary.failed,
        agents_file = %agents_path.display(),
        run_file = %run_path.display(),
        report_file = %report_path.display(),
        "session complete"
    );

    Ok(())
}

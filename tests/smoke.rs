// ABOUTME: End-to-end smoke test for a full review desk session.
// ABOUTME: Covers agent roster editing, YAML export/import, analysis, chat, the workflow run and saved exports.

use std::sync::Arc;

use reviewdesk_agent::testing::ScriptedExecutor;
use reviewdesk_agent::{EXECUTION_FAILED_RESULT, LatencyProfile};
use reviewdesk_app::{Collaborators, ReviewDesk};
use reviewdesk_core::{
    AgentRegistry, AgentStatus, ConfigEditor, DocumentInput, Language, StepStatus, ViewMode,
    default_agents, parse_agents,
};
use reviewdesk_store::StorageManager;

fn simulated_desk() -> ReviewDesk {
    ReviewDesk::with_collaborators(Collaborators::simulated(LatencyProfile::none()), Language::En, None)
}

#[test]
fn single_agent_roster_create_delete_round_trip() {
    let seed = default_agents().remove(0);
    let mut registry = AgentRegistry::from_agents(vec![seed]).unwrap();

    let created = registry.create();
    assert_eq!(registry.len(), 2);
    assert_eq!(created.id, "2");
    assert_eq!(created.name, "New Agent");
    assert_eq!(created.status, AgentStatus::Idle);

    registry.delete("1");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.list()[0].id, "2");

    let yaml = registry.to_yaml().unwrap();
    assert_eq!(parse_agents(&yaml).unwrap(), registry.list());
}

#[tokio::test]
async fn smoke_test_full_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let storage = StorageManager::new(dir.path().join("home")).unwrap();

    let mut collaborators = Collaborators::simulated(LatencyProfile::none());
    let executor = Arc::new(ScriptedExecutor::new().failing_for("2"));
    collaborators.executor = executor.clone();
    let mut desk = ReviewDesk::with_collaborators(collaborators, Language::En, None);

    // 1. Load a submission; it becomes the chat context.
    let summary = desk
        .analyze(DocumentInput::Text("NeuroPulse Stimulator 510(k)".to_string()))
        .await
        .unwrap();
    assert_eq!(summary.k_number, "K234567");
    let reply = desk.send_chat("Which predicate?").await.unwrap().unwrap();
    assert!(reply.content.contains("Stimulator X1"));

    // 2. Edit the roster through the YAML source view.
    desk.set_editor_mode(ViewMode::Source);
    let mut agents = parse_agents(desk.editor().source()).unwrap();
    agents[3].name = "Labeling Checker".to_string();
    desk.edit_agents_source(serde_yaml::to_string(&agents).unwrap());
    assert!(desk.editor().error().is_none());
    assert_eq!(desk.apply_agents_source().unwrap(), 4);
    assert_eq!(desk.registry().get("4").unwrap().name, "Labeling Checker");

    // Back in the visual view the source mirrors the committed roster.
    desk.set_editor_mode(ViewMode::Visual);
    assert_eq!(desk.editor().source(), desk.registry().to_yaml().unwrap());

    // 3. Queue three agents and run; the middle one fails.
    for id in ["1", "2", "4"] {
        assert!(desk.stage_agent(id));
        desk.orchestrator_mut().add_step().unwrap();
    }
    let run = desk.run_workflow().await;
    assert_eq!((run.executed, run.completed, run.failed), (3, 2, 1));

    let steps = desk.orchestrator().steps().await;
    assert_eq!(steps[0].status, StepStatus::Completed);
    assert_eq!(steps[1].status, StepStatus::Error);
    assert_eq!(steps[1].result.as_deref(), Some(EXECUTION_FAILED_RESULT));
    assert_eq!(steps[2].status, StepStatus::Completed);
    assert!(
        executor
            .requests()
            .iter()
            .all(|r| r.document == "NeuroPulse Stimulator 510(k)")
    );

    // 4. A second run only retries the failed step.
    executor.stop_failing("2");
    let rerun = desk.run_workflow().await;
    assert_eq!((rerun.executed, rerun.skipped), (1, 2));
    assert_eq!(executor.calls(), 4);

    // 5. Save everything and import the roster into a fresh desk.
    let agents_path = storage.export_agents(desk.registry()).unwrap();
    let steps = desk.orchestrator().steps().await;
    storage.save_run(&steps, desk.registry().list()).unwrap();
    let record = storage.load_run().unwrap().unwrap();
    assert_eq!(record.count(StepStatus::Completed), 3);
    assert_eq!(record.steps[2].agent_name, "Labeling Checker");

    let html = desk
        .generate_report(DocumentInput::Text("## Findings\n\nCybersecurity gaps.".to_string()))
        .await
        .unwrap()
        .to_string();
    let report_path = storage.save_report(&html).unwrap();
    assert!(report_path.exists());

    let mut fresh = AgentRegistry::with_defaults();
    let mut editor = ConfigEditor::new(&fresh);
    let text = storage.read_agents_text(&agents_path).unwrap();
    editor.import(text, &mut fresh).unwrap();
    assert_eq!(fresh.list(), desk.registry().list());

    let overview = desk.dashboard().await;
    assert_eq!(overview.agent_count, 4);
    assert_eq!(overview.completed_steps, 3);
    assert_eq!(overview.submission.unwrap().total_tests, 29);
}

#[tokio::test]
async fn bad_yaml_leaves_desk_roster_untouched() {
    let mut desk = simulated_desk();
    let before = desk.registry().list().to_vec();

    desk.edit_agents_source("- id: \"1\"\n  role: Manager\n");
    assert!(desk.editor().error().is_some());
    assert!(desk.apply_agents_source().is_err());

    assert_eq!(desk.registry().list(), before.as_slice());
}

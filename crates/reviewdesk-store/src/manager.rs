// ABOUTME: Storage manager for the review desk's home directory layout.
// ABOUTME: Writes agents.yaml, run records and report pages atomically; reads agents.yaml back for import.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use reviewdesk_core::{Agent, AgentRegistry, OrchestrationStep, ParseError, parse_agents};
use thiserror::Error;

use crate::record::RunRecord;

pub const AGENTS_FILE: &str = "agents.yaml";
pub const RUN_RECORD_FILE: &str = "workflow-run.json";
pub const REPORT_FILE: &str = "report.html";

/// Errors that can occur while reading or writing desk files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml export error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid agents file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Manages the desk home directory. All exports land in `<home>/exports`.
pub struct StorageManager {
    home: PathBuf,
}

impl StorageManager {
    /// Create a manager rooted at `home`, creating the exports directory.
    pub fn new(home: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(home.join("exports"))?;
        Ok(Self { home })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.home.join("exports")
    }

    /// Download the roster as `exports/agents.yaml`. Returns the written path.
    pub fn export_agents(&self, registry: &AgentRegistry) -> Result<PathBuf, StoreError> {
        let yaml = registry.to_yaml()?;
        let path = self.exports_dir().join(AGENTS_FILE);
        write_atomic(&path, yaml.as_bytes())?;
        tracing::info!(path = %path.display(), agents = registry.len(), "exported agents");
        Ok(path)
    }

    /// Read an agents file as raw text, for feeding into the YAML editor.
    pub fn read_agents_text(&self, path: &Path) -> Result<String, StoreError> {
        Ok(fs::read_to_string(path)?)
    }

    /// Read and validate an agents file.
    pub fn load_agents(&self, path: &Path) -> Result<Vec<Agent>, StoreError> {
        let text = self.read_agents_text(path)?;
        parse_agents(&text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the workflow queue with resolved agent names.
    pub fn save_run(
        &self,
        steps: &[OrchestrationStep],
        agents: &[Agent],
    ) -> Result<PathBuf, StoreError> {
        let record = RunRecord::new(steps, agents);
        let json = serde_json::to_string_pretty(&record)?;
        let path = self.exports_dir().join(RUN_RECORD_FILE);
        write_atomic(&path, json.as_bytes())?;
        tracing::info!(path = %path.display(), steps = steps.len(), "saved workflow run");
        Ok(path)
    }

    /// Load the last saved workflow run, if any.
    pub fn load_run(&self) -> Result<Option<RunRecord>, StoreError> {
        let path = self.exports_dir().join(RUN_RECORD_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Write a generated report page.
    pub fn save_report(&self, html: &str) -> Result<PathBuf, StoreError> {
        let path = self.exports_dir().join(REPORT_FILE);
        write_atomic(&path, html.as_bytes())?;
        tracing::info!(path = %path.display(), bytes = html.len(), "saved report");
        Ok(path)
    }
}

/// Write to a sibling `.tmp` file, fsync, then rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let mut file = File::create(&tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewdesk_core::{ConfigEditor, StepConfig, StepStatus};
    use tempfile::TempDir;

    fn manager() -> (TempDir, StorageManager) {
        let dir = TempDir::new().unwrap();
        let mgr = StorageManager::new(dir.path().join("desk_home")).unwrap();
        (dir, mgr)
    }

    #[test]
    fn storage_manager_creates_directories() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("desk_home");
        let mgr = StorageManager::new(home.clone()).unwrap();

        assert!(home.join("exports").is_dir());
        assert_eq!(mgr.home(), &home);
    }

    #[test]
    fn exported_agents_import_back_identically() {
        let (_dir, mgr) = manager();
        let registry = AgentRegistry::with_defaults();

        let path = mgr.export_agents(&registry).unwrap();
        assert!(path.ends_with("exports/agents.yaml"));
        assert!(!path.with_extension("tmp").exists());

        let loaded = mgr.load_agents(&path).unwrap();
        assert_eq!(loaded, registry.list());
    }

    #[test]
    fn imported_text_flows_through_editor() {
        let (_dir, mgr) = manager();
        let mut source = AgentRegistry::with_defaults();
        source.delete("3");
        let path = mgr.export_agents(&source).unwrap();

        let mut registry = AgentRegistry::with_defaults();
        let mut editor = ConfigEditor::new(&registry);
        let text = mgr.read_agents_text(&path).unwrap();
        assert_eq!(editor.import(text, &mut registry).unwrap(), 3);
        assert!(registry.get("3").is_none());
    }

    #[test]
    fn invalid_agents_file_reports_path() {
        let (_dir, mgr) = manager();
        let path = mgr.exports_dir().join("broken.yaml");
        fs::write(&path, "agents: not-a-list\n").unwrap();

        let err = mgr.load_agents(&path).unwrap_err();
        match err {
            StoreError::Parse { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, ParseError::NotASequence(_)));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_agents_file_is_io_error() {
        let (_dir, mgr) = manager();
        let err = mgr.load_agents(&mgr.exports_dir().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn run_record_round_trips() {
        let (_dir, mgr) = manager();
        assert!(mgr.load_run().unwrap().is_none());

        let agents = reviewdesk_core::default_agents();
        let mut step = OrchestrationStep::new(StepConfig::from_agent(&agents[1]));
        step.status = StepStatus::Completed;
        step.result = Some("## Predicate Comparison Table".to_string());

        mgr.save_run(&[step.clone()], &agents).unwrap();
        let record = mgr.load_run().unwrap().unwrap();
        assert_eq!(record.steps.len(), 1);
        assert_eq!(record.steps[0].step, step);
        assert_eq!(record.count(StepStatus::Completed), 1);
    }

    #[test]
    fn report_is_written_to_exports() {
        let (_dir, mgr) = manager();
        let path = mgr.save_report("<!DOCTYPE html><p>ok</p>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<!DOCTYPE html><p>ok</p>");
    }
}

// ABOUTME: State for the agents configuration panel: visual/source view mode and the editable YAML text.
// ABOUTME: Live edits only refresh the error indicator; apply and import commit to the registry.

use crate::agent::AgentDraft;
use crate::registry::AgentRegistry;
use crate::yaml::{ParseError, parse_agents};

/// Which editor the configuration panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Visual,
    Source,
}

/// Editable agents.yaml source plus the inline error shown beneath it.
#[derive(Debug, Clone, Default)]
pub struct ConfigEditor {
    mode: ViewMode,
    source: String,
    error: Option<String>,
    form: Option<(String, AgentDraft)>,
}

impl ConfigEditor {
    /// Create an editor whose source mirrors the registry.
    pub fn new(registry: &AgentRegistry) -> Self {
        let mut editor = Self::default();
        editor.sync_from(registry);
        editor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch views. Entering the visual view re-syncs the source from the registry.
    pub fn set_mode(&mut self, mode: ViewMode, registry: &AgentRegistry) {
        self.mode = mode;
        if mode == ViewMode::Visual {
            self.sync_from(registry);
        }
    }

    /// Regenerate the source text from the registry.
    pub fn sync_from(&mut self, registry: &AgentRegistry) {
        match registry.to_yaml() {
            Ok(text) => {
                self.source = text;
                self.error = None;
            }
            Err(e) => tracing::error!("failed to dump agents as YAML: {}", e),
        }
    }

    /// Record a keystroke-level edit. The text is parsed only to update the
    /// error indicator; the registry is never touched.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.error = parse_agents(&self.source).err().map(|e| e.to_string());
    }

    /// Commit the current source to the registry. In the visual view the
    /// source is then regenerated from the registry. On failure the error is
    /// shown and the registry keeps its previous roster.
    pub fn apply(&mut self, registry: &mut AgentRegistry) -> Result<usize, ParseError> {
        match registry.apply_yaml(&self.source) {
            Ok(count) => {
                self.error = None;
                self.reload_form(registry);
                self.after_change(registry);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("rejected agents.yaml apply: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the source with imported file content and try to commit it.
    /// A failed parse keeps the imported text on screen with its error.
    pub fn import(
        &mut self,
        content: impl Into<String>,
        registry: &mut AgentRegistry,
    ) -> Result<usize, ParseError> {
        self.source = content.into();
        self.apply(registry)
    }

    /// Load an agent into the visual edit form.
    pub fn open_form(&mut self, registry: &mut AgentRegistry, id: &str) -> bool {
        match registry.select(id) {
            Some(draft) => {
                self.form = Some((id.to_string(), draft));
                true
            }
            None => false,
        }
    }

    /// Create a new agent and open it in the form.
    pub fn create_agent(&mut self, registry: &mut AgentRegistry) -> String {
        let agent = registry.create();
        self.form = Some((agent.id.clone(), agent.to_draft()));
        self.after_change(registry);
        agent.id
    }

    /// The agent id and draft currently loaded in the form.
    pub fn form(&self) -> Option<(&str, &AgentDraft)> {
        self.form.as_ref().map(|(id, draft)| (id.as_str(), draft))
    }

    /// Edit the draft in the form without saving it.
    pub fn edit_form(&mut self, change: impl FnOnce(AgentDraft) -> AgentDraft) {
        if let Some((id, draft)) = self.form.take() {
            self.form = Some((id, change(draft)));
        }
    }

    /// Save the form's draft into the registry. No-op when no form is open.
    pub fn save_form(&mut self, registry: &mut AgentRegistry) -> bool {
        let Some((id, draft)) = &self.form else {
            return false;
        };
        let saved = registry.update(id, draft);
        self.after_change(registry);
        saved
    }

    /// Delete an agent, closing the form if it was showing that agent.
    pub fn delete_agent(&mut self, registry: &mut AgentRegistry, id: &str) -> bool {
        let removed = registry.delete(id);
        if self.form.as_ref().is_some_and(|(form_id, _)| form_id == id) {
            self.form = None;
        }
        self.after_change(registry);
        removed
    }

    fn after_change(&mut self, registry: &AgentRegistry) {
        if self.mode == ViewMode::Visual {
            self.sync_from(registry);
        }
    }

    fn reload_form(&mut self, registry: &AgentRegistry) {
        if let Some((id, _)) = &self.form {
            self.form = registry.get(id).map(|a| (id.clone(), a.to_draft()));
        }
    }
}

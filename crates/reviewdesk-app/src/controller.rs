// ABOUTME: ReviewDesk is the root controller: it owns tab, language, summary, registry, editor, orchestrator and chat.
// ABOUTME: Panels borrow only the slice they need; collaborators are injected as trait objects.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use reviewdesk_agent::{
    AgentExecutor, ChatResponder, ChatSession, DocumentAnalyzer, ExecutionError, LatencyProfile,
    ReportGenerator, RunSummary, SimulatedBackend, WorkflowOrchestrator, markdown_to_html,
};
use reviewdesk_core::{
    AgentDraft, AgentRegistry, ChatContext, ChatMessage, ConfigEditor, DocumentInput, Language,
    ParseError, StepStatus, StructuredSummary, Tab, ViewMode,
};
use reviewdesk_core::locale::Strings;

use crate::config::DeskConfig;
use crate::dashboard::DashboardOverview;

/// The four external collaborators the desk talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub analyzer: Arc<dyn DocumentAnalyzer>,
    pub chat: Arc<dyn ChatResponder>,
    pub executor: Arc<dyn AgentExecutor>,
    pub reporter: Arc<dyn ReportGenerator>,
}

impl Collaborators {
    /// Every collaborator backed by one simulated backend.
    pub fn simulated(latency: LatencyProfile) -> Self {
        let backend = Arc::new(SimulatedBackend::new(latency));
        Self {
            analyzer: backend.clone(),
            chat: backend.clone(),
            executor: backend.clone(),
            reporter: backend,
        }
    }
}

/// One row of the orchestration results panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRow {
    pub step_id: String,
    pub agent_name: String,
    pub model: String,
    pub status: StepStatus,
    pub result_html: Option<String>,
}

pub struct ReviewDesk {
    tab: Tab,
    language: Language,
    summary: Option<StructuredSummary>,
    registry: AgentRegistry,
    editor: ConfigEditor,
    orchestrator: WorkflowOrchestrator,
    chat: ChatSession,
    analyzer: Arc<dyn DocumentAnalyzer>,
    reporter: Arc<dyn ReportGenerator>,
    report: Option<String>,
}

impl ReviewDesk {
    /// Build a desk with simulated collaborators as configured.
    pub fn new(config: &DeskConfig) -> Self {
        Self::with_collaborators(
            Collaborators::simulated(config.latency),
            config.language,
            config.step_timeout,
        )
    }

    pub fn with_collaborators(
        collaborators: Collaborators,
        language: Language,
        step_timeout: Option<Duration>,
    ) -> Self {
        let registry = AgentRegistry::with_defaults();
        let editor = ConfigEditor::new(&registry);
        let orchestrator =
            WorkflowOrchestrator::new(collaborators.executor).with_step_timeout(step_timeout);
        Self {
            tab: Tab::default(),
            language,
            summary: None,
            registry,
            editor,
            orchestrator,
            chat: ChatSession::new(collaborators.chat, language),
            analyzer: collaborators.analyzer,
            reporter: collaborators.reporter,
            report: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the interface language. An untouched chat is re-greeted in the
    /// new language; an ongoing conversation is kept as is.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if self.chat.messages().len() <= 1 {
            self.chat.reset(language);
        }
    }

    pub fn strings(&self) -> &'static Strings {
        self.language.strings()
    }

    /// Sidebar entries in display order with their localized labels.
    pub fn sidebar(&self) -> Vec<(Tab, &'static str)> {
        Tab::ALL
            .iter()
            .map(|tab| (*tab, tab.label(self.language)))
            .collect()
    }

    pub fn summary(&self) -> Option<&StructuredSummary> {
        self.summary.as_ref()
    }

    /// Analyze pasted text or an uploaded file and make the result the
    /// loaded summary. The analyzed text also becomes the workflow document.
    pub async fn analyze(
        &mut self,
        input: DocumentInput,
    ) -> Result<&StructuredSummary, ExecutionError> {
        if input.is_empty() {
            tracing::warn!("analysis requested with empty input");
            return Err(ExecutionError::EmptyInput);
        }

        let summary = self.analyzer.analyze(&input).await.inspect_err(|e| {
            tracing::error!(input = %input.describe(), "document analysis failed: {}", e);
        })?;
        let document = match &input {
            DocumentInput::Text(text) => text.clone(),
            DocumentInput::File { .. } => summary.to_document_text(),
        };
        self.orchestrator.set_document(document);
        tracing::info!(k_number = %summary.k_number, device = %summary.device_name, "summary loaded");
        Ok(self.summary.insert(summary))
    }

    /// What the chat may reference: the loaded summary, if any.
    pub fn chat_context(&self) -> ChatContext {
        ChatContext::from(self.summary.clone())
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub async fn send_chat(&mut self, message: &str) -> Result<Option<ChatMessage>, ExecutionError> {
        let context = self.chat_context();
        let reply = self.chat.send(message, &context).await?;
        Ok(reply.cloned())
    }

    /// Turn text or a file into a self-contained HTML report page.
    pub async fn generate_report(&mut self, input: DocumentInput) -> Result<&str, ExecutionError> {
        if input.is_empty() {
            tracing::warn!("report requested with empty input");
            return Err(ExecutionError::EmptyInput);
        }
        let html = self.reporter.generate_report(&input.text_lossy()).await?;
        tracing::info!(input = %input.describe(), bytes = html.len(), "report generated");
        Ok(self.report.insert(html).as_str())
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn editor(&self) -> &ConfigEditor {
        &self.editor
    }

    // Roster changes all go through the editor so its source follows the
    // registry in the visual view.

    pub fn set_editor_mode(&mut self, mode: ViewMode) {
        self.editor.set_mode(mode, &self.registry);
    }

    /// Keystroke-level edit of the YAML source; never touches the registry.
    pub fn edit_agents_source(&mut self, text: impl Into<String>) {
        self.editor.edit(text);
    }

    pub fn apply_agents_source(&mut self) -> Result<usize, ParseError> {
        self.editor.apply(&mut self.registry)
    }

    /// Replace the source with imported agents.yaml content and commit it.
    pub fn import_agents(&mut self, content: impl Into<String>) -> Result<usize, ParseError> {
        self.editor.import(content, &mut self.registry)
    }

    /// Create an agent with default fields and open it in the form.
    pub fn create_agent(&mut self) -> String {
        self.editor.create_agent(&mut self.registry)
    }

    pub fn open_agent_form(&mut self, id: &str) -> bool {
        self.editor.open_form(&mut self.registry, id)
    }

    pub fn edit_agent_form(&mut self, change: impl FnOnce(AgentDraft) -> AgentDraft) {
        self.editor.edit_form(change);
    }

    pub fn save_agent_form(&mut self) -> bool {
        self.editor.save_form(&mut self.registry)
    }

    pub fn delete_agent(&mut self, id: &str) -> bool {
        self.editor.delete_agent(&mut self.registry, id)
    }

    pub fn orchestrator(&self) -> &WorkflowOrchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut WorkflowOrchestrator {
        &mut self.orchestrator
    }

    /// Stage the registry agent `id` for configuration. Returns false for
    /// unknown ids.
    pub fn stage_agent(&mut self, id: &str) -> bool {
        match self.registry.get(id) {
            Some(agent) => {
                self.orchestrator.select_agent_for_config(agent);
                true
            }
            None => false,
        }
    }

    pub async fn run_workflow(&self) -> RunSummary {
        self.orchestrator.run_all().await
    }

    /// Queue rows with agent names resolved against the current roster and
    /// results rendered from markdown.
    pub async fn step_rows(&self) -> Vec<StepRow> {
        let agents = self.registry.list();
        self.orchestrator
            .steps()
            .await
            .into_iter()
            .map(|step| StepRow {
                agent_name: step.agent_label(agents).to_string(),
                result_html: step.result.as_deref().map(markdown_to_html),
                step_id: step.id,
                model: step.selected_model,
                status: step.status,
            })
            .collect()
    }

    pub async fn dashboard(&self) -> DashboardOverview {
        let steps = self.orchestrator.steps().await;
        DashboardOverview::collect(self.registry.list(), &steps, self.summary.as_ref())
    }
}

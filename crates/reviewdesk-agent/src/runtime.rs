// ABOUTME: Defines the collaborator traits the review desk calls out to: analysis, chat, execution, reports.
// ABOUTME: Also defines ExecutionRequest (what an agent run receives) and ExecutionError (what can go wrong).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use reviewdesk_core::{ChatContext, DocumentInput, OrchestrationStep, StructuredSummary};

/// Everything an agent execution receives: who runs, with which prompt and
/// model, against which document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub agent_id: String,
    pub prompt: String,
    pub model: String,
    pub document: String,
}

impl ExecutionRequest {
    /// Build the request for a queued step against the shared document.
    pub fn for_step(step: &OrchestrationStep, document: &str) -> Self {
        Self {
            agent_id: step.agent_id.clone(),
            prompt: step.custom_prompt.clone(),
            model: step.selected_model.clone(),
            document: document.to_string(),
        }
    }
}

/// Errors raised by collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Nothing to process: input is empty")]
    EmptyInput,

    #[error("Render error: {0}")]
    Render(String),
}

/// Runs one agent against a document and returns its written result.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError>;
}

/// Turns pasted text or an uploaded file into a structured summary.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, input: &DocumentInput) -> Result<StructuredSummary, ExecutionError>;
}

/// Answers one chat message. Stateless per call: the caller owns the transcript.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn chat(&self, message: &str, context: &ChatContext) -> Result<String, ExecutionError>;
}

/// Produces a self-contained HTML document presenting the given content.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate_report(&self, content: &str) -> Result<String, ExecutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewdesk_core::{StepConfig, default_agents};

    #[test]
    fn request_copies_step_fields() {
        let step = OrchestrationStep::new(StepConfig::from_agent(&default_agents()[0]));
        let req = ExecutionRequest::for_step(&step, "device text");
        assert_eq!(req.agent_id, "1");
        assert_eq!(req.model, "gemini-3-pro-preview");
        assert_eq!(req.prompt, step.custom_prompt);
        assert_eq!(req.document, "device text");
    }

    #[test]
    fn execution_error_display() {
        let errors = vec![
            ExecutionError::ProviderError("quota exceeded".to_string()),
            ExecutionError::TimedOut(Duration::from_secs(3)),
            ExecutionError::EmptyInput,
            ExecutionError::Render("bad template".to_string()),
        ];
        for err in &errors {
            assert!(!err.to_string().is_empty());
        }
        assert!(
            ExecutionError::ProviderError("quota".to_string())
                .to_string()
                .contains("quota")
        );
        assert!(ExecutionError::TimedOut(Duration::from_secs(3)).to_string().contains("3s"));
    }
}

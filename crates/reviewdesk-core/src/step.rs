// ABOUTME: Defines orchestration steps: one queued invocation of an agent against the shared document.
// ABOUTME: Each step follows the Pending -> Running -> Completed|Error state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::agent::Agent;

/// Label shown for a step whose agent no longer exists in the registry.
pub const UNKNOWN_AGENT_LABEL: &str = "Unknown Agent";

/// Execution status of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Error,
}

impl StepStatus {
    /// Returns true for the two terminal states.
    pub fn is_finished(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Running => "running",
            StepStatus::Completed => "completed",
            StepStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staged step configuration: the agent to run plus its editable prompt and model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    pub agent_id: String,
    pub prompt: String,
    pub model: String,
}

impl StepConfig {
    /// Fallback prompt for agents that have no system prompt.
    pub const DEFAULT_PROMPT: &'static str = "Analyze the document.";

    /// Stage a step from the agent's current prompt and model.
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            agent_id: agent.id.clone(),
            prompt: agent
                .system_prompt
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_PROMPT.to_string()),
            model: agent.model.clone(),
        }
    }
}

/// One queued agent invocation. Holds copies of the prompt and model taken
/// at queue time, so later edits to the agent do not affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationStep {
    pub id: String,
    pub agent_id: String,
    pub custom_prompt: String,
    pub selected_model: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub queued_at: DateTime<Utc>,
}

impl OrchestrationStep {
    /// Build a pending step from a staged configuration with a fresh time-ordered id.
    pub fn new(config: StepConfig) -> Self {
        Self {
            id: Ulid::new().to_string(),
            agent_id: config.agent_id,
            custom_prompt: config.prompt,
            selected_model: config.model,
            status: StepStatus::Pending,
            result: None,
            queued_at: Utc::now(),
        }
    }

    /// Display name of the step's agent, or [`UNKNOWN_AGENT_LABEL`] if it was deleted.
    pub fn agent_label<'a>(&self, agents: &'a [Agent]) -> &'a str {
        agents
            .iter()
            .find(|a| a.id == self.agent_id)
            .map(|a| a.name.as_str())
            .unwrap_or(UNKNOWN_AGENT_LABEL)
    }
}

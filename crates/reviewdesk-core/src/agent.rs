// ABOUTME: Defines the Agent record representing one simulated reviewer persona.
// ABOUTME: Also provides the AgentDraft optional-field builder used by form edits and the seed roster.

use serde::{Deserialize, Serialize};

/// Models an agent may be configured with. Anything else is tolerated but flagged.
pub const KNOWN_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-3-flash-preview",
    "gemini-3-pro-preview",
];

pub const DEFAULT_AGENT_NAME: &str = "New Agent";
pub const DEFAULT_AGENT_ROLE: &str = "Generalist";
pub const DEFAULT_AGENT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AGENT_TEMPERATURE: f64 = 0.5;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Returns true if `model` is one of the [`KNOWN_MODELS`].
pub fn is_known_model(model: &str) -> bool {
    KNOWN_MODELS.contains(&model)
}

/// Lifecycle status shown next to an agent in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Running => "running",
            AgentStatus::Completed => "completed",
            AgentStatus::Error => "error",
        }
    }

    /// Parse the lowercase wire name used in agents.yaml.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "idle" => Some(AgentStatus::Idle),
            "running" => Some(AgentStatus::Running),
            "completed" => Some(AgentStatus::Completed),
            "error" => Some(AgentStatus::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured prompt/model record representing one simulated reviewer.
///
/// Field names serialize in camelCase so agents.yaml files stay compatible
/// with hand-written rosters (`systemPrompt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: String,
    pub model: String,
    pub temperature: f64,
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Agent {
    /// Create an agent with the given id and the "new agent" defaults.
    pub fn with_defaults(id: String) -> Self {
        Self {
            id,
            name: DEFAULT_AGENT_NAME.to_string(),
            role: DEFAULT_AGENT_ROLE.to_string(),
            model: DEFAULT_AGENT_MODEL.to_string(),
            temperature: DEFAULT_AGENT_TEMPERATURE,
            status: AgentStatus::Idle,
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    /// Snapshot this agent into a draft with every field populated.
    pub fn to_draft(&self) -> AgentDraft {
        AgentDraft {
            name: Some(self.name.clone()),
            role: Some(self.role.clone()),
            model: Some(self.model.clone()),
            temperature: Some(self.temperature),
            status: Some(self.status),
            system_prompt: Some(self.system_prompt.clone()),
        }
    }
}

/// Optional-field builder for editing an [`Agent`]. Only populated fields are
/// merged; `system_prompt: Some(None)` clears the prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentDraft {
    pub name: Option<String>,
    pub role: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub status: Option<AgentStatus>,
    pub system_prompt: Option<Option<String>>,
}

impl AgentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = Some(prompt);
        self
    }

    /// True if the draft carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.model.is_none()
            && self.temperature.is_none()
            && self.status.is_none()
            && self.system_prompt.is_none()
    }

    /// Merge the populated fields into `agent`. Temperature is clamped to [0, 1].
    pub fn apply_to(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name = name.clone();
        }
        if let Some(role) = &self.role {
            agent.role = role.clone();
        }
        if let Some(model) = &self.model {
            if !is_known_model(model) {
                tracing::warn!(agent_id = %agent.id, model = %model, "agent configured with unknown model");
            }
            agent.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            let clamped = if temperature.is_nan() {
                DEFAULT_AGENT_TEMPERATURE
            } else {
                temperature.clamp(0.0, 1.0)
            };
            agent.temperature = clamped;
        }
        if let Some(status) = self.status {
            agent.status = status;
        }
        if let Some(prompt) = &self.system_prompt {
            agent.system_prompt = prompt.clone();
        }
    }
}

/// The seed roster every session starts with.
pub fn default_agents() -> Vec<Agent> {
    vec![
        Agent {
            id: "1".to_string(),
            name: "Orchestrator".to_string(),
            role: "Manager".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            temperature: 0.7,
            status: AgentStatus::Idle,
            system_prompt: Some(
                "You are a senior FDA reviewer. Analyze the input document and provide a \
                 high-level review plan, identifying key areas of concern and recommended next steps."
                    .to_string(),
            ),
        },
        Agent {
            id: "2".to_string(),
            name: "Predicate Analyst".to_string(),
            role: "Comparison".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
            status: AgentStatus::Idle,
            system_prompt: Some(
                "You are a predicate device specialist. Extract all predicate devices mentioned, \
                 compare their indications and technological characteristics with the subject device."
                    .to_string(),
            ),
        },
        Agent {
            id: "3".to_string(),
            name: "Risk Reviewer".to_string(),
            role: "QA/RA".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            temperature: 0.5,
            status: AgentStatus::Idle,
            system_prompt: Some(
                "You are a risk management expert. Review the risk analysis section. Identify \
                 hazards, harms, and mitigation strategies. Assess compliance with ISO 14971."
                    .to_string(),
            ),
        },
        Agent {
            id: "4".to_string(),
            name: "Guidance Checker".to_string(),
            role: "Compliance".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
            status: AgentStatus::Idle,
            system_prompt: Some(
                "Check the document against relevant FDA guidance documents. List missing \
                 elements and non-compliant sections."
                    .to_string(),
            ),
        },
    ]
}

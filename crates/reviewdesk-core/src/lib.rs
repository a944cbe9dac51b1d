// ABOUTME: Core library for reviewdesk, containing domain types and the agent registry.
// ABOUTME: This crate defines the shared data model used across all reviewdesk components.

pub mod agent;
pub mod editor;
pub mod locale;
pub mod registry;
pub mod step;
pub mod summary;
pub mod transcript;
pub mod yaml;

pub use agent::{Agent, AgentDraft, AgentStatus, KNOWN_MODELS, default_agents, is_known_model};
pub use editor::{ConfigEditor, ViewMode};
pub use locale::{Language, Tab};
pub use registry::AgentRegistry;
pub use step::{OrchestrationStep, StepConfig, StepStatus, UNKNOWN_AGENT_LABEL};
pub use summary::{DocumentInput, StructuredSummary, sample_submission};
pub use transcript::{ChatContext, ChatMessage, ChatRole};
pub use yaml::{ParseError, export_agents, parse_agents};

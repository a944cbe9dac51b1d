// ABOUTME: Agent system for reviewdesk: collaborator traits, the simulated backend and the workflow orchestrator.
// ABOUTME: Also hosts the chat session, HTML report rendering and deterministic executor doubles.

pub mod chat;
pub mod orchestrator;
pub mod report;
pub mod runtime;
pub mod simulated;
pub mod testing;

pub use chat::ChatSession;
pub use orchestrator::{
    DEFAULT_STEP_TIMEOUT, EXECUTION_FAILED_RESULT, RunSummary, StepEvent, WorkflowOrchestrator,
};
pub use report::{markdown_to_html, render_report};
pub use runtime::{
    AgentExecutor, ChatResponder, DocumentAnalyzer, ExecutionError, ExecutionRequest,
    ReportGenerator,
};
pub use simulated::{LatencyProfile, SimulatedBackend};

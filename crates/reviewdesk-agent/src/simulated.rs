// ABOUTME: Simulated collaborator backend: fixed-delay futures returning canned or templated responses.
// ABOUTME: Stands in for real model inference in the analyzer, chat, agent execution and report paths.

use std::time::Duration;

use async_trait::async_trait;

use reviewdesk_core::{ChatContext, DocumentInput, StructuredSummary, sample_submission};

use crate::report::render_report;
use crate::runtime::{
    AgentExecutor, ChatResponder, DocumentAnalyzer, ExecutionError, ExecutionRequest,
    ReportGenerator,
};

const REVIEW_PLAN: &str = "## Review Plan for Subject Device\n\n\
**Phase 1: Administrative Review**\n\
- Verify Truthful and Accurate Statement.\n\
- Confirm User Fee Payment.\n\n\
**Phase 2: Substantial Equivalence (SE)**\n\
- Deep dive into 'Wireless Charging' technological difference.\n\
- **Action**: Run Predicate Analyst agent on Section 5.\n\n\
**Phase 3: Performance Data**\n\
- Review Biocompatibility (ISO 10993) for new patient contact materials.\n\
- Verify Software Cybersecurity risk assessment.";

const PREDICATE_TABLE: &str = "## Predicate Comparison Table\n\n\
| Feature | Subject Device | Predicate (K123456) | Difference | Significance |\n\
|---|---|---|---|---|\n\
| Intended Use | Pain Relief | Pain Relief | Identical | None |\n\
| Power Source | Rechargeable Li-Ion | Primary Cell | **Different** | Requires safety testing per IEC 62133 |\n\
| Frequency | 10-100Hz | 10-100Hz | Identical | None |";

const PREDICATE_ANSWER: &str = "Based on the document, the primary predicate is the Stimulator X1 \
by Global Neuro. The subject device shares the same waveform characteristics but features \
wireless charging capabilities.";

const RISK_ANSWER: &str = "Key risks identified include battery overheating and infection. \
Mitigations cite IEC 60601-1 thermal cutoffs and sterile packaging procedures.";

const HELP_ANSWER: &str = "I can answer questions about the indications, predicates, testing, \
or risks found in this 510(k) summary. What would you like to know?";

/// Artificial delays applied before each simulated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub analysis: Duration,
    pub chat: Duration,
    pub execution: Duration,
    pub report: Duration,
}

impl LatencyProfile {
    /// No delay at all; used by tests and batch runs.
    pub const fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// The same delay for every collaborator.
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            analysis: delay,
            chat: delay,
            execution: delay,
            report: delay,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            analysis: Duration::from_millis(2000),
            chat: Duration::from_millis(1000),
            execution: Duration::from_millis(1500),
            report: Duration::from_millis(1500),
        }
    }
}

/// One backend implementing every collaborator trait with canned behavior.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    latency: LatencyProfile,
}

impl SimulatedBackend {
    pub fn new(latency: LatencyProfile) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    async fn wait(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DocumentAnalyzer for SimulatedBackend {
    async fn analyze(&self, input: &DocumentInput) -> Result<StructuredSummary, ExecutionError> {
        if input.is_empty() {
            return Err(ExecutionError::EmptyInput);
        }
        tracing::debug!(input = %input.describe(), "simulating document analysis");
        Self::wait(self.latency.analysis).await;
        Ok(sample_submission())
    }
}

#[async_trait]
impl ChatResponder for SimulatedBackend {
    async fn chat(&self, message: &str, context: &ChatContext) -> Result<String, ExecutionError> {
        Self::wait(self.latency.chat).await;
        Ok(canned_chat_reply(message, context).to_string())
    }
}

#[async_trait]
impl AgentExecutor for SimulatedBackend {
    async fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        tracing::debug!(agent_id = %request.agent_id, model = %request.model, "simulating agent execution");
        Self::wait(self.latency.execution).await;
        Ok(canned_agent_result(request))
    }
}

#[async_trait]
impl ReportGenerator for SimulatedBackend {
    async fn generate_report(&self, content: &str) -> Result<String, ExecutionError> {
        if content.trim().is_empty() {
            return Err(ExecutionError::EmptyInput);
        }
        Self::wait(self.latency.report).await;
        let summary = sample_submission();
        render_report(content, Some(&summary))
    }
}

/// Keyword-matched chat reply. The context does not change the answer; the
/// simulated model always speaks about the sample submission.
pub fn canned_chat_reply(message: &str, _context: &ChatContext) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("predicate") {
        PREDICATE_ANSWER
    } else if lower.contains("risk") {
        RISK_ANSWER
    } else {
        HELP_ANSWER
    }
}

/// Result text for an agent run: fixed documents for the seed Orchestrator
/// and Predicate Analyst, a templated acknowledgement for everyone else.
pub fn canned_agent_result(request: &ExecutionRequest) -> String {
    match request.agent_id.as_str() {
        "1" => REVIEW_PLAN.to_string(),
        "2" => PREDICATE_TABLE.to_string(),
        _ => format!(
            "Analysis complete using **{}**.\n\nBased on your prompt: \"{}\"\n\n\
             I have reviewed the document and found the following key points relevant to the \
             regulatory submission...",
            request.model, request.prompt
        ),
    }
}

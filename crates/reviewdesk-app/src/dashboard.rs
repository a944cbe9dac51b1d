// ABOUTME: Dashboard overview aggregation: roster size, workflow progress and the loaded submission's figures.
// ABOUTME: Pure function of the state slices it is handed.

use serde::Serialize;

use reviewdesk_core::{Agent, OrchestrationStep, StepStatus, StructuredSummary};

/// Headline numbers of the loaded 510(k) summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionFigures {
    pub k_number: String,
    pub device_name: String,
    pub predicate_count: usize,
    pub risk_count: usize,
    pub total_tests: u32,
}

impl From<&StructuredSummary> for SubmissionFigures {
    fn from(summary: &StructuredSummary) -> Self {
        Self {
            k_number: summary.k_number.clone(),
            device_name: summary.device_name.clone(),
            predicate_count: summary.predicates.len(),
            risk_count: summary.risks.len(),
            total_tests: summary.total_tests(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub agent_count: usize,
    /// Steps still waiting to run, including one in flight.
    pub queued_steps: usize,
    pub completed_steps: usize,
    pub failed_steps: usize,
    pub submission: Option<SubmissionFigures>,
}

impl DashboardOverview {
    pub fn collect(
        agents: &[Agent],
        steps: &[OrchestrationStep],
        summary: Option<&StructuredSummary>,
    ) -> Self {
        let count = |wanted: &[StepStatus]| steps.iter().filter(|s| wanted.contains(&s.status)).count();
        Self {
            agent_count: agents.len(),
            queued_steps: count(&[StepStatus::Pending, StepStatus::Running]),
            completed_steps: count(&[StepStatus::Completed]),
            failed_steps: count(&[StepStatus::Error]),
            submission: summary.map(SubmissionFigures::from),
        }
    }
}

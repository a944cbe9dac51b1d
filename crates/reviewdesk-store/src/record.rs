// ABOUTME: RunRecord captures a workflow queue after a run so results can be reviewed later.
// ABOUTME: Serialized as pretty JSON next to the agents.yaml export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reviewdesk_core::{Agent, OrchestrationStep, StepStatus};

/// A saved workflow queue with the agent names resolved at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub saved_at: DateTime<Utc>,
    pub steps: Vec<RecordedStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedStep {
    pub agent_name: String,
    #[serde(flatten)]
    pub step: OrchestrationStep,
}

impl RunRecord {
    pub fn new(steps: &[OrchestrationStep], agents: &[Agent]) -> Self {
        Self {
            saved_at: Utc::now(),
            steps: steps
                .iter()
                .map(|step| RecordedStep {
                    agent_name: step.agent_label(agents).to_string(),
                    step: step.clone(),
                })
                .collect(),
        }
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.step.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewdesk_core::{StepConfig, UNKNOWN_AGENT_LABEL, default_agents};

    #[test]
    fn record_resolves_agent_names() {
        let agents = default_agents();
        let mut orphan = OrchestrationStep::new(StepConfig::from_agent(&agents[1]));
        orphan.agent_id = "99".to_string();
        let steps = vec![OrchestrationStep::new(StepConfig::from_agent(&agents[0])), orphan];

        let record = RunRecord::new(&steps, &agents);
        assert_eq!(record.steps[0].agent_name, agents[0].name);
        assert_eq!(record.steps[1].agent_name, UNKNOWN_AGENT_LABEL);
        assert_eq!(record.count(StepStatus::Pending), 2);
    }

    #[test]
    fn record_json_is_flat_and_camel_case() {
        let agents = default_agents();
        let steps = vec![OrchestrationStep::new(StepConfig::from_agent(&agents[0]))];
        let json = serde_json::to_value(RunRecord::new(&steps, &agents)).unwrap();

        let step = &json["steps"][0];
        assert_eq!(step["agentId"], "1");
        assert_eq!(step["agentName"], agents[0].name.as_str());
        assert_eq!(step["status"], "pending");
        assert!(json.get("savedAt").is_some());
    }
}

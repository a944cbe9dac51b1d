// ABOUTME: WorkflowOrchestrator stages agent steps, queues them and runs the queue strictly in order.
// ABOUTME: Each step moves Pending -> Running -> Completed|Error; transitions are broadcast to subscribers.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio_stream::wrappers::BroadcastStream;

use reviewdesk_core::{Agent, OrchestrationStep, StepConfig, StepStatus};

use crate::runtime::{AgentExecutor, ExecutionError, ExecutionRequest};

/// Result text recorded on a step whose execution failed or timed out.
pub const EXECUTION_FAILED_RESULT: &str = "Error executing agent";

/// Default upper bound on a single step's execution.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(120);

/// A status transition of one queued step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEvent {
    pub step_id: String,
    pub index: usize,
    pub status: StepStatus,
}

/// Counts produced by one pass over the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub executed: usize,
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Stages, queues and sequentially executes agent steps against one shared
/// document.
///
/// The queue lives behind an async lock so observers can take snapshots
/// while a step is in flight. Only [`WorkflowOrchestrator::run_all`] changes
/// step status.
pub struct WorkflowOrchestrator {
    executor: Arc<dyn AgentExecutor>,
    steps: RwLock<Vec<OrchestrationStep>>,
    staged: Option<StepConfig>,
    document: String,
    step_timeout: Option<Duration>,
    event_tx: broadcast::Sender<StepEvent>,
    run_lock: Mutex<()>,
}

impl WorkflowOrchestrator {
    /// Create an orchestrator with the default step timeout.
    pub fn new(executor: Arc<dyn AgentExecutor>) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            executor,
            steps: RwLock::new(Vec::new()),
            staged: None,
            document: String::new(),
            step_timeout: Some(DEFAULT_STEP_TIMEOUT),
            event_tx,
            run_lock: Mutex::new(()),
        }
    }

    /// Override the per-step timeout; `None` waits indefinitely.
    pub fn with_step_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.step_timeout = timeout;
        self
    }

    pub fn step_timeout(&self) -> Option<Duration> {
        self.step_timeout
    }

    /// Replace the shared document every step runs against.
    pub fn set_document(&mut self, document: impl Into<String>) {
        self.document = document.into();
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Stage a candidate step for `agent`, prefilled with its prompt and model.
    pub fn select_agent_for_config(&mut self, agent: &Agent) {
        self.staged = Some(StepConfig::from_agent(agent));
    }

    pub fn staged(&self) -> Option<&StepConfig> {
        self.staged.as_ref()
    }

    pub fn set_staged_prompt(&mut self, prompt: impl Into<String>) {
        if let Some(config) = self.staged.as_mut() {
            config.prompt = prompt.into();
        }
    }

    pub fn set_staged_model(&mut self, model: impl Into<String>) {
        if let Some(config) = self.staged.as_mut() {
            config.model = model.into();
        }
    }

    pub fn cancel_staged(&mut self) {
        self.staged = None;
    }

    /// Append the staged configuration as a pending step and clear the
    /// staging slot. Returns the new step's id, or `None` if nothing was staged.
    pub fn add_step(&mut self) -> Option<String> {
        let config = self.staged.take()?;
        let step = OrchestrationStep::new(config);
        let id = step.id.clone();
        tracing::debug!(step_id = %id, agent_id = %step.agent_id, "step queued");
        self.steps.get_mut().push(step);
        Some(id)
    }

    /// Snapshot of the queue in stored order.
    pub async fn steps(&self) -> Vec<OrchestrationStep> {
        self.steps.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.steps.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.steps.read().await.is_empty()
    }

    /// Steps that carry a result, in queue order.
    pub async fn results(&self) -> Vec<OrchestrationStep> {
        self.steps
            .read()
            .await
            .iter()
            .filter(|s| s.result.is_some())
            .cloned()
            .collect()
    }

    /// Subscribe to step transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<StepEvent> {
        self.event_tx.subscribe()
    }

    /// Step transitions as a stream. Lagged notifications are dropped.
    pub fn event_stream(&self) -> impl Stream<Item = StepEvent> + use<> {
        BroadcastStream::new(self.subscribe()).filter_map(|result| async move { result.ok() })
    }

    /// Run every step that has not completed, one at a time, in queue order.
    ///
    /// A failing step is marked `error` and the run moves on. Completed
    /// steps are skipped, so calling this again only resumes pending and
    /// failed work. Concurrent calls are serialized.
    pub async fn run_all(&self) -> RunSummary {
        let _guard = self.run_lock.lock().await;
        let mut summary = RunSummary::default();

        let total = self.steps.read().await.len();
        if total == 0 {
            return summary;
        }
        tracing::info!(steps = total, "running workflow");

        for index in 0..total {
            let request = {
                let mut steps = self.steps.write().await;
                let step = &mut steps[index];
                if step.status == StepStatus::Completed {
                    summary.skipped += 1;
                    continue;
                }
                step.status = StepStatus::Running;
                step.result = None;
                self.publish(step, index);
                ExecutionRequest::for_step(step, &self.document)
            };

            summary.executed += 1;
            let outcome = self.execute_with_timeout(&request).await;

            let mut steps = self.steps.write().await;
            let step = &mut steps[index];
            match outcome {
                Ok(result) => {
                    step.status = StepStatus::Completed;
                    step.result = Some(result);
                    summary.completed += 1;
                }
                Err(e) => {
                    tracing::error!(step_id = %step.id, agent_id = %step.agent_id, "agent execution failed: {}", e);
                    step.status = StepStatus::Error;
                    step.result = Some(EXECUTION_FAILED_RESULT.to_string());
                    summary.failed += 1;
                }
            }
            self.publish(step, index);
        }

        tracing::info!(
            executed = summary.executed,
            completed = summary.completed,
            failed = summary.failed,
            skipped = summary.skipped,
            "workflow run finished"
        );
        summary
    }

    async fn execute_with_timeout(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        match self.step_timeout {
            Some(limit) => tokio::time::timeout(limit, self.executor.execute(request))
                .await
                .unwrap_or(Err(ExecutionError::TimedOut(limit))),
            None => self.executor.execute(request).await,
        }
    }

    fn publish(&self, step: &OrchestrationStep, index: usize) {
        tracing::debug!(step_id = %step.id, index, status = %step.status, "step transition");
        // No subscribers is fine.
        let _ = self.event_tx.send(StepEvent {
            step_id: step.id.clone(),
            index,
            status: step.status,
        });
    }
}

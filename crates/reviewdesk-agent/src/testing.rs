// ABOUTME: Deterministic AgentExecutor doubles for exercising the orchestrator without delays.
// ABOUTME: Scripted results, injected failures, gated completion and hanging calls.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::runtime::{AgentExecutor, ExecutionError, ExecutionRequest};

/// Answers `result for <agent id>` and fails for chosen agents. Records
/// every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    failing: Mutex<HashSet<String>>,
    requests: Mutex<Vec<ExecutionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(self, agent_id: &str) -> Self {
        self.set_failing(agent_id, true);
        self
    }

    pub fn stop_failing(&self, agent_id: &str) {
        self.set_failing(agent_id, false);
    }

    fn set_failing(&self, agent_id: &str, fail: bool) {
        let mut failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        if fail {
            failing.insert(agent_id.to_string());
        } else {
            failing.remove(agent_id);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl AgentExecutor for ScriptedExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let fails = self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&request.agent_id);
        if fails {
            Err(ExecutionError::ProviderError(format!(
                "scripted failure for agent {}",
                request.agent_id
            )))
        } else {
            Ok(format!("result for {}", request.agent_id))
        }
    }
}

/// Holds every call until the test releases a permit.
#[derive(Debug)]
pub struct GatedExecutor {
    gate: Semaphore,
}

impl GatedExecutor {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
        }
    }

    /// Let `calls` pending or future executions finish.
    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }
}

impl Default for GatedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentExecutor for GatedExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| ExecutionError::ProviderError(e.to_string()))?;
        permit.forget();
        Ok(format!("result for {}", request.agent_id))
    }
}

/// Never resolves for one agent; answers immediately for the rest.
#[derive(Debug)]
pub struct HangingExecutor {
    agent_id: String,
}

impl HangingExecutor {
    pub fn for_agent(agent_id: &str) -> Self {
        Self {
            agent_id: agent_id.to_string(),
        }
    }
}

#[async_trait]
impl AgentExecutor for HangingExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        if request.agent_id == self.agent_id {
            std::future::pending::<()>().await;
        }
        Ok(format!("result for {}", request.agent_id))
    }
}

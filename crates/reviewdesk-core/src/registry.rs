// ABOUTME: In-memory ordered registry of agent definitions with selection tracking.
// ABOUTME: Supports create/update/delete, validated bulk replacement and the agents.yaml round trip.

use crate::agent::{Agent, AgentDraft, default_agents};
use crate::yaml::{ParseError, export_agents, parse_agents, validate_agents};

/// Ordered collection of agents. The registry is the only owner of agent
/// identity: ids are unique at all times.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    selected: Option<String>,
    last_issued_id: u64,
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the seed roster.
    pub fn with_defaults() -> Self {
        Self::from_agents(default_agents()).unwrap_or_default()
    }

    /// Create a registry from an existing roster, validating it first.
    pub fn from_agents(agents: Vec<Agent>) -> Result<Self, ParseError> {
        let mut registry = Self::new();
        registry.replace_all(agents)?;
        Ok(registry)
    }

    pub fn list(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// The id of the agent currently loaded in the edit form, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Load an agent into the edit form. Returns the draft snapshot, or `None`
    /// (leaving the selection untouched) if the id is unknown.
    pub fn select(&mut self, id: &str) -> Option<AgentDraft> {
        let draft = self.get(id)?.to_draft();
        self.selected = Some(id.to_string());
        Some(draft)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Append a new agent with default fields and a fresh id, select it and
    /// return a copy.
    pub fn create(&mut self) -> Agent {
        let id = self.next_id();
        let agent = Agent::with_defaults(id.clone());
        self.agents.push(agent.clone());
        self.selected = Some(id);
        tracing::info!(agent_id = %agent.id, "agent created");
        agent
    }

    /// Merge `draft` into the agent with the given id. Returns false (and does
    /// nothing) if no such agent exists.
    pub fn update(&mut self, id: &str, draft: &AgentDraft) -> bool {
        match self.agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                draft.apply_to(agent);
                tracing::info!(agent_id = %id, "agent updated");
                true
            }
            None => {
                tracing::debug!(agent_id = %id, "update ignored for unknown agent");
                false
            }
        }
    }

    /// Remove the agent with the given id. Deleting an unknown id is a no-op.
    /// Clears the selection if it pointed at the removed agent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.agents.len();
        self.agents.retain(|a| a.id != id);
        let removed = self.agents.len() != before;

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if removed {
            tracing::info!(agent_id = %id, "agent deleted");
        }
        removed
    }

    /// Replace the whole roster. The new list is validated first; on error
    /// the registry is left untouched. The selection survives only if its id
    /// is still present.
    pub fn replace_all(&mut self, agents: Vec<Agent>) -> Result<(), ParseError> {
        validate_agents(&agents)?;
        self.agents = agents;
        if let Some(selected) = &self.selected {
            if self.get(selected).is_none() {
                self.selected = None;
            }
        }
        tracing::info!(count = self.agents.len(), "agent roster replaced");
        Ok(())
    }

    /// Serialize the current roster as agents.yaml text.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        export_agents(&self.agents)
    }

    /// Parse agents.yaml text and, if valid, replace the roster with it.
    pub fn apply_yaml(&mut self, text: &str) -> Result<usize, ParseError> {
        let agents = parse_agents(text)?;
        let count = agents.len();
        self.replace_all(agents)?;
        Ok(count)
    }

    /// Produce an id that is greater than every numeric id present and every
    /// id issued before, so repeated calls never collide.
    fn next_id(&mut self) -> String {
        let max_present = self
            .agents
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        // The candidate exceeds every id that parses as u64, so its decimal
        // text cannot equal any existing id.
        if let Some(candidate) = max_present.max(self.last_issued_id).checked_add(1) {
            self.last_issued_id = candidate;
            return candidate.to_string();
        }

        // Numeric ids are exhausted: suffix past the largest one until free.
        let mut suffix: u64 = 1;
        loop {
            let id = format!("{}-{}", u64::MAX, suffix);
            if self.get(&id).is_none() {
                return id;
            }
            suffix += 1;
        }
    }
}

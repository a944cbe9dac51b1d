// ABOUTME: Reads and writes the agents.yaml roster format with structural validation.
// ABOUTME: Uses serde_yaml for serialization; parsing walks a serde_yaml::Value to produce precise errors.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::agent::{
    Agent, AgentStatus, DEFAULT_AGENT_MODEL, DEFAULT_AGENT_ROLE, DEFAULT_AGENT_TEMPERATURE,
    is_known_model,
};

/// Errors produced when agents.yaml text (or a replacement roster) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Syntax(String),

    #[error("invalid YAML structure: root must be a list of agents, found {0}")]
    NotASequence(&'static str),

    #[error("agent #{index} must be a mapping of fields")]
    NotAMapping { index: usize },

    #[error("agent #{index} is missing a non-empty `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("agent #{index} has an invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("duplicate agent id: {0}")]
    DuplicateId(String),
}

/// Serialize the roster as agents.yaml text.
///
/// Field order is fixed by the Agent struct, so the same roster always
/// produces the same bytes. Floats are written in shortest round-trip form.
pub fn export_agents(agents: &[Agent]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(agents)
}

/// Parse agents.yaml text into a validated roster.
///
/// The root must be a sequence and every element a mapping with non-empty
/// `id` and `name`. Other fields fall back to the new-agent defaults when
/// absent. Integer ids are accepted as their decimal text.
pub fn parse_agents(text: &str) -> Result<Vec<Agent>, ParseError> {
    let root: Value = serde_yaml::from_str(text).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let items = match root {
        Value::Sequence(items) => items,
        other => return Err(ParseError::NotASequence(kind_of(&other))),
    };

    let agents = items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Mapping(map) => agent_from_mapping(index, map),
            _ => Err(ParseError::NotAMapping { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_agents(&agents)?;
    Ok(agents)
}

/// Check roster-level invariants: non-empty id and name, unique ids and a
/// temperature within [0, 1].
pub fn validate_agents(agents: &[Agent]) -> Result<(), ParseError> {
    let mut seen = HashSet::new();
    for (index, agent) in agents.iter().enumerate() {
        if agent.id.trim().is_empty() {
            return Err(ParseError::MissingField { index, field: "id" });
        }
        if agent.name.trim().is_empty() {
            return Err(ParseError::MissingField {
                index,
                field: "name",
            });
        }
        if !(0.0..=1.0).contains(&agent.temperature) {
            return Err(ParseError::InvalidField {
                index,
                field: "temperature",
                reason: format!("{} is outside [0, 1]", agent.temperature),
            });
        }
        if !seen.insert(agent.id.as_str()) {
            return Err(ParseError::DuplicateId(agent.id.clone()));
        }
    }
    Ok(())
}

fn agent_from_mapping(index: usize, map: &Mapping) -> Result<Agent, ParseError> {
    let id = scalar_text(index, "id", map.get("id"))?
        .filter(|s| !s.trim().is_empty())
        .ok_or(ParseError::MissingField { index, field: "id" })?;
    let name = scalar_text(index, "name", map.get("name"))?
        .filter(|s| !s.trim().is_empty())
        .ok_or(ParseError::MissingField {
            index,
            field: "name",
        })?;

    let role = scalar_text(index, "role", map.get("role"))?
        .unwrap_or_else(|| DEFAULT_AGENT_ROLE.to_string());
    let model = scalar_text(index, "model", map.get("model"))?
        .unwrap_or_else(|| DEFAULT_AGENT_MODEL.to_string());
    if !is_known_model(&model) {
        tracing::warn!(agent_id = %id, model = %model, "agents.yaml references an unknown model");
    }

    let temperature = match map.get("temperature") {
        None | Some(Value::Null) => DEFAULT_AGENT_TEMPERATURE,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ParseError::InvalidField {
            index,
            field: "temperature",
            reason: format!("{} is not representable as a float", n),
        })?,
        Some(other) => {
            return Err(ParseError::InvalidField {
                index,
                field: "temperature",
                reason: format!("expected a number, found {}", kind_of(other)),
            });
        }
    };

    let status = match scalar_text(index, "status", map.get("status"))? {
        None => AgentStatus::Idle,
        Some(name) => AgentStatus::from_name(&name).ok_or_else(|| ParseError::InvalidField {
            index,
            field: "status",
            reason: format!("unknown status {:?}", name),
        })?,
    };

    let system_prompt = scalar_text(index, "systemPrompt", map.get("systemPrompt"))?;

    Ok(Agent {
        id,
        name,
        role,
        model,
        temperature,
        status,
        system_prompt,
    })
}

/// Read a scalar field as text. Null or absent yields `None`; numbers and
/// booleans are rendered in their YAML form; collections are rejected.
fn scalar_text(
    index: usize,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<String>, ParseError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(ParseError::InvalidField {
            index,
            field,
            reason: format!("expected a scalar, found {}", kind_of(other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::default_agents;

    #[test]
    fn export_then_parse_preserves_roster() {
        let agents = default_agents();
        let yaml = export_agents(&agents).expect("export");
        let parsed = parse_agents(&yaml).expect("parse");
        assert_eq!(parsed, agents);
    }

    #[test]
    fn temperature_keeps_exact_float_value() {
        let mut agents = default_agents();
        agents[0].temperature = 0.1 + 0.2;
        agents[1].temperature = 1.0 / 3.0;

        let yaml = export_agents(&agents).expect("export");
        let parsed = parse_agents(&yaml).expect("parse");

        assert_eq!(parsed[0].temperature.to_bits(), (0.1f64 + 0.2).to_bits());
        assert_eq!(parsed[1].temperature.to_bits(), (1.0f64 / 3.0).to_bits());
    }

    #[test]
    fn export_is_deterministic() {
        let agents = default_agents();
        assert_eq!(
            export_agents(&agents).unwrap(),
            export_agents(&agents).unwrap()
        );
    }

    #[test]
    fn export_uses_camel_case_prompt_key() {
        let yaml = export_agents(&default_agents()).unwrap();
        assert!(yaml.contains("systemPrompt:"));
        assert!(!yaml.contains("system_prompt"));
    }

    #[test]
    fn empty_roster_round_trips() {
        let yaml = export_agents(&[]).unwrap();
        assert!(parse_agents(&yaml).unwrap().is_empty());
    }

    #[test]
    fn mapping_root_is_rejected() {
        let err = parse_agents("id: '1'\nname: Orchestrator\n").unwrap_err();
        assert_eq!(err, ParseError::NotASequence("a mapping"));
        assert!(err.to_string().contains("must be a list of agents"));
    }

    #[test]
    fn scalar_and_empty_roots_are_rejected() {
        assert!(matches!(
            parse_agents("just some text"),
            Err(ParseError::NotASequence("a string"))
        ));
        assert!(matches!(
            parse_agents(""),
            Err(ParseError::NotASequence(_))
        ));
    }

    #[test]
    fn malformed_yaml_reports_syntax_error() {
        let err = parse_agents("- id: '1'\n  name: [unclosed\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)), "got {err:?}");
    }

    #[test]
    fn element_missing_name_is_rejected() {
        let text = "- id: '1'\n  name: Orchestrator\n- id: '2'\n  role: Comparison\n";
        let err = parse_agents(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingField {
                index: 1,
                field: "name"
            }
        );
    }

    #[test]
    fn element_with_blank_id_is_rejected() {
        let err = parse_agents("- id: ''\n  name: Orchestrator\n").unwrap_err();
        assert_eq!(err, ParseError::MissingField { index: 0, field: "id" });
    }

    #[test]
    fn non_mapping_element_is_rejected() {
        let err = parse_agents("- Orchestrator\n").unwrap_err();
        assert_eq!(err, ParseError::NotAMapping { index: 0 });
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = "- id: '1'\n  name: A\n- id: '1'\n  name: B\n";
        assert_eq!(
            parse_agents(text).unwrap_err(),
            ParseError::DuplicateId("1".to_string())
        );
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let agents = parse_agents("- id: 9\n  name: Labeling Reviewer\n").unwrap();
        let agent = &agents[0];
        assert_eq!(agent.id, "9");
        assert_eq!(agent.role, "Generalist");
        assert_eq!(agent.model, "gemini-2.5-flash");
        assert_eq!(agent.temperature, 0.5);
        assert_eq!(agent.status, AgentStatus::Idle);
        assert!(agent.system_prompt.is_none());
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let err = parse_agents("- id: '1'\n  name: A\n  temperature: 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "temperature",
                ..
            }
        ));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse_agents("- id: '1'\n  name: A\n  status: sleeping\n").unwrap_err();
        assert!(err.to_string().contains("sleeping"));
    }

    #[test]
    fn unknown_model_is_tolerated() {
        let agents = parse_agents("- id: '1'\n  name: A\n  model: local-llama\n").unwrap();
        assert_eq!(agents[0].model, "local-llama");
    }
}

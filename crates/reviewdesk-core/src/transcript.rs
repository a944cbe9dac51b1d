// ABOUTME: Defines chat transcript types for the contextual chat widget.
// ABOUTME: Messages carry a ULID, a role and a timestamp; ChatContext tags what the chat may reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::summary::StructuredSummary;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    /// Label displayed above a message bubble.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatRole::User => "You",
            ChatRole::Model => "Agent",
        }
    }
}

/// A single message in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: Ulid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message with a fresh ULID and the current timestamp.
    pub fn new(role: ChatRole, content: String) -> Self {
        Self {
            message_id: Ulid::new(),
            role,
            content,
            timestamp: Utc::now(),
        }
    }
}

/// What the chat collaborator may draw on when answering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatContext {
    #[default]
    NoContext,
    Summary(StructuredSummary),
}

impl ChatContext {
    pub fn summary(&self) -> Option<&StructuredSummary> {
        match self {
            ChatContext::NoContext => None,
            ChatContext::Summary(summary) => Some(summary),
        }
    }
}

impl From<Option<StructuredSummary>> for ChatContext {
    fn from(summary: Option<StructuredSummary>) -> Self {
        summary.map_or(ChatContext::NoContext, ChatContext::Summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::sample_submission;

    #[test]
    fn chat_message_round_trip() {
        let msg = ChatMessage::new(ChatRole::User, "Which predicate?".to_string());
        let json = serde_json::to_string(&msg).expect("serialize");
        let deser: ChatMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(msg.message_id, deser.message_id);
        assert_eq!(deser.role, ChatRole::User);
        assert_eq!(deser.content, "Which predicate?");
    }

    #[test]
    fn context_tag_serializes() {
        let json = serde_json::to_value(ChatContext::NoContext).expect("serialize");
        assert_eq!(json["type"], "NoContext");

        let ctx = ChatContext::Summary(sample_submission());
        let json = serde_json::to_value(&ctx).expect("serialize");
        assert_eq!(json["type"], "Summary");
        assert_eq!(json["kNumber"], "K234567");
    }

    #[test]
    fn context_from_optional_summary() {
        assert_eq!(ChatContext::from(None::<StructuredSummary>), ChatContext::NoContext);
        let ctx = ChatContext::from(Some(sample_submission()));
        assert_eq!(ctx.summary().map(|s| s.k_number.as_str()), Some("K234567"));
    }

    #[test]
    fn role_display_names() {
        assert_eq!(ChatRole::User.display_name(), "You");
        assert_eq!(ChatRole::Model.display_name(), "Agent");
    }
}

// ABOUTME: ChatSession owns the contextual chat transcript and forwards messages to a ChatResponder.
// ABOUTME: Starts with a language-specific greeting; blank input is ignored and failures keep the user message.

use std::sync::Arc;

use reviewdesk_core::{ChatContext, ChatMessage, ChatRole, Language};

use crate::runtime::{ChatResponder, ExecutionError};

pub struct ChatSession {
    responder: Arc<dyn ChatResponder>,
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl ChatSession {
    pub fn new(responder: Arc<dyn ChatResponder>, language: Language) -> Self {
        Self {
            responder,
            messages: vec![greeting(language)],
            loading: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a reply is awaited.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Drop the transcript and start over with a greeting in `language`.
    pub fn reset(&mut self, language: Language) {
        self.messages = vec![greeting(language)];
        self.loading = false;
    }

    /// Send one user message and append the reply.
    ///
    /// The message is kept and forwarded as typed. Returns `Ok(None)` when it
    /// is blank. If the responder fails the user message stays in the
    /// transcript and the error is returned.
    pub async fn send(
        &mut self,
        message: &str,
        context: &ChatContext,
    ) -> Result<Option<&ChatMessage>, ExecutionError> {
        if message.trim().is_empty() {
            return Ok(None);
        }

        self.messages
            .push(ChatMessage::new(ChatRole::User, message.to_string()));
        self.loading = true;
        let reply = self.responder.chat(message, context).await;
        self.loading = false;

        match reply {
            Ok(content) => {
                self.messages.push(ChatMessage::new(ChatRole::Model, content));
                Ok(self.messages.last())
            }
            Err(e) => {
                tracing::error!("chat reply failed: {}", e);
                Err(e)
            }
        }
    }
}

fn greeting(language: Language) -> ChatMessage {
    ChatMessage::new(ChatRole::Model, language.strings().chat_greeting.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::{LatencyProfile, SimulatedBackend};
    use async_trait::async_trait;
    use reviewdesk_core::sample_submission;

    struct Unavailable;

    #[async_trait]
    impl ChatResponder for Unavailable {
        async fn chat(&self, _: &str, _: &ChatContext) -> Result<String, ExecutionError> {
            Err(ExecutionError::ProviderError("offline".to_string()))
        }
    }

    fn session(language: Language) -> ChatSession {
        ChatSession::new(Arc::new(SimulatedBackend::new(LatencyProfile::none())), language)
    }

    #[test]
    fn starts_with_greeting_in_language() {
        let en = session(Language::En);
        assert_eq!(en.messages().len(), 1);
        assert_eq!(en.messages()[0].role, ChatRole::Model);
        assert!(en.messages()[0].content.starts_with("Hello!"));

        let zh = session(Language::Zh);
        assert_eq!(zh.messages()[0].content, Language::Zh.strings().chat_greeting);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut chat = session(Language::En);
        assert!(chat.send("   ", &ChatContext::NoContext).await.unwrap().is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test]
    async fn send_appends_user_message_and_reply() {
        let mut chat = session(Language::En);
        let context = ChatContext::Summary(sample_submission());
        let reply = chat
            .send("  What is the predicate? ", &context)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply.role, ChatRole::Model);
        assert!(reply.content.contains("Stimulator X1"));

        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "  What is the predicate? ", "stored as typed");
        assert!(!chat.is_loading());
    }

    #[tokio::test]
    async fn failed_reply_keeps_user_message() {
        let mut chat = ChatSession::new(Arc::new(Unavailable), Language::En);
        let result = chat.send("risks?", &ChatContext::NoContext).await;
        assert!(matches!(result, Err(ExecutionError::ProviderError(_))));
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, ChatRole::User);
        assert!(!chat.is_loading());
    }

    #[test]
    fn reset_switches_greeting() {
        let mut chat = session(Language::En);
        chat.reset(Language::Zh);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].content, Language::Zh.strings().chat_greeting);
    }
}

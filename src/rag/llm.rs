//! Language model boundary.

use crate::config::Credentials;
use crate::error::{MarqueeError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// One turn of a rendered prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptMessage {
    System(String),
    Human(String),
}

impl PromptMessage {
    pub fn content(&self) -> &str {
        match self {
            PromptMessage::System(text) | PromptMessage::Human(text) => text,
        }
    }
}

/// A chat-completion model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion and return the model's text.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String>;
}

/// OpenAI chat completions.
pub struct OpenAIChatModel {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    pub fn new(credentials: &Credentials, model: &str, temperature: f32, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(credentials, timeout)?,
            model: model.to_string(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    #[instrument(skip(self, messages), fields(model = %self.model, turns = messages.len()))]
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| MarqueeError::Rag(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            MarqueeError::OpenAI(format!("Failed to generate response: {}", e))
        })?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| MarqueeError::Rag("Empty response from LLM".to_string()))?
            .clone();

        debug!("Received {} characters from {}", answer.len(), self.model);
        Ok(answer)
    }
}

fn to_request_message(message: &PromptMessage) -> Result<ChatCompletionRequestMessage> {
    let built: ChatCompletionRequestMessage = match message {
        PromptMessage::System(text) => ChatCompletionRequestSystemMessageArgs::default()
            .content(text.as_str())
            .build()
            .map_err(|e| MarqueeError::Rag(e.to_string()))?
            .into(),
        PromptMessage::Human(text) => ChatCompletionRequestUserMessageArgs::default()
            .content(text.as_str())
            .build()
            .map_err(|e| MarqueeError::Rag(e.to_string()))?
            .into(),
    };
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_messages_convert_to_request_roles() {
        let system = to_request_message(&PromptMessage::System("rules".to_string())).unwrap();
        assert!(matches!(system, ChatCompletionRequestMessage::System(_)));

        let human = to_request_message(&PromptMessage::Human("question".to_string())).unwrap();
        assert!(matches!(human, ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_chat_model_creation() {
        let model = OpenAIChatModel::new(
            &Credentials::new("sk-test"),
            "gpt-4o-mini",
            0.7,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(model.model(), "gpt-4o-mini");
    }
}

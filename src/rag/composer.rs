//! Answer composition from retrieved context.

use super::llm::{ChatModel, PromptMessage};
use crate::config::{Prompts, RagPrompts};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Separator placed between context documents.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Fills the answer template and asks the model.
pub struct AnswerComposer {
    llm: Arc<dyn ChatModel>,
    prompts: RagPrompts,
}

impl AnswerComposer {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self {
            llm,
            prompts: RagPrompts::default(),
        }
    }

    /// Use custom templates.
    pub fn with_prompts(mut self, prompts: RagPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// The system and human turns sent for `query` with `context`.
    pub fn render(&self, query: &str, context: &[String]) -> Vec<PromptMessage> {
        let context_block = context.join(CONTEXT_SEPARATOR);
        let vars = HashMap::from([("context", context_block.as_str()), ("input", query)]);

        vec![
            PromptMessage::System(Prompts::render(&self.prompts.system, &vars)),
            PromptMessage::Human(Prompts::render(&self.prompts.human, &vars)),
        ]
    }

    /// Ask the model once and return its answer verbatim.
    #[instrument(skip(self, context), fields(context_docs = context.len()))]
    pub async fn compose(&self, query: &str, context: &[String]) -> Result<String> {
        let messages = self.render(query, context);
        let answer = self.llm.complete(&messages).await?;
        debug!("Composed answer of {} characters", answer.len());
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarqueeError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        calls: Mutex<Vec<Vec<PromptMessage>>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
            self.calls.lock().unwrap().push(messages.to_vec());
            Ok("  raw answer, untouched \n".to_string())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _messages: &[PromptMessage]) -> Result<String> {
            Err(MarqueeError::OpenAI("rate limited".to_string()))
        }
    }

    #[tokio::test]
    async fn test_compose_forwards_joined_context_and_query() {
        let model = Arc::new(RecordingModel::default());
        let composer = AnswerComposer::new(model.clone()).with_prompts(RagPrompts {
            system: "Context:\n{{context}}".to_string(),
            human: "{{input}}".to_string(),
        });

        let context = vec!["{\"title\":\"A\"}".to_string(), "{\"title\":\"B\"}".to_string()];
        let answer = composer.compose("which film?", &context).await.unwrap();

        assert_eq!(answer, "  raw answer, untouched \n");

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                PromptMessage::System("Context:\n{\"title\":\"A\"}\n\n{\"title\":\"B\"}".to_string()),
                PromptMessage::Human("which film?".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_template_markers_in_query_and_context_are_forwarded_verbatim() {
        let model = Arc::new(RecordingModel::default());
        let composer = AnswerComposer::new(model.clone()).with_prompts(RagPrompts {
            system: "Context:\n{{context}}".to_string(),
            human: "{{input}}".to_string(),
        });

        let context = vec!["{\"intro\":\"Say {{input}} twice\"}".to_string()];
        composer
            .compose("what does {{context}} mean?", &context)
            .await
            .unwrap();

        let calls = model.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec![
                PromptMessage::System("Context:\n{\"intro\":\"Say {{input}} twice\"}".to_string()),
                PromptMessage::Human("what does {{context}} mean?".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_compose_with_empty_context_still_asks_model() {
        let model = Arc::new(RecordingModel::default());
        let composer = AnswerComposer::new(model.clone());

        composer.compose("anything?", &[]).await.unwrap();

        let calls = model.calls.lock().unwrap();
        assert!(calls[0][0].content().ends_with("\n\n"));
        assert_eq!(calls[0][1].content(), "anything?");
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let composer = AnswerComposer::new(Arc::new(FailingModel));
        let err = composer.compose("q", &["doc".to_string()]).await.unwrap_err();
        assert!(matches!(err, MarqueeError::OpenAI(_)));
    }
}

//! OpenAI-backed SQL generation
//!
//! The remote call sits behind the [`SqlGenerator`] trait so tests can swap
//! in a deterministic stub; [`OpenAiGenerator`] is the production
//! implementation over `async-openai`.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

/// Fixed role handed to the completion service with every request.
const SYSTEM_PROMPT: &str =
    "You are a SQL expert. Generate SQL queries from natural language.";

/// Capability to turn a rendered prompt into SQL text.
///
/// One call per invocation, no retry, no timeout: a transient failure is
/// fatal to the enclosing `natural_query` call and the caller decides
/// whether to re-issue it.
#[async_trait]
pub trait SqlGenerator {
    async fn generate_sql(&self, prompt: &str) -> Result<String>;
}

/// SQL generator backed by the OpenAI chat-completion API.
///
/// Holds its own client built from an explicit API key; there is no shared
/// or global credential state.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAiGenerator {
    /// Build a generator with the default model settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Build a generator with explicit model settings.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Self {
        let openai_config = OpenAIConfig::new().with_api_key(api_key.into());
        Self {
            client: Client::with_config(openai_config),
            config,
        }
    }
}

#[async_trait]
impl SqlGenerator for OpenAiGenerator {
    async fn generate_sql(&self, prompt: &str) -> Result<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| Error::RemoteService(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| Error::RemoteService(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .temperature(self.config.temperature)
            .build()
            .map_err(|e| Error::RemoteService(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::RemoteService(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| {
                Error::RemoteService("completion response had no content".to_string())
            })?;

        tracing::debug!(model = %self.config.model, "received completion");

        Ok(content.trim().to_string())
    }
}

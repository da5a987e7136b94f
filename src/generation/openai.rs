//! OpenAI chat-completion generator.

use super::ContentGenerator;
use crate::config::LlmSettings;
use crate::error::{Result, VidlensError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Content generator backed by an OpenAI-compatible chat completion API.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    /// Create a generator from the LLM settings.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Model used for completions.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ContentGenerator for OpenAIGenerator {
    #[instrument(skip(self, system, user), fields(model = %self.model, prompt_len = user.len()))]
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| VidlensError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| VidlensError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| VidlensError::Generation(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            VidlensError::OpenAI(format!("Failed to generate response: {}", e))
        })?;

        // A missing message body is passed on as empty text; callers decide
        // whether that is a failure.
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!("Received {} characters", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_creation() {
        let settings = LlmSettings {
            model: "gemini-2.0-flash".to_string(),
            api_base: Some("https://generativelanguage.googleapis.com/v1beta/openai".to_string()),
            ..LlmSettings::default()
        };

        let generator = OpenAIGenerator::new(&settings).unwrap();
        assert_eq!(generator.model(), "gemini-2.0-flash");
    }
}

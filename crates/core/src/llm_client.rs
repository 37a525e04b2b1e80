use crate::session::{TurnRequest, TurnRole};
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Base URL of Gemini's OpenAI-compatible endpoint.
pub const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// The text-in/text-out collaborator that plays the shopkeeper.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopkeeperClient: Send + Sync {
    /// Produces the shopkeeper's answer to `request.user_text`, given the
    /// earlier turns and the system instruction carried by the request.
    async fn reply(&self, request: TurnRequest) -> Result<String>;
}

/// An implementation of `ShopkeeperClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gemini-2.5-flash").
    /// * `temperature` - Sampling temperature sent with every request.
    pub fn new(config: OpenAIConfig, model: String, temperature: f32) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            temperature,
        }
    }

    /// Convenience constructor for Gemini's OpenAI-compatible endpoint.
    pub fn gemini(api_key: &str, api_base: &str, model: String, temperature: f32) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self::new(config, model, temperature)
    }
}

/// Maps a turn request onto the chat-completion message list:
/// system instruction, prior turns, then the new utterance.
pub fn build_messages(request: &TurnRequest) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages: Vec<ChatCompletionRequestMessage> =
        Vec::with_capacity(request.history.len() + 2);
    messages.push(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_instruction.as_str())
            .build()?
            .into(),
    );
    for turn in &request.history {
        let message = match turn.role {
            TurnRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(turn.text.as_str())
                .build()?
                .into(),
            TurnRole::Model => ChatCompletionRequestAssistantMessageArgs::default()
                .content(turn.text.as_str())
                .build()?
                .into(),
        };
        messages.push(message);
    }
    messages.push(
        ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_text.as_str())
            .build()?
            .into(),
    );
    Ok(messages)
}

#[async_trait]
impl ShopkeeperClient for OpenAICompatibleClient {
    async fn reply(&self, request: TurnRequest) -> Result<String> {
        let messages = build_messages(&request)?;
        debug!(
            model = %self.model,
            history_len = request.history.len(),
            "Requesting shopkeeper reply"
        );

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()?;

        let response: CreateChatCompletionResponse =
            self.client.chat().create(chat_request).await?;

        let text = response
            .choices
            .first()
            .context("No response choice from LLM")?
            .message
            .content
            .as_ref()
            .context("No content in LLM response")?;

        if text.trim().is_empty() {
            anyhow::bail!("LLM response content was empty");
        }
        Ok(text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ConversationTurn;

    fn request() -> TurnRequest {
        TurnRequest {
            generation: 0,
            system_instruction: "You are a shopkeeper.".to_string(),
            history: vec![
                ConversationTurn::model("Hello! What would you like to buy?"),
                ConversationTurn::user("Hi"),
                ConversationTurn::model("Hi there!"),
            ],
            user_text: "How much are a few apples?".to_string(),
        }
    }

    #[test]
    fn test_build_messages_orders_system_history_then_user() {
        let messages = build_messages(&request()).unwrap();
        assert_eq!(messages.len(), 5);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[3], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(messages[4], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_build_messages_with_empty_history() {
        let mut req = request();
        req.history.clear();
        let messages = build_messages(&req).unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_receives_request() {
        let mut mock = MockShopkeeperClient::new();
        mock.expect_reply()
            .withf(|req| req.user_text == "How much are a few apples?" && req.history.len() == 3)
            .times(1)
            .returning(|_| Ok("Here you go! That's €0.80.".to_string()));

        let reply = mock.reply(request()).await.unwrap();
        assert!(reply.starts_with("Here you go"));
    }
}

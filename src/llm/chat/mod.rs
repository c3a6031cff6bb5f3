pub mod groq;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;
use std::sync::Arc;

use super::{ LlmConfig, LlmType };
use crate::models::chat::Conversation;
use self::groq::GroqChatClient;
use self::ollama::OllamaChatClient;
use self::openai::OpenAIChatClient;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// Role/content pair in the shape every provider wire format expects.
/// Timestamps stay local; they are never sent upstream.
#[derive(Serialize, Debug, Clone)]
pub struct ProviderMessage {
    pub role: String,
    pub content: String,
}

pub fn wire_messages(conversation: &Conversation) -> Vec<ProviderMessage> {
    conversation.messages
        .iter()
        .map(|message| ProviderMessage {
            role: message.role.to_string(),
            content: message.content.clone(),
        })
        .collect()
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the full ordered transcript and returns the model's reply.
    async fn complete(
        &self,
        conversation: &Conversation,
        temperature: f32
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Groq => {
            let specific_client = GroqChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::Ollama => {
            let specific_client = OllamaChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;

    #[test]
    fn wire_messages_carry_roles_in_order_without_timestamps() {
        let mut conversation = Conversation::new("s1", "be helpful");
        conversation.push(Role::User, "hi");
        conversation.push(Role::Assistant, "hello");

        let messages = wire_messages(&conversation);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");

        let serialized = serde_json::to_value(&messages[1]).unwrap();
        assert_eq!(serialized["content"], "hi");
        assert!(serialized.get("timestamp").is_none());
    }

    #[test]
    fn factory_requires_an_api_key_for_hosted_providers() {
        let config = LlmConfig { llm_type: LlmType::Groq, ..Default::default() };
        assert!(new_client(&config).is_err());

        let config = LlmConfig { llm_type: LlmType::OpenAI, ..Default::default() };
        assert!(new_client(&config).is_err());
    }

    #[test]
    fn ollama_needs_no_key() {
        let config = LlmConfig { llm_type: LlmType::Ollama, ..Default::default() };
        assert!(new_client(&config).is_ok());
    }
}

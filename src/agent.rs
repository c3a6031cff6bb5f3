use log::info;
use serde_json::Value as JsonValue;
use std::error::Error;
use std::sync::Arc;

use crate::cli::Args;
use crate::config::prompt::load_system_prompt;
use crate::history::{ initialize_history_store, HistoryStore };
use crate::intent;
use crate::llm::chat::{ new_client as new_chat_client, ChatClient };
use crate::llm::LlmConfig;
use crate::models::chat::Role;

/// Sampling temperature for every completion call.
const CHAT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub session_id: String,
    pub response: String,
    pub payload: Option<JsonValue>,
}

#[derive(Clone)]
pub struct BookingAgent {
    chat_client: Arc<dyn ChatClient>,
    history_store: Arc<dyn HistoryStore>,
}

impl BookingAgent {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let system_prompt = load_system_prompt(args.prompts_path.as_deref())?;

        let llm_type = args.chat_llm_type
            .parse()
            .map_err(|e| format!("Invalid chat LLM type: {}", e))?;
        let api_key = Some(args.chat_api_key.clone()).filter(|k| !k.is_empty());
        let chat_config = LlmConfig {
            llm_type,
            api_key,
            completion_model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={:?}",
            args.chat_llm_type,
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );

        let history_store = initialize_history_store(args, &system_prompt)?;

        Ok(Self { chat_client, history_store })
    }

    pub fn from_parts(
        chat_client: Arc<dyn ChatClient>,
        history_store: Arc<dyn HistoryStore>
    ) -> Self {
        Self { chat_client, history_store }
    }

    /// One request cycle: resolve the session, send the transcript plus
    /// the pending user message, then commit the turn pair and scan the
    /// reply for a booking payload. The pair is committed only after the
    /// completion succeeds, so a failed call leaves the transcript
    /// unchanged.
    pub async fn chat(
        &self,
        session_id: Option<&str>,
        message: &str
    ) -> Result<ChatOutcome, Box<dyn Error + Send + Sync>> {
        let session_id = self.history_store.open_session(session_id).await?;

        let mut transcript = self.history_store.snapshot(&session_id).await?;
        transcript.push(Role::User, message);

        let completion = self.chat_client.complete(&transcript, CHAT_TEMPERATURE).await?;
        let reply = completion.response.trim().to_string();

        self.history_store.append_exchange(&session_id, message, &reply).await?;

        let payload = intent::extract(&reply);

        Ok(ChatOutcome {
            session_id,
            response: reply,
            payload,
        })
    }
}

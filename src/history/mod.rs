mod memory;

use async_trait::async_trait;
use log::info;
use std::error::Error;
use std::sync::Arc;

use crate::cli::Args;
use crate::models::chat::Conversation;

pub use memory::MemoryHistoryStore;

#[async_trait]
pub trait HistoryStore: Send + Sync + std::fmt::Debug {
    /// Resolves the caller's session, creating a conversation seeded with
    /// the system turn when the id is missing or unknown. Returns the id
    /// the caller should present on the next request.
    async fn open_session(
        &self,
        requested: Option<&str>
    ) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// Appends the user turn and its paired assistant turn as one commit
    /// under the session's lock.
    async fn append_exchange(
        &self,
        session_id: &str,
        user_content: &str,
        assistant_content: &str
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// The ordered transcript sent to the completion service: system turn
    /// first, then a window of the most recent turns.
    async fn snapshot(
        &self,
        session_id: &str
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>>;
}

pub fn create_history_store(
    args: &Args,
    system_prompt: &str
) -> Result<Arc<dyn HistoryStore>, Box<dyn Error + Send + Sync>> {
    match args.history_type.to_lowercase().as_str() {
        "memory" => {
            let store = MemoryHistoryStore::new(
                system_prompt.to_string(),
                args.history_window
            );
            Ok(Arc::new(store))
        }
        _ =>
            Err(
                Box::new(
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("Unsupported history store type: {}", args.history_type)
                    )
                )
            ),
    }
}

pub fn initialize_history_store(
    args: &Args,
    system_prompt: &str
) -> Result<Arc<dyn HistoryStore>, Box<dyn Error + Send + Sync>> {
    info!(
        "Chat history will be stored in: {} (window: {} turns)",
        args.history_type,
        args.history_window
    );
    create_history_store(args, system_prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_is_supported() {
        let args = Args::default();
        assert!(create_history_store(&args, "system prompt").is_ok());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let args = Args { history_type: "redis".to_string(), ..Args::default() };
        let error = create_history_store(&args, "system prompt").unwrap_err();
        assert!(error.to_string().contains("Unsupported history store type"));
    }
}

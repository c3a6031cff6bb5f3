use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{ Mutex, RwLock };
use uuid::Uuid;

use crate::history::HistoryStore;
use crate::models::chat::{ Conversation, Role };

/// Process-local session store. Each session's conversation sits behind
/// its own mutex, so turns from different callers never interleave within
/// one transcript. Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryHistoryStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Conversation>>>>,
    system_prompt: String,
    window: usize,
}

impl MemoryHistoryStore {
    pub fn new(system_prompt: String, window: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            system_prompt,
            window,
        }
    }

    async fn session(
        &self,
        session_id: &str
    ) -> Result<Arc<Mutex<Conversation>>, Box<dyn Error + Send + Sync>> {
        self.sessions
            .read().await
            .get(session_id)
            .cloned()
            .ok_or_else(|| format!("Unknown session: {}", session_id).into())
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn open_session(
        &self,
        requested: Option<&str>
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        if let Some(id) = requested {
            if self.sessions.read().await.contains_key(id) {
                return Ok(id.to_string());
            }
        }

        let id = requested
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.clone())
            .or_insert_with(|| {
                Arc::new(Mutex::new(Conversation::new(id.clone(), &self.system_prompt)))
            });
        Ok(id)
    }

    async fn append_exchange(
        &self,
        session_id: &str,
        user_content: &str,
        assistant_content: &str
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let session = self.session(session_id).await?;
        let mut conversation = session.lock().await;
        conversation.push(Role::User, user_content);
        conversation.push(Role::Assistant, assistant_content);
        Ok(())
    }

    async fn snapshot(
        &self,
        session_id: &str
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>> {
        let session = self.session(session_id).await?;
        let conversation = session.lock().await;
        Ok(conversation.windowed(self.window))
    }
}

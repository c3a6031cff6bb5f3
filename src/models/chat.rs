use chrono::Utc;
use serde::{ Serialize, Deserialize };
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Ordered transcript of one session. The first message is always the
/// single system turn; it is never removed or duplicated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, system_prompt: &str) -> Self {
        Self {
            id: id.into(),
            messages: vec![ChatMessage::new(Role::System, system_prompt)],
        }
    }

    pub fn push(&mut self, role: Role, content: &str) {
        self.messages.push(ChatMessage::new(role, content));
    }

    /// Model-facing view: the system turn plus at most the last `window`
    /// turns. Keep `window` even so user/assistant pairs survive intact.
    pub fn windowed(&self, window: usize) -> Conversation {
        if self.messages.len() <= window + 1 {
            return self.clone();
        }
        let mut messages = Vec::with_capacity(window + 1);
        messages.push(self.messages[0].clone());
        messages.extend_from_slice(&self.messages[self.messages.len() - window..]);
        Conversation {
            id: self.id.clone(),
            messages,
        }
    }

    pub fn turn_count(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_holds_exactly_the_system_turn() {
        let conversation = Conversation::new("s1", "You are a booking assistant.");
        assert_eq!(conversation.turn_count(), 1);
        assert_eq!(conversation.messages[0].role, Role::System);
        assert_eq!(conversation.messages[0].content, "You are a booking assistant.");
    }

    #[test]
    fn windowed_keeps_system_turn_and_recent_pairs() {
        let mut conversation = Conversation::new("s1", "system prompt");
        for i in 0..10 {
            conversation.push(Role::User, &format!("question {}", i));
            conversation.push(Role::Assistant, &format!("answer {}", i));
        }

        let view = conversation.windowed(4);
        assert_eq!(view.turn_count(), 5);
        assert_eq!(view.messages[0].role, Role::System);
        assert_eq!(view.messages[1].content, "question 8");
        assert_eq!(view.messages[4].content, "answer 9");
    }

    #[test]
    fn windowed_is_identity_below_the_cap() {
        let mut conversation = Conversation::new("s1", "system prompt");
        conversation.push(Role::User, "hi");
        conversation.push(Role::Assistant, "hello");

        let view = conversation.windowed(30);
        assert_eq!(view.turn_count(), 3);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }
}

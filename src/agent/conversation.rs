//! Durable conversation memory for one session
//!
//! Lives only as long as the process. Index 0 is always the system message
//! describing the host; every later entry is part of a completed
//! user/assistant exchange.

use crate::llm::ChatMessage;
use crate::shell::HostEnvironment;

use super::prompts::SYSTEM_CONTEXT_HEADER;

/// Ordered session history.
///
/// Not meant to be shared between concurrent turns: the agent loop is its
/// only writer and mutates it between turns, never during one.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Unique session ID, regenerated on every reset
    id: String,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Create a conversation seeded with `environment`
    pub fn new(environment: &HostEnvironment) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            messages: vec![seed_message(environment)],
        }
    }

    /// Drop all exchanges and re-seed from `environment`
    pub fn seed(&mut self, environment: &HostEnvironment) {
        self.id = uuid::Uuid::now_v7().to_string();
        self.messages = vec![seed_message(environment)];
    }

    /// Record one completed exchange
    pub fn append(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(ChatMessage::user(user));
        self.messages.push(ChatMessage::assistant(assistant));
    }

    /// Owned copy for embedding in a prompt
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Number of recorded exchanges (the seed message is not one)
    pub fn exchanges(&self) -> usize {
        (self.messages.len() - 1) / 2
    }

    /// Always false: the seed message is never removed
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn seed_message(environment: &HostEnvironment) -> ChatMessage {
    ChatMessage::system(format!(
        "{}\n{}",
        SYSTEM_CONTEXT_HEADER,
        environment.describe()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    fn env() -> HostEnvironment {
        HostEnvironment {
            os: "linux".into(),
            shell: "bash".into(),
            user: "dev".into(),
            cwd: "/home/dev".into(),
        }
    }

    #[test]
    fn test_new_conversation_is_seeded() {
        let conversation = Conversation::new(&env());
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.exchanges(), 0);
        let seed = &conversation.messages()[0];
        assert_eq!(seed.role(), Role::System);
        assert!(seed.content().starts_with("System Context:\n"));
        assert!(seed.content().contains("- CWD: /home/dev"));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut conversation = Conversation::new(&env());
        conversation.append("!hi", "hello");
        conversation.append("list files", "Command: `ls`\nSummary: two files");

        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(conversation.messages()[1].content(), "!hi");
        assert_eq!(conversation.exchanges(), 2);
    }

    #[test]
    fn test_seed_resets_to_single_system_message() {
        let mut conversation = Conversation::new(&env());
        let first_id = conversation.id().to_string();
        for i in 0..5 {
            conversation.append(format!("q{i}"), format!("a{i}"));
        }

        conversation.seed(&env());
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role(), Role::System);
        assert_ne!(conversation.id(), first_id);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut conversation = Conversation::new(&env());
        let snapshot = conversation.snapshot();
        conversation.append("a", "b");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(conversation.len(), 3);
    }
}

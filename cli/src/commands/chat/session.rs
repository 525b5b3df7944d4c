//! Session transcript for `chatrs chat`.
//!
//! File: cli/src/commands/chat/session.rs
//! Author: Christi Mahu
//!
//! The transcript is append-only and lives only as long as the session.
//! Message ids are `transcript length + 1` at the time of appending.

pub const WELCOME_MESSAGE: &str = "Hello! How can I help you today?";
pub const API_KEY_SET_MESSAGE: &str =
    "API key has been set. You can now ask questions to get more accurate AI-powered responses.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    is_loading: bool,
    api_key: Option<String>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Opens a session holding only the welcome message.
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            is_loading: false,
            api_key: None,
        };
        session.push(WELCOME_MESSAGE.to_string(), Sender::Bot);
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Stores the key for this session. A blank key is ignored and `None`
    /// is returned; otherwise the confirmation message is appended.
    pub fn set_api_key(&mut self, key: &str) -> Option<&ChatMessage> {
        if key.trim().is_empty() {
            return None;
        }
        self.api_key = Some(key.to_string());
        Some(self.push(API_KEY_SET_MESSAGE.to_string(), Sender::Bot))
    }

    /// Starts a turn. Returns the text to send, or `None` when the input is
    /// blank or a turn is already in flight.
    pub fn begin_turn(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() || self.is_loading {
            return None;
        }
        self.push(input.to_string(), Sender::User);
        self.is_loading = true;
        Some(input.to_string())
    }

    /// Appends the bot's reply and clears the loading flag.
    pub fn finish_turn(&mut self, reply: String) -> &ChatMessage {
        self.is_loading = false;
        self.push(reply, Sender::Bot)
    }

    fn push(&mut self, text: String, sender: Sender) -> &ChatMessage {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(ChatMessage { id, text, sender });
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_opens_with_welcome() {
        let session = ChatSession::new();
        assert_eq!(
            session.messages(),
            &[ChatMessage {
                id: 1,
                text: WELCOME_MESSAGE.into(),
                sender: Sender::Bot,
            }]
        );
        assert!(!session.is_loading);
        assert_eq!(session.api_key(), None);
    }

    #[test]
    fn test_turn_appends_user_then_bot() {
        let mut session = ChatSession::new();
        assert_eq!(session.begin_turn("hello "), Some("hello ".to_string()));
        assert!(session.is_loading);

        let reply = session.finish_turn("Hi there".into()).clone();
        assert_eq!(reply.id, 3);
        assert_eq!(reply.sender, Sender::Bot);
        assert!(!session.is_loading);

        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert_eq!(session.messages()[1].text, "hello ");
    }

    #[test]
    fn test_blank_and_concurrent_input_ignored() {
        let mut session = ChatSession::new();
        assert_eq!(session.begin_turn("   "), None);
        assert_eq!(session.messages().len(), 1);

        assert!(session.begin_turn("first").is_some());
        assert_eq!(session.begin_turn("second"), None);
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_set_api_key() {
        let mut session = ChatSession::new();
        assert!(session.set_api_key("  ").is_none());
        assert_eq!(session.messages().len(), 1);

        let confirmation = session.set_api_key("sk-123").cloned().unwrap();
        assert_eq!(confirmation.id, 2);
        assert_eq!(confirmation.text, API_KEY_SET_MESSAGE);
        assert_eq!(session.api_key(), Some("sk-123"));
    }
}

//! Chat message types shared across the Synapse crates.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Roles a conversation entry can carry.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Text typed by the person driving the session.
    Human,
    /// Text generated by the remote model.
    Assistant,
    /// Status and error lines produced by the client itself.
    System,
}

impl ChatRole {
    /// Returns the role name used on the wire by the generation endpoint.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Human => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl Display for ChatRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single entry in the conversation transcript.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    role: ChatRole,
    text: String,
}

impl ChatMessage {
    /// Creates a new transcript entry.
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Convenience constructor for human-authored entries.
    #[must_use]
    pub fn human(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Human, text)
    }

    /// Convenience constructor for model-generated entries.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    /// Convenience constructor for client status and error entries.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(ChatRole::System, text)
    }

    /// Returns the entry role.
    #[must_use]
    pub const fn role(&self) -> ChatRole {
        self.role
    }

    /// Returns the entry text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_endpoint_vocabulary() {
        assert_eq!(ChatRole::Human.wire_name(), "user");
        assert_eq!(ChatRole::Assistant.wire_name(), "assistant");
        assert_eq!(ChatRole::System.wire_name(), "system");
    }

    #[test]
    fn constructors_tag_roles() {
        assert_eq!(ChatMessage::human("hi").role(), ChatRole::Human);
        assert_eq!(ChatMessage::assistant("hi").role(), ChatRole::Assistant);
        assert_eq!(ChatMessage::system("hi").role(), ChatRole::System);
    }

    #[test]
    fn serializes_role_lowercase() {
        let json = serde_json::to_string(&ChatRole::Human).unwrap();
        assert_eq!(json, "\"human\"");
    }
}

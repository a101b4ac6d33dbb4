use serde::{Deserialize, Serialize};

/// Who is speaking in a [`ConversationTurn`]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumIs,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Maps a loosely typed role, as found in caller supplied payloads, onto a `Role`.
    ///
    /// Only `system` and `assistant` are recognized. Anything else, including a missing role,
    /// is the user speaking; unknown roles are never rejected.
    pub fn from_loose(role: Option<&str>) -> Self {
        match role {
            Some("system") => Role::System,
            Some("assistant") => Role::Assistant,
            _ => Role::User,
        }
    }
}

/// A single role tagged message in a conversation.
///
/// Turns are immutable once created; a conversation is an ordered `Vec` of them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn new_system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn new_user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn new_assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.role {
            Role::System => write!(f, "System: \"{}\"", self.content),
            Role::User => write!(f, "User: \"{}\"", self.content),
            Role::Assistant => write!(f, "Assistant: \"{}\"", self.content),
        }
    }
}

impl AsRef<str> for ConversationTurn {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("system"), Role::System ; "system")]
    #[test_case(Some("assistant"), Role::Assistant ; "assistant")]
    #[test_case(Some("user"), Role::User ; "user")]
    #[test_case(Some("weird"), Role::User ; "unknown role falls to user")]
    #[test_case(Some("System"), Role::User ; "roles are case sensitive")]
    #[test_case(Some(""), Role::User ; "empty role")]
    #[test_case(None, Role::User ; "missing role")]
    fn test_role_from_loose(role: Option<&str>, expected: Role) {
        assert_eq!(Role::from_loose(role), expected);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.as_ref(), "user");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ConversationTurn::new_system("be brief").to_string(),
            "System: \"be brief\""
        );
        assert_eq!(
            ConversationTurn::new_assistant("ok").to_string(),
            "Assistant: \"ok\""
        );
    }
}

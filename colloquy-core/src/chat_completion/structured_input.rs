use serde::Deserialize;

use super::conversation_turn::{ConversationTurn, Role};

/// A multi-turn conversation embedded in the input string, i.e.
/// `{"messages": [{"role": "user", "content": "Hi"}]}`.
///
/// Only lives while parsing input; it is expanded into [`ConversationTurn`]s right away.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredInputPayload {
    #[serde(default)]
    messages: Vec<StructuredMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct StructuredMessage {
    #[serde(default)]
    role: Option<String>,
    content: String,
}

impl StructuredInputPayload {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Expands the payload into turns, in order, mapping roles with [`Role::from_loose`]
    pub fn into_turns(self) -> Vec<ConversationTurn> {
        self.messages
            .into_iter()
            .map(|message| {
                ConversationTurn::new(Role::from_loose(message.role.as_deref()), message.content)
            })
            .collect()
    }
}

/// The result of sniffing a raw input string.
///
/// Decoding never fails: anything that is not a non-empty structured payload is plain text.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::EnumIs)]
pub enum ParsedInput<'a> {
    /// Input is empty or whitespace only
    Blank,
    /// Input is sent as a single user turn. Holds the original, untrimmed input.
    PlainText(&'a str),
    /// Input carried a multi-turn payload
    Structured(Vec<ConversationTurn>),
}

impl<'a> ParsedInput<'a> {
    pub fn parse(input: &'a str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return ParsedInput::Blank;
        }

        // Only json objects are sniffed
        if trimmed.starts_with('{') {
            if let Ok(payload) = serde_json::from_str::<StructuredInputPayload>(trimmed) {
                if !payload.is_empty() {
                    return ParsedInput::Structured(payload.into_turns());
                }
            }
        }

        ParsedInput::PlainText(input)
    }

    pub fn into_turns(self) -> Vec<ConversationTurn> {
        match self {
            ParsedInput::Blank => Vec::new(),
            ParsedInput::PlainText(input) => vec![ConversationTurn::new_user(input)],
            ParsedInput::Structured(turns) => turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("" ; "empty")]
    #[test_case("   \n\t" ; "whitespace")]
    fn test_blank(input: &str) {
        assert_eq!(ParsedInput::parse(input), ParsedInput::Blank);
    }

    #[test_case("hello there" ; "prose")]
    #[test_case("  hello there  " ; "padded prose keeps padding")]
    #[test_case(r#"{"foo":"bar"}"# ; "json without messages")]
    #[test_case(r#"{"messages":[]}"# ; "empty messages")]
    #[test_case(r#"{"messages":"nope"}"# ; "messages of the wrong shape")]
    #[test_case(r#"{"messages":[{"role":"user"}]}"# ; "message without content")]
    #[test_case(r#"{"messages":[{"role":"user","content":42}]}"# ; "non string content")]
    #[test_case("{not json at all" ; "broken json")]
    #[test_case(r#"[{"role":"user","content":"A"}]"# ; "json array is not sniffed")]
    fn test_plain_text(input: &str) {
        assert_eq!(ParsedInput::parse(input), ParsedInput::PlainText(input));
    }

    #[test]
    fn test_structured_maps_roles_in_order() {
        let input = r#"{"messages":[
            {"role":"system","content":"A"},
            {"role":"user","content":"B"},
            {"role":"assistant","content":"C"},
            {"role":"weird","content":"D"},
            {"content":"E"}
        ]}"#;

        assert_eq!(
            ParsedInput::parse(input),
            ParsedInput::Structured(vec![
                ConversationTurn::new_system("A"),
                ConversationTurn::new_user("B"),
                ConversationTurn::new_assistant("C"),
                ConversationTurn::new_user("D"),
                ConversationTurn::new_user("E"),
            ])
        );
    }

    #[test]
    fn test_structured_with_surrounding_whitespace_and_extra_fields() {
        let input = "\n  {\"model\":\"ignored\",\"messages\":[{\"role\":\"user\",\"content\":\"hi\",\"name\":\"x\"}]}  ";

        assert_eq!(
            ParsedInput::parse(input).into_turns(),
            vec![ConversationTurn::new_user("hi")]
        );
    }

    #[test]
    fn test_null_role_falls_to_user() {
        let input = r#"{"messages":[{"role":null,"content":"hi"}]}"#;
        assert_eq!(
            ParsedInput::parse(input).into_turns(),
            vec![ConversationTurn::new_user("hi")]
        );
    }
}

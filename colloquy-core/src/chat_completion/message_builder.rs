use crate::util::is_blank;

use super::{conversation_turn::ConversationTurn, structured_input::ParsedInput};

/// Builds the ordered conversation for a single completion call.
///
/// Non-blank `instructions` become a leading system turn. The `input` is then either expanded
/// from a `{"messages": [...]}` payload into multiple turns, or appended as a single user turn
/// holding the original, untrimmed input. The two modes are exclusive. Blank input adds nothing.
///
/// Pure and infallible; identical arguments always produce identical turns.
///
/// # Example
///
/// ```
/// # use colloquy_core::chat_completion::{build_turns, ConversationTurn};
/// let turns = build_turns("Be brief", r#"{"messages":[{"role":"user","content":"Hi"}]}"#);
///
/// assert_eq!(
///     turns,
///     vec![
///         ConversationTurn::new_system("Be brief"),
///         ConversationTurn::new_user("Hi"),
///     ]
/// );
/// ```
pub fn build_turns(instructions: &str, input: &str) -> Vec<ConversationTurn> {
    let mut turns = Vec::new();

    if !is_blank(instructions) {
        turns.push(ConversationTurn::new_system(instructions));
    }

    turns.extend(ParsedInput::parse(input).into_turns());

    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("Summarize", "" ; "empty input")]
    #[test_case("Summarize", "  \n " ; "whitespace input")]
    fn test_only_instructions(instructions: &str, input: &str) {
        assert_eq!(
            build_turns(instructions, input),
            vec![ConversationTurn::new_system(instructions)]
        );
    }

    #[test_case("", "What is the weather?" ; "empty instructions")]
    #[test_case("   ", "What is the weather?" ; "whitespace instructions")]
    #[test_case("", "  padded  " ; "input is not trimmed")]
    fn test_only_plain_input(instructions: &str, input: &str) {
        assert_eq!(
            build_turns(instructions, input),
            vec![ConversationTurn::new_user(input)]
        );
    }

    #[test]
    fn test_instructions_are_kept_verbatim() {
        let turns = build_turns("  Be brief\n", "Hi");

        assert_eq!(
            turns,
            vec![
                ConversationTurn::new_system("  Be brief\n"),
                ConversationTurn::new_user("Hi"),
            ]
        );
    }

    #[test]
    fn test_both_blank_is_empty() {
        assert!(build_turns("", "").is_empty());
        assert!(build_turns(" ", "\t").is_empty());
    }

    #[test]
    fn test_multi_turn_does_not_append_plain_text_turn() {
        let input = r#"{"messages":[{"role":"system","content":"A"},{"role":"user","content":"B"},{"role":"assistant","content":"C"},{"role":"weird","content":"D"}]}"#;

        assert_eq!(
            build_turns("", input),
            vec![
                ConversationTurn::new_system("A"),
                ConversationTurn::new_user("B"),
                ConversationTurn::new_assistant("C"),
                ConversationTurn::new_user("D"),
            ]
        );
    }

    #[test]
    fn test_multi_turn_follows_instructions() {
        let input = r#"{"messages":[{"role":"user","content":"B"}]}"#;

        assert_eq!(
            build_turns("Be nice", input),
            vec![
                ConversationTurn::new_system("Be nice"),
                ConversationTurn::new_user("B"),
            ]
        );
    }

    #[test]
    fn test_undecodable_json_falls_back_to_plain_text() {
        let input = r#"{"foo":"bar"}"#;

        assert_eq!(
            build_turns("", input),
            vec![ConversationTurn::new_user(input)]
        );
    }

    #[test]
    fn test_is_idempotent() {
        let input = r#"{"messages":[{"role":"user","content":"B"},{"role":"assistant","content":"C"}]}"#;

        assert_eq!(build_turns("X", input), build_turns("X", input));
        assert_eq!(build_turns("X", "plain"), build_turns("X", "plain"));
    }
}

/// Placeholder token standing for the image in the prompt.
pub const IMAGE_TOKEN: &str = "<image>";

/// Delimiter separating the model's reply from the rest of the conversation.
pub const ASSISTANT_MARKER: &str = "ASSISTANT:";

/// Returned in place of a story when the decoded output has no assistant marker.
pub const PARSE_FALLBACK: &str = "Could not parse the model's response.";

/// Wraps an instruction into the single-turn chat template.
///
/// The instruction is inserted verbatim, without any validation.
pub fn format_prompt(instruction: &str) -> String {
    format!("USER: {IMAGE_TOKEN}\n{instruction}\n{ASSISTANT_MARKER}")
}

/// Returns the trimmed text following the last assistant marker, if any.
pub fn extract_reply(decoded: &str) -> Option<&str> {
    decoded
        .rfind(ASSISTANT_MARKER)
        .map(|pos| decoded[pos + ASSISTANT_MARKER.len()..].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_instruction() {
        let prompt = format_prompt("describe this");
        assert_eq!(prompt, "USER: <image>\ndescribe this\nASSISTANT:");
    }

    #[test]
    fn prompt_keeps_instruction_verbatim() {
        let instruction = "  tell me\nabout {this} bowl: ASSISTANT ";
        let prompt = format_prompt(instruction);
        let body = prompt
            .strip_prefix("USER: <image>\n")
            .and_then(|rest| rest.strip_suffix("\nASSISTANT:"));
        assert_eq!(body, Some(instruction));
    }

    #[test]
    fn reply_after_marker_is_trimmed() {
        let decoded = "USER: \ndescribe this\nASSISTANT:   A handcrafted bowl.\n";
        assert_eq!(extract_reply(decoded), Some("A handcrafted bowl."));
    }

    #[test]
    fn reply_uses_last_marker() {
        let decoded = "USER: hi\nASSISTANT: first\nUSER: again\nASSISTANT: second ";
        assert_eq!(extract_reply(decoded), Some("second"));
    }

    #[test]
    fn reply_can_be_empty() {
        assert_eq!(extract_reply("USER: hi\nASSISTANT:"), Some(""));
    }

    #[test]
    fn missing_marker() {
        assert_eq!(extract_reply("a story without any delimiter"), None);
        assert_eq!(extract_reply(""), None);
    }
}

use serde_json::Value as JsonValue;

/// Best-effort recovery of the booking payload embedded in an assistant
/// reply. `None` means the conversation is still in progress; a reply
/// with no payload is never an error.
pub fn extract(text: &str) -> Option<JsonValue> {
    if let Some(block) = fenced_json_block(text) {
        if let Some(value) = parse_object(block) {
            return Some(value);
        }
    }

    let start = text.find('{')?;
    let candidate = &text[start..];
    let region = balanced_region(candidate).unwrap_or(candidate);
    parse_object(region)
}

fn parse_object(text: &str) -> Option<JsonValue> {
    match serde_json::from_str::<JsonValue>(text.trim()) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}

/// Contents of the first ```json fence, if the reply carries one.
fn fenced_json_block(text: &str) -> Option<&str> {
    let opened = text.find("```json")?;
    let body = &text[opened + "```json".len()..];
    let closed = body.find("```")?;
    Some(&body[..closed])
}

/// The substring from the leading `{` through its matching close brace,
/// skipping braces inside string literals. `None` if the braces never
/// balance before end of input.
fn balanced_region(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, character) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == '"' {
                in_string = false;
            }
            continue;
        }
        match character {
            '"' => {
                in_string = true;
            }
            '{' => {
                depth += 1;
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..index + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_without_brace_extracts_nothing() {
        assert_eq!(extract("Let's continue, what date works?"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn trailing_object_after_prose_is_extracted() {
        let reply = r#"Sure, here it is: {"intent":"create_booking","payload":{"location":"NYC"}}"#;
        let payload = extract(reply).unwrap();
        assert_eq!(
            payload,
            json!({"intent": "create_booking", "payload": {"location": "NYC"}})
        );
    }

    #[test]
    fn simple_suffix_object_is_extracted() {
        assert_eq!(extract(r#"done {"a":1}"#), Some(json!({"a": 1})));
    }

    #[test]
    fn invalid_json_after_brace_extracts_nothing() {
        assert_eq!(extract("I opened a { and never closed it"), None);
        assert_eq!(extract(r#"almost: {"intent": "create_booking"#), None);
    }

    #[test]
    fn trailing_prose_after_the_object_is_tolerated() {
        let reply = r#"{"intent":"cancel","payload":{}} Let me know if you change your mind."#;
        let payload = extract(reply).unwrap();
        assert_eq!(payload["intent"], "cancel");
    }

    #[test]
    fn nested_objects_and_braces_in_strings_are_handled() {
        let reply = r#"Booked! {"intent":"update_booking","payload":{"note":"room {A}","duration":"2h"}} All set."#;
        let payload = extract(reply).unwrap();
        assert_eq!(payload["payload"]["note"], "room {A}");
    }

    #[test]
    fn fenced_json_block_wins_over_earlier_braces() {
        let reply = "Use {curly} syntax.\n```json\n{\"intent\":\"delete_booking\",\"payload\":{\"booking_id\":\"b-7\"}}\n```";
        let payload = extract(reply).unwrap();
        assert_eq!(payload["payload"]["booking_id"], "b-7");
    }

    #[test]
    fn non_object_json_extracts_nothing() {
        assert_eq!(extract("count: [1, 2, 3]"), None);
    }
}

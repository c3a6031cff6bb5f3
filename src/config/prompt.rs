use log::info;
use std::error::Error;
use std::fmt;
use std::fs;

/// Instructional preamble sent as the first turn of every conversation.
/// Language restriction and field collection live here as prompt content;
/// nothing in the code enforces them.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a conversational booking assistant for shared workspaces.

You speak English and Dutch only. Detect which of the two the user prefers
and hold the entire conversation in that language. If the user writes in
any other language, reply that you support only English and Dutch.

You can help with these intents:
- create_booking
- update_booking
- delete_booking
- cancel

Ask natural follow-up questions and collect missing details one step at a
time. Do not emit the final structured payload until every required detail
has been provided.

Details you collect:
- booking_id (for update or delete)
- space_type (desk, room, parking)
- location
- date
- time
- duration
- amenities

If the user indicates they no longer want to book, cancel the flow and
respond politely.

Once all required details are collected, end your reply with a JSON object
of this shape:
{
  \"intent\": \"create_booking\",
  \"payload\": {
    \"location\": \"...\",
    \"space_type\": \"...\",
    ...
  }
}
";

#[derive(Debug)]
pub enum PromptError {
    IoError(std::io::Error),
    EmptyPrompt(String),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::IoError(e) => write!(f, "Prompt file IO error: {}", e),
            PromptError::EmptyPrompt(path) => {
                write!(f, "Prompt file '{}' is empty", path)
            }
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err)
    }
}

/// Loads the system prompt, preferring a configured file over the
/// built-in default. An unreadable or empty override file is fatal.
pub fn load_system_prompt(path: Option<&str>) -> Result<String, PromptError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                return Err(PromptError::EmptyPrompt(path.to_string()));
            }
            info!("System prompt loaded from '{}'", path);
            Ok(content)
        }
        None => Ok(DEFAULT_SYSTEM_PROMPT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_prompt_names_the_supported_intents() {
        let prompt = load_system_prompt(None).unwrap();
        for intent in ["create_booking", "update_booking", "delete_booking", "cancel"] {
            assert!(prompt.contains(intent), "missing intent {}", intent);
        }
    }

    #[test]
    fn override_file_replaces_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "You only book parking spots.").unwrap();

        let prompt = load_system_prompt(path.to_str()).unwrap();
        assert!(prompt.contains("parking spots"));
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let result = load_system_prompt(Some("/nonexistent/prompt.txt"));
        assert!(matches!(result, Err(PromptError::IoError(_))));
    }

    #[test]
    fn empty_override_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::File::create(&path).unwrap();

        let result = load_system_prompt(path.to_str());
        assert!(matches!(result, Err(PromptError::EmptyPrompt(_))));
    }
}

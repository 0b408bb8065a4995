// ai.rs - Text Generation Command
// Continues a prompt with the language model and keeps only the first line.
//
// Supports:
//   - ai <prompt>
//   - ai <temperature> <prompt>   (temperature like 0.9 or 1)
//
// Flow: placeholder "working !", generate, edit the placeholder. Any failure
// after the placeholder sends a separate "error !" message.

use crate::error::BotError;
use crate::generation::{GenerationParams, TextGenerator, DEFAULT_TEMPERATURE};
use crate::messenger::{ChannelRef, Messenger, PLACEHOLDER};

pub const ERROR_REPLY: &str = "error !";

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub temperature: f32,
    pub text: String,
}

pub async fn run(
    generator: &dyn TextGenerator,
    messenger: &dyn Messenger,
    channel: ChannelRef,
    text: &str,
) -> Result<(), BotError> {
    let prompt = parse_prompt(text)?;
    log::info!(
        "[AI] Generating at temperature {} for prompt '{}'",
        prompt.temperature,
        prompt.text
    );

    let placeholder = messenger.send(channel, PLACEHOLDER).await?;

    let params = GenerationParams::with_temperature(prompt.temperature);
    let result = match generator.generate(&prompt.text, &params).await {
        Ok(generated) => messenger.edit(&placeholder, &first_line(&generated)).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::error!("[AI] Generation failed: {}", e);
        messenger.send(channel, ERROR_REPLY).await?;
    }
    Ok(())
}

/// Split `ai [temperature] prompt`. A leading number is only taken as the
/// temperature when a prompt follows it.
pub fn parse_prompt(text: &str) -> Result<Prompt, BotError> {
    let parts: Vec<&str> = text.splitn(3, ' ').collect();
    if let [_, temperature, prompt] = parts.as_slice() {
        if is_decimal(temperature) {
            if let Ok(temperature) = temperature.parse::<f32>() {
                return Ok(Prompt {
                    temperature,
                    text: prompt.to_string(),
                });
            }
        }
    }

    let (_, prompt) = text.split_once(' ').ok_or(BotError::MissingText("ai"))?;
    Ok(Prompt {
        temperature: DEFAULT_TEMPERATURE,
        text: prompt.to_string(),
    })
}

// Digits with at most one decimal point: "1", "0.9", ".5", "5."
fn is_decimal(token: &str) -> bool {
    let digits = token.replacen('.', "", 1);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Text up to the first newline; literal `\n` sequences count as newlines
pub fn first_line(generated: &str) -> String {
    let normalized = generated.replace("\\n", "\n");
    normalized.split('\n').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messenger::recording::{Outgoing, RecordingMessenger};
    use crate::testing::StubGenerator;

    #[test]
    fn test_prompt_with_temperature() {
        assert_eq!(
            parse_prompt("ai 0.9 once upon a time").unwrap(),
            Prompt {
                temperature: 0.9,
                text: "once upon a time".to_string()
            }
        );
        assert_eq!(parse_prompt("ai 2 hello").unwrap().temperature, 2.0);
        assert_eq!(parse_prompt("ai .5 hello").unwrap().temperature, 0.5);
    }

    #[test]
    fn test_prompt_without_temperature() {
        let prompt = parse_prompt("ai once upon a time").unwrap();
        assert_eq!(prompt.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(prompt.text, "once upon a time");

        // a lone number is the prompt itself
        assert_eq!(parse_prompt("ai 0.9").unwrap().text, "0.9");
        // not a number
        assert_eq!(parse_prompt("ai 1.2.3 go").unwrap().text, "1.2.3 go");
        assert_eq!(parse_prompt("ai -1 go").unwrap().text, "-1 go");
    }

    #[test]
    fn test_prefix_words_keep_their_tail() {
        assert_eq!(parse_prompt("air is nice").unwrap().text, "is nice");
    }

    #[test]
    fn test_bare_keyword_has_no_prompt() {
        assert!(matches!(parse_prompt("ai"), Err(BotError::MissingText("ai"))));
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("hello world\nsecond"), "hello world");
        assert_eq!(first_line("hello\\nsecond"), "hello");
        assert_eq!(first_line("single"), "single");
        assert_eq!(first_line(""), "");
    }

    #[tokio::test]
    async fn test_placeholder_is_edited_to_first_line() {
        let generator = StubGenerator::replying(" there was a cat\\nthe end");
        let messenger = RecordingMessenger::new();
        run(&generator, &messenger, ChannelRef(5), "ai 1.5 once upon a time").await.unwrap();

        assert_eq!(
            messenger.outgoing(),
            vec![
                Outgoing::Sent {
                    id: 1,
                    text: PLACEHOLDER.to_string()
                },
                Outgoing::Edited {
                    id: 1,
                    text: "once upon a time there was a cat".to_string()
                },
            ]
        );

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "once upon a time");
        assert_eq!(calls[0].1, GenerationParams::with_temperature(1.5));
    }

    #[tokio::test]
    async fn test_generation_failure_sends_separate_error() {
        let generator = StubGenerator::failing();
        let messenger = RecordingMessenger::new();
        run(&generator, &messenger, ChannelRef(5), "ai hello").await.unwrap();
        assert_eq!(
            messenger.visible(),
            vec![PLACEHOLDER.to_string(), ERROR_REPLY.to_string()]
        );
    }

    #[tokio::test]
    async fn test_edit_failure_sends_separate_error() {
        let generator = StubGenerator::replying(" world");
        let messenger = RecordingMessenger::failing_edits();
        run(&generator, &messenger, ChannelRef(5), "ai hello").await.unwrap();
        assert_eq!(
            messenger.visible(),
            vec![PLACEHOLDER.to_string(), ERROR_REPLY.to_string()]
        );
    }

    #[tokio::test]
    async fn test_bare_keyword_sends_nothing() {
        let generator = StubGenerator::replying(" world");
        let messenger = RecordingMessenger::new();
        assert!(run(&generator, &messenger, ChannelRef(5), "ai").await.is_err());
        assert!(messenger.outgoing().is_empty());
        assert!(generator.calls.lock().unwrap().is_empty());
    }
}

// compare.rs - Compare Command
// Wu-Palmer similarity between the first senses of two words, as a percentage.
//
// Supports:
//   - compare <word1> <word2>
//
// Any failure while parsing or looking up is reported back with a usage hint.

use crate::commands::{format_float, round3};
use crate::error::BotError;
use crate::lexicon::LexicalDatabase;
use crate::messenger::{ChannelRef, Messenger};

pub const UNKNOWN_WORD_REPLY: &str = "i dont know one of those words";
pub const USAGE: &str = "use: compare word1 word2";

pub async fn run(
    lexicon: &dyn LexicalDatabase,
    messenger: &dyn Messenger,
    channel: ChannelRef,
    text: &str,
) -> Result<(), BotError> {
    let reply = match compare(lexicon, text) {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("[COMPARE] '{}' failed: {}", text, e);
            format!("{}\n{}", USAGE, e)
        }
    };
    messenger.send(channel, &reply).await?;
    Ok(())
}

/// Reply for a normalized `compare word1 word2` message
pub fn compare(lexicon: &dyn LexicalDatabase, text: &str) -> Result<String, BotError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [_, first, second] = tokens.as_slice() else {
        return Err(BotError::WrongArity(tokens.len()));
    };

    let first = lexicon.first_sense(first)?;
    let second = lexicon.first_sense(second)?;
    let (Some(a), Some(b)) = (first, second) else {
        return Ok(UNKNOWN_WORD_REPLY.to_string());
    };

    Ok(match lexicon.similarity(&a, &b) {
        Some(similarity) => format!(
            "similarity between \"{}\" and \"{}\": {}%",
            a.lemma_name(),
            b.lemma_name(),
            format_float(round3(similarity * 100.0))
        ),
        None => format!(
            "no similarity found between \"{}\" and \"{}\"",
            a.lemma_name(),
            b.lemma_name()
        ),
    })
}

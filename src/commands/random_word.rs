// random_word.rs - Random Word Command
// Picks a word from the static list and replies with its first sense: lemma,
// definition, first example (if any) and similarity to the reference word.
//
// Supports:
//   - random word

use crate::commands::{format_float, round3};
use crate::error::BotError;
use crate::lexicon::LexicalDatabase;
use crate::messenger::{ChannelRef, Messenger};
use crate::router::ReferenceSense;
use crate::words::WordList;

pub async fn run(
    words: &WordList,
    lexicon: &dyn LexicalDatabase,
    reference: &ReferenceSense,
    messenger: &dyn Messenger,
    channel: ChannelRef,
) -> Result<(), BotError> {
    let word = pick_word(words);
    log::debug!("[RANDOM_WORD] Picked {:?}", word);

    // An unknown word gives an empty reply
    let reply = describe(lexicon, reference, word.as_deref())?;
    messenger.send(channel, &reply).await?;
    Ok(())
}

fn pick_word(words: &WordList) -> Option<String> {
    words.pick(&mut rand::thread_rng()).map(str::to_string)
}

/// Reply text for `word`; empty when the word has no sense
pub fn describe(
    lexicon: &dyn LexicalDatabase,
    reference: &ReferenceSense,
    word: Option<&str>,
) -> Result<String, BotError> {
    let sense = match word {
        Some(word) => lexicon.first_sense(word)?,
        None => None,
    };
    let Some(sense) = sense else {
        return Ok(String::new());
    };

    let similarity = lexicon
        .similarity(&sense, &reference.sense)
        .ok_or_else(|| BotError::NoSimilarity(sense.name.clone(), reference.sense.name.clone()))?;

    let mut reply = format!("{}\n{}\n", sense.lemma_name(), sense.definition);
    if let Some(example) = sense.examples.first() {
        reply.push_str(example);
        reply.push('\n');
    }
    reply.push_str(&format!(
        "similarity to \"{}:\" {}",
        reference.word,
        format_float(round3(similarity))
    ));
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::wordnet::fixture;
    use crate::messenger::recording::RecordingMessenger;

    fn reference(wn: &dyn LexicalDatabase) -> ReferenceSense {
        ReferenceSense::resolve(wn, "spain").unwrap()
    }

    #[test]
    fn test_word_with_example() {
        let wn = fixture::wordnet();
        let reply = describe(&wn, &reference(&wn), Some("cat")).unwrap();
        assert_eq!(
            reply,
            "cat\nfeline mammal usually having thick soft fur\nthe cat sat on the mat\nsimilarity to \"spain:\" 0.286"
        );
    }

    #[test]
    fn test_example_line_is_omitted_when_missing() {
        let wn = fixture::wordnet();
        let reply = describe(&wn, &reference(&wn), Some("fox")).unwrap();
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "fox");
        assert_eq!(lines[1], "alert carnivorous mammal");
        assert!(lines[2].starts_with("similarity to \"spain:\" "));
    }

    #[test]
    fn test_reference_word_against_itself() {
        let wn = fixture::wordnet();
        let reply = describe(&wn, &reference(&wn), Some("spain")).unwrap();
        assert!(reply.starts_with("Spain\n"));
        assert!(reply.ends_with("similarity to \"spain:\" 1.0"));
    }

    #[test]
    fn test_unknown_word_gives_empty_reply() {
        let wn = fixture::wordnet();
        assert_eq!(describe(&wn, &reference(&wn), Some("zzword")).unwrap(), "");
        assert_eq!(describe(&wn, &reference(&wn), None).unwrap(), "");
    }

    #[tokio::test]
    async fn test_run_sends_single_message() {
        let wn = fixture::wordnet();
        let reference = reference(&wn);
        let words = WordList::parse("cat\ndog\nfox");
        let messenger = RecordingMessenger::new();

        run(&words, &wn, &reference, &messenger, ChannelRef(9)).await.unwrap();

        let visible = messenger.visible();
        assert_eq!(visible.len(), 1);
        assert!(["cat\n", "dog\n", "fox\n"].iter().any(|p| visible[0].starts_with(p)));
    }
}

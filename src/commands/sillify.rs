// sillify.rs - Sillify Command
// Replaces each word with a random synonym from its first sense.
//
// Supports:
//   - sillify <sentence>
//
// Flow: placeholder "working !" first, then the placeholder is edited to the
// result, or to "lie (<error>)" when anything fails.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::BotError;
use crate::lexicon::LexicalDatabase;
use crate::messenger::{ChannelRef, Messenger, PLACEHOLDER};

pub async fn run(
    lexicon: &dyn LexicalDatabase,
    messenger: &dyn Messenger,
    channel: ChannelRef,
    text: &str,
) -> Result<(), BotError> {
    let placeholder = messenger.send(channel, PLACEHOLDER).await?;

    let result = match sentence(text) {
        Ok(words) => sillify(lexicon, words),
        Err(e) => Err(e),
    };
    let result = match result {
        Ok(silly) => messenger.edit(&placeholder, &silly).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::warn!("[SILLIFY] '{}' failed: {}", text, e);
        messenger.edit(&placeholder, &format!("lie ({})", e)).await?;
    }
    Ok(())
}

/// Everything after the first space
fn sentence(text: &str) -> Result<&str, BotError> {
    text.split_once(' ')
        .map(|(_, rest)| rest)
        .ok_or(BotError::MissingText("sillify"))
}

fn sillify(lexicon: &dyn LexicalDatabase, words: &str) -> Result<String, BotError> {
    sillify_with(lexicon, words, &mut rand::thread_rng())
}

/// Swap every space-separated word for a random alternate lemma of its first
/// sense. Words without senses or alternates are kept.
pub fn sillify_with<R: Rng + ?Sized>(
    lexicon: &dyn LexicalDatabase,
    words: &str,
    rng: &mut R,
) -> Result<String, BotError> {
    let mut out = Vec::new();
    for word in words.split(' ') {
        let replacement = match lexicon.first_sense(word)? {
            Some(sense) => sense.alternate_lemmas().choose(rng).cloned(),
            None => None,
        };
        out.push(replacement.unwrap_or_else(|| word.to_string()));
    }
    Ok(out.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::wordnet::fixture;
    use crate::messenger::recording::{Outgoing, RecordingMessenger};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_words_with_synonyms_are_swapped() {
        let wn = fixture::wordnet();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            sillify_with(&wn, "the quick fox", &mut rng).unwrap(),
            "the speedy fox"
        );
    }

    #[test]
    fn test_only_alternate_lemmas_are_used() {
        let wn = fixture::wordnet();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = sillify_with(&wn, "dog cat", &mut rng).unwrap();
            let tokens: Vec<&str> = out.split(' ').collect();
            assert!(["domestic_dog", "Canis_familiaris"].contains(&tokens[0]), "{}", out);
            assert_eq!(tokens[1], "true_cat");
        }
    }

    #[test]
    fn test_token_count_is_preserved() {
        let wn = fixture::wordnet();
        let mut rng = StdRng::seed_from_u64(7);
        for input in ["the quick fox", "zzz", "run  dog", "cat dog fox spain quick"] {
            let out = sillify_with(&wn, input, &mut rng).unwrap();
            assert_eq!(out.split(' ').count(), input.split(' ').count(), "{}", input);
        }
    }

    #[tokio::test]
    async fn test_placeholder_then_edit() {
        let wn = fixture::wordnet();
        let messenger = RecordingMessenger::new();
        run(&wn, &messenger, ChannelRef(3), "sillify the quick fox").await.unwrap();

        assert_eq!(
            messenger.outgoing(),
            vec![
                Outgoing::Sent {
                    id: 1,
                    text: PLACEHOLDER.to_string()
                },
                Outgoing::Edited {
                    id: 1,
                    text: "the speedy fox".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_text_is_edited_in_as_lie() {
        let wn = fixture::wordnet();
        let messenger = RecordingMessenger::new();
        run(&wn, &messenger, ChannelRef(3), "sillify").await.unwrap();
        assert_eq!(
            messenger.visible(),
            vec!["lie (missing text after 'sillify')".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_edits_propagate() {
        let wn = fixture::wordnet();
        let messenger = RecordingMessenger::failing_edits();
        assert!(run(&wn, &messenger, ChannelRef(3), "sillify the fox").await.is_err());
        assert_eq!(messenger.visible(), vec![PLACEHOLDER.to_string()]);
    }
}

// lexicon/mod.rs - Lexical Database Module
// Word senses (synsets), their lemmas, definitions and examples, and the
// pairwise similarity between two senses.
//
// Key Features:
// - LexicalDatabase trait so handlers never depend on a concrete backend
// - WordNet backend reading the standard dict/ files
// - Morphological reduction ("cats" -> "cat") before lookup
//
// Used by: commands/random_word.rs, commands/compare.rs, commands/sillify.rs, main.rs

pub mod morphy;
pub mod wordnet;

use std::fmt;

use thiserror::Error;

pub use wordnet::WordNet;

/// Part of speech of a sense, using WordNet's one-letter tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl Pos {
    /// Lookup order used when no part of speech is requested
    pub const LOOKUP_ORDER: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    pub fn from_tag(tag: &str) -> Option<Pos> {
        match tag {
            "n" => Some(Pos::Noun),
            "v" => Some(Pos::Verb),
            "a" => Some(Pos::Adjective),
            "s" => Some(Pos::AdjectiveSatellite),
            "r" => Some(Pos::Adverb),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Pos::Noun => "n",
            Pos::Verb => "v",
            Pos::Adjective => "a",
            Pos::AdjectiveSatellite => "s",
            Pos::Adverb => "r",
        }
    }

    /// The data/index file a sense of this part of speech lives in.
    /// Satellites share the adjective files.
    pub fn file_pos(self) -> Pos {
        match self {
            Pos::AdjectiveSatellite => Pos::Adjective,
            other => other,
        }
    }

    /// File name suffix: data.noun, index.verb, adj.exc ...
    pub fn file_suffix(self) -> &'static str {
        match self.file_pos() {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adverb => "adv",
            _ => "adj",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// One meaning of a word: a synset with its lemmas, definition and examples
#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    pub(crate) id: usize,
    pub name: String,
    pub pos: Pos,
    pub lemma_names: Vec<String>,
    pub definition: String,
    pub examples: Vec<String>,
}

impl Sense {
    /// Canonical lemma naming this sense
    pub fn lemma_name(&self) -> &str {
        self.lemma_names.first().map(String::as_str).unwrap_or("")
    }

    /// Lemmas beyond the canonical one (synonyms)
    pub fn alternate_lemmas(&self) -> &[String] {
        self.lemma_names.get(1..).unwrap_or(&[])
    }
}

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file} line {line}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("no synset at offset {offset} in {pos} data")]
    MissingSynset { pos: Pos, offset: u32 },
}

/// Read-only lexical database shared by all handlers
pub trait LexicalDatabase: Send + Sync {
    /// Senses of `word`, most common first. Empty when the word is unknown.
    fn lookup(&self, word: &str) -> Result<Vec<Sense>, LexiconError>;

    /// Taxonomic similarity in [0, 1]; `None` when the senses share no subsumer.
    fn similarity(&self, a: &Sense, b: &Sense) -> Option<f64>;

    fn first_sense(&self, word: &str) -> Result<Option<Sense>, LexiconError> {
        Ok(self.lookup(word)?.into_iter().next())
    }
}

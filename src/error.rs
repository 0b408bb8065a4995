// error.rs - Error Types
// Per-message faults raised by the router and its handlers, and startup
// configuration errors.
//
// Used by: every command module, config.rs, main.rs

use thiserror::Error;

use crate::lexicon::LexiconError;

/// Faults that end the handling of a single message.
/// The event handler logs them; they never stop the bot.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("expected 3 words, got {0}")]
    WrongArity(usize),

    #[error("missing text after '{0}'")]
    MissingText(&'static str),

    #[error("no similarity between \"{0}\" and \"{1}\"")]
    NoSimilarity(String, String),

    #[error("{0} is not enabled")]
    FeatureDisabled(&'static str),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image search returned no results")]
    NoImage,

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not found in any expected location (., .., ../.., src/)")]
    FileNotFound(&'static str),

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0} is set to a placeholder value")]
    Placeholder(&'static str),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("reference word '{0}' has no lexical sense")]
    UnknownReference(String),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

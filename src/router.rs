// router.rs - Command Router
// Normalizes each incoming message, picks at most one command from an ordered
// table of keyword predicates, and runs it against the injected collaborators.
//
// Key Features:
// - First match wins; a message never reaches a later rule
// - Predicates are plain substring/prefix tests on trimmed, lower-cased text
// - Optional features (ai, analyze) drop their rules entirely when disabled
// - The bot's own messages are ignored before routing
//
// Used by: main.rs (event handler)

use std::fmt;
use std::sync::Arc;

use crate::commands;
use crate::error::{BotError, ConfigError};
use crate::generation::TextGenerator;
use crate::image::ImageSource;
use crate::lexicon::{LexicalDatabase, Sense};
use crate::messenger::{ChannelRef, Messenger};
use crate::sentiment::SentimentScorer;
use crate::words::WordList;

// ============================================================================
// ROUTING TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RandomWord,
    Compare,
    Sillify,
    TextGeneration,
    Sentiment,
    RandomImage,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::RandomWord => "random word",
            Command::Compare => "compare",
            Command::Sillify => "sillify",
            Command::TextGeneration => "ai",
            Command::Sentiment => "analyze",
            Command::RandomImage => "random car",
        }
    }

    fn enabled(self, features: &Features) -> bool {
        match self {
            Command::TextGeneration => features.text_generation,
            Command::Sentiment => features.sentiment,
            _ => true,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional commands; the rest are always on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub text_generation: bool,
    pub sentiment: bool,
}

impl Features {
    pub fn basic() -> Self {
        Self {
            text_generation: false,
            sentiment: false,
        }
    }

    pub fn extended() -> Self {
        Self {
            text_generation: true,
            sentiment: true,
        }
    }
}

pub struct Route {
    pub command: Command,
    pub matches: fn(&str) -> bool,
}

fn is_random_word(text: &str) -> bool {
    text.contains("random word")
}

fn is_compare(text: &str) -> bool {
    text.contains("compare ")
}

fn is_sillify(text: &str) -> bool {
    text.contains("sillify ")
}

// Prefix test, so "air", "aim" and friends match too
fn is_text_generation(text: &str) -> bool {
    text.starts_with("ai")
}

fn is_sentiment(text: &str) -> bool {
    text.contains("analyze ")
}

// Historical keyword; it fetches a cat picture
fn is_random_image(text: &str) -> bool {
    text.contains("random car")
}

/// Rules in priority order
pub const ROUTES: [Route; 6] = [
    Route {
        command: Command::RandomWord,
        matches: is_random_word,
    },
    Route {
        command: Command::Compare,
        matches: is_compare,
    },
    Route {
        command: Command::Sillify,
        matches: is_sillify,
    },
    Route {
        command: Command::TextGeneration,
        matches: is_text_generation,
    },
    Route {
        command: Command::Sentiment,
        matches: is_sentiment,
    },
    Route {
        command: Command::RandomImage,
        matches: is_random_image,
    },
];

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// First enabled command whose predicate matches the normalized text
pub fn route(normalized: &str, features: &Features) -> Option<Command> {
    ROUTES
        .iter()
        .filter(|r| r.command.enabled(features))
        .find(|r| (r.matches)(normalized))
        .map(|r| r.command)
}

// ============================================================================
// COLLABORATORS
// ============================================================================

/// A message delivered by the chat platform
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author_id: u64,
    pub channel: ChannelRef,
    pub content: String,
}

/// First sense of the word random words are compared against
#[derive(Debug, Clone)]
pub struct ReferenceSense {
    pub word: String,
    pub sense: Sense,
}

impl ReferenceSense {
    /// Fails at startup if the word has no sense
    pub fn resolve(lexicon: &dyn LexicalDatabase, word: &str) -> Result<Self, ConfigError> {
        let sense = lexicon
            .first_sense(word)?
            .ok_or_else(|| ConfigError::UnknownReference(word.to_string()))?;
        Ok(Self {
            word: word.to_string(),
            sense,
        })
    }
}

/// Everything the handlers read; built once in main and shared read-only
pub struct Services {
    pub words: WordList,
    pub lexicon: Arc<dyn LexicalDatabase>,
    pub reference: ReferenceSense,
    pub images: Arc<dyn ImageSource>,
    pub sentiment: Option<Arc<dyn SentimentScorer>>,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

// ============================================================================
// ROUTER
// ============================================================================

pub struct Router {
    features: Features,
    services: Services,
}

impl Router {
    pub fn new(features: Features, services: Services) -> Result<Self, ConfigError> {
        if features.text_generation && services.generator.is_none() {
            return Err(ConfigError::Missing("text generator for the ai command"));
        }
        if features.sentiment && services.sentiment.is_none() {
            return Err(ConfigError::Missing("sentiment scorer for the analyze command"));
        }
        Ok(Self { features, services })
    }

    pub fn features(&self) -> Features {
        self.features
    }

    /// Route and handle one message. Returns the command that ran, or `None`
    /// when the message was ignored or matched nothing.
    pub async fn handle(
        &self,
        message: &IncomingMessage,
        bot_id: u64,
        messenger: &dyn Messenger,
    ) -> Result<Option<Command>, BotError> {
        if message.author_id == bot_id {
            return Ok(None);
        }

        let text = normalize(&message.content);
        let Some(command) = route(&text, &self.features) else {
            return Ok(None);
        };

        let request_id = uuid::Uuid::new_v4();
        log::info!(
            "[ROUTER] {} -> '{}' (author {}, channel {})",
            request_id,
            command,
            message.author_id,
            message.channel.0
        );

        let services = &self.services;
        let channel = message.channel;
        let result = match command {
            Command::RandomWord => {
                commands::random_word::run(
                    &services.words,
                    services.lexicon.as_ref(),
                    &services.reference,
                    messenger,
                    channel,
                )
                .await
            }
            Command::Compare => {
                commands::compare::run(services.lexicon.as_ref(), messenger, channel, &text).await
            }
            Command::Sillify => {
                commands::sillify::run(services.lexicon.as_ref(), messenger, channel, &text).await
            }
            Command::TextGeneration => {
                let generator = services
                    .generator
                    .as_deref()
                    .ok_or(BotError::FeatureDisabled("ai"))?;
                commands::ai::run(generator, messenger, channel, &text).await
            }
            Command::Sentiment => {
                let scorer = services
                    .sentiment
                    .as_deref()
                    .ok_or(BotError::FeatureDisabled("analyze"))?;
                commands::analyze::run(scorer, messenger, channel, &text).await
            }
            Command::RandomImage => {
                commands::random_cat::run(services.images.as_ref(), messenger, channel).await
            }
        };

        match &result {
            Ok(()) => log::debug!("[ROUTER] {} '{}' completed", request_id, command),
            Err(e) => log::error!("[ROUTER] {} '{}' failed: {}", request_id, command, e),
        }
        result.map(|()| Some(command))
    }
}

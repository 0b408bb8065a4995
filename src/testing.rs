// testing.rs - Test Doubles
// Stub collaborators and a fixture-backed router for handler and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::BotError;
use crate::generation::{GenerationParams, TextGenerator};
use crate::image::ImageSource;
use crate::lexicon::wordnet::fixture;
use crate::router::{Features, ReferenceSense, Router, Services};
use crate::sentiment::{SentimentScorer, SentimentScores};
use crate::words::WordList;

pub const CAT_URL: &str = "https://cdn2.thecatapi.com/images/abc.jpg";

pub struct StubImages {
    fail: bool,
}

impl StubImages {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ImageSource for StubImages {
    async fn random_image_url(&self) -> Result<String, BotError> {
        if self.fail {
            Err(BotError::NoImage)
        } else {
            Ok(CAT_URL.to_string())
        }
    }
}

/// Returns a canned continuation and remembers what it was asked
pub struct StubGenerator {
    continuation: Option<String>,
    pub calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl StubGenerator {
    pub fn replying(continuation: &str) -> Self {
        Self {
            continuation: Some(continuation.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            continuation: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BotError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), params.clone()));
        match &self.continuation {
            Some(text) => Ok(format!("{}{}", prompt, text)),
            None => Err(BotError::Generation("model unavailable".to_string())),
        }
    }
}

pub struct StubScorer(pub SentimentScores);

impl SentimentScorer for StubScorer {
    fn score(&self, _text: &str) -> SentimentScores {
        self.0
    }
}

pub fn scores() -> SentimentScores {
    SentimentScores {
        negative: 0.0,
        neutral: 0.256,
        positive: 0.744,
        compound: 0.5719,
    }
}

pub fn services_with_images(images: StubImages) -> Services {
    let wordnet = fixture::wordnet();
    let reference = ReferenceSense::resolve(&wordnet, "spain").expect("fixture has spain");
    Services {
        words: WordList::parse("cat\ndog\nfox\nquick\nrun"),
        lexicon: Arc::new(wordnet),
        reference,
        images: Arc::new(images),
        sentiment: Some(Arc::new(StubScorer(scores()))),
        generator: Some(Arc::new(StubGenerator::replying(" and then\\nmore"))),
    }
}

pub fn services() -> Services {
    services_with_images(StubImages::ok())
}

pub fn router(features: Features) -> Router {
    Router::new(features, services()).expect("fixture router")
}

pub fn router_with_images(features: Features, images: StubImages) -> Router {
    Router::new(features, services_with_images(images)).expect("fixture router")
}

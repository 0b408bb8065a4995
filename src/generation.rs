// generation.rs - Text Generation Client
// Sends prompt completions to a local LM Studio / Ollama server
// (OpenAI-compatible /v1/completions) for the ai command.
//
// Key Features:
// - lmapiconf.txt configuration with the same multi-path fallback as botconfig.txt
// - Fixed sampling parameters, caller-chosen temperature
// - Returns the prompt followed by its continuation, like a causal LM decode
//
// Used by: commands/ai.rs, main.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{BotError, ConfigError};

pub const LM_CONFIG_FILE: &str = "lmapiconf.txt";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sampling parameters for one generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub max_length: u32,
}

impl GenerationParams {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            top_k: 25,
            top_p: 1.0,
            repetition_penalty: 1.2,
            max_length: 100,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::with_temperature(DEFAULT_TEMPERATURE)
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Prompt followed by the generated continuation
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BotError>;
}

// LM configuration structure
#[derive(Debug, Clone)]
pub struct LmConfig {
    pub base_url: String,
    pub timeout: u64,
    pub model: String,
}

impl LmConfig {
    /// Load LM Studio/Ollama configuration from lmapiconf.txt and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Settings::from_optional_file(LM_CONFIG_FILE).with_env();
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let base_url = settings
            .require("LM_STUDIO_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let timeout = settings
            .parse_value::<u64>("LM_STUDIO_TIMEOUT")?
            .ok_or(ConfigError::Missing("LM_STUDIO_TIMEOUT"))?;
        let model = settings.require("DEFAULT_MODEL")?.to_string();

        Ok(Self {
            base_url,
            timeout,
            model,
        })
    }
}

// API request/response structures (non-streaming)
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    repeat_penalty: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Continuation text of the first choice in a completion response body
fn completion_text(body: &str) -> Result<String, BotError> {
    let response: CompletionResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| BotError::Generation("response contained no choices".to_string()))
}

pub struct LmStudioGenerator {
    client: reqwest::Client,
    config: LmConfig,
}

impl LmStudioGenerator {
    pub fn new(config: LmConfig) -> Result<Self, BotError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextGenerator for LmStudioGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, BotError> {
        // The OpenAI-compatible API has no n-gram blocking; repeat_penalty is
        // the closest knob the server exposes
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            temperature: params.temperature,
            top_k: params.top_k,
            top_p: params.top_p,
            repeat_penalty: params.repetition_penalty,
            max_tokens: params.max_length,
            stream: false,
        };

        let api_url = format!("{}/v1/completions", self.config.base_url);
        log::debug!(
            "[GENERATION] POST {} (model {}, temperature {})",
            api_url,
            self.config.model,
            params.temperature
        );

        let response = self.client.post(&api_url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(BotError::Generation(format!(
                "API request failed: HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let continuation = completion_text(&body)?;
        Ok(format!("{}{}", prompt, continuation))
    }
}

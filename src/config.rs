// config.rs - Configuration Loading
// Reads KEY=VALUE configuration files (botconfig.txt, lmapiconf.txt) with
// multi-path fallback and layers environment variables on top.
//
// Key Features:
// - Same search order for every config file: ., .., ../.., src/
// - Environment variables override file values
// - Basic/extended bot variants with per-feature overrides
//
// Used by: main.rs, generation.rs

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::image::DEFAULT_CAT_API_URL;
use crate::router::Features;

pub const BOT_CONFIG_FILE: &str = "botconfig.txt";

const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";

// Keys that may come from the environment
const ENV_KEYS: &[&str] = &[
    "DISCORD_TOKEN",
    "TOKEN",
    "BOT_VARIANT",
    "ENABLE_AI",
    "ENABLE_ANALYZE",
    "REFERENCE_WORD",
    "WORDS_FILE",
    "WORDNET_DIR",
    "CAT_API_URL",
    "LM_STUDIO_BASE_URL",
    "LM_STUDIO_TIMEOUT",
    "DEFAULT_MODEL",
];

/// Candidate locations of a config file, in search order
pub fn config_paths(file_name: &str) -> [String; 4] {
    [
        file_name.to_string(),
        format!("../{}", file_name),
        format!("../../{}", file_name),
        format!("src/{}", file_name),
    ]
}

/// Flat KEY=VALUE settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Parse KEY=VALUE lines, skipping blanks and `#` comments
    pub fn parse(content: &str) -> Self {
        // Remove BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut values = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { values }
    }

    /// Read the first existing copy of `file_name`
    pub fn from_file(file_name: &'static str) -> Result<Self, ConfigError> {
        for path in config_paths(file_name) {
            match fs::read_to_string(&path) {
                Ok(content) => {
                    println!("✅ Configuration loaded from {}", path);
                    return Ok(Self::parse(&content));
                }
                // Try next path
                Err(_) => continue,
            }
        }
        Err(ConfigError::FileNotFound(file_name))
    }

    /// Like `from_file`, but a missing file yields empty settings
    pub fn from_optional_file(file_name: &'static str) -> Self {
        Self::from_file(file_name).unwrap_or_else(|e| {
            log::info!("[CONFIG] {}; using environment only", e);
            Self::default()
        })
    }

    pub fn with_env(mut self) -> Self {
        for key in ENV_KEYS {
            if let Ok(value) = env::var(key) {
                self.values.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Non-empty value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    pub fn parse_value<T: std::str::FromStr>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| ConfigError::Invalid {
                key,
                value: raw.to_string(),
            }),
        }
    }

    pub fn flag(&self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        match self.get(key).map(str::to_lowercase) {
            None => Ok(None),
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(Some(true)),
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(Some(false)),
            Some(v) => Err(ConfigError::Invalid { key, value: v }),
        }
    }
}

/// The two flavours of the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// random word, compare, sillify, random car
    Basic,
    /// everything, including ai and analyze
    Extended,
}

impl Variant {
    pub fn features(self) -> Features {
        match self {
            Variant::Basic => Features::basic(),
            Variant::Extended => Features::extended(),
        }
    }

    pub fn reference_word(self) -> &'static str {
        match self {
            Variant::Basic => "weapon",
            Variant::Extended => "spain",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub variant: Variant,
    pub features: Features,
    pub reference_word: String,
    pub words_file: PathBuf,
    pub wordnet_dir: PathBuf,
    pub cat_api_url: String,
}

impl BotConfig {
    /// botconfig.txt (optional) overlaid with the environment
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Settings::from_optional_file(BOT_CONFIG_FILE).with_env();
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let token = settings
            .get("DISCORD_TOKEN")
            .or_else(|| settings.get("TOKEN"))
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        if token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::Placeholder("DISCORD_TOKEN"));
        }

        let variant = match settings.get("BOT_VARIANT").map(str::to_lowercase).as_deref() {
            None | Some("extended") => Variant::Extended,
            Some("basic") => Variant::Basic,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "BOT_VARIANT",
                    value: other.to_string(),
                })
            }
        };

        let mut features = variant.features();
        if let Some(enabled) = settings.flag("ENABLE_AI")? {
            features.text_generation = enabled;
        }
        if let Some(enabled) = settings.flag("ENABLE_ANALYZE")? {
            features.sentiment = enabled;
        }

        Ok(Self {
            token: token.to_string(),
            variant,
            features,
            reference_word: settings
                .get("REFERENCE_WORD")
                .unwrap_or(variant.reference_word())
                .to_lowercase(),
            words_file: PathBuf::from(settings.get("WORDS_FILE").unwrap_or("words.txt")),
            wordnet_dir: PathBuf::from(
                settings
                    .get("WORDNET_DIR")
                    .unwrap_or("nltk_data/corpora/wordnet"),
            ),
            cat_api_url: settings
                .get("CAT_API_URL")
                .unwrap_or(DEFAULT_CAT_API_URL)
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(text: &str) -> Settings {
        Settings::parse(text)
    }

    #[test]
    fn test_parse_skips_comments_and_bom() {
        let s = settings("\u{feff}# comment\n\nDISCORD_TOKEN = abc \nPREFIX=^\nnot a pair\n");
        assert_eq!(s.get("DISCORD_TOKEN"), Some("abc"));
        assert_eq!(s.get("PREFIX"), Some("^"));
        assert_eq!(s.get("not a pair"), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let s = settings("CAT_API_URL=https://example.com/search?limit=1");
        assert_eq!(s.get("CAT_API_URL"), Some("https://example.com/search?limit=1"));
    }

    #[test]
    fn test_defaults_to_extended_variant() {
        let config = BotConfig::from_settings(&settings("TOKEN=abc")).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.variant, Variant::Extended);
        assert_eq!(config.features, Features::extended());
        assert_eq!(config.reference_word, "spain");
        assert_eq!(config.words_file, PathBuf::from("words.txt"));
        assert_eq!(config.cat_api_url, DEFAULT_CAT_API_URL);
    }

    #[test]
    fn test_basic_variant_uses_weapon_reference() {
        let config =
            BotConfig::from_settings(&settings("DISCORD_TOKEN=abc\nBOT_VARIANT=Basic")).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.features, Features::basic());
        assert_eq!(config.reference_word, "weapon");
    }

    #[test]
    fn test_feature_overrides() {
        let config = BotConfig::from_settings(&settings(
            "DISCORD_TOKEN=abc\nBOT_VARIANT=basic\nENABLE_ANALYZE=yes",
        ))
        .unwrap();
        assert!(config.features.sentiment);
        assert!(!config.features.text_generation);
    }

    #[test]
    fn test_missing_and_placeholder_tokens_are_rejected() {
        assert!(matches!(
            BotConfig::from_settings(&settings("BOT_VARIANT=basic")),
            Err(ConfigError::Missing("DISCORD_TOKEN"))
        ));
        assert!(matches!(
            BotConfig::from_settings(&settings("DISCORD_TOKEN=YOUR_BOT_TOKEN_HERE")),
            Err(ConfigError::Placeholder(_))
        ));
        assert!(matches!(
            BotConfig::from_settings(&settings("DISCORD_TOKEN=")),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert!(matches!(
            BotConfig::from_settings(&settings("TOKEN=abc\nBOT_VARIANT=deluxe")),
            Err(ConfigError::Invalid { key: "BOT_VARIANT", .. })
        ));
        assert!(matches!(
            BotConfig::from_settings(&settings("TOKEN=abc\nENABLE_AI=maybe")),
            Err(ConfigError::Invalid { key: "ENABLE_AI", .. })
        ));
    }

    #[test]
    fn test_parse_value() {
        let s = settings("LM_STUDIO_TIMEOUT=30\nBAD=x");
        assert_eq!(s.parse_value::<u64>("LM_STUDIO_TIMEOUT").unwrap(), Some(30));
        assert_eq!(s.parse_value::<u64>("MISSING").unwrap(), None);
        assert!(s.parse_value::<u64>("BAD").is_err());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            Settings::from_file("no_such_config_file.txt"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}

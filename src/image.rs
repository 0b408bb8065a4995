// image.rs - Random Image Source
// Fetches a random cat picture from TheCatAPI image search endpoint.
//
// Used by: commands/random_cat.rs, main.rs

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BotError;

pub const DEFAULT_CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// URL of one random image
    async fn random_image_url(&self) -> Result<String, BotError>;
}

// One element of the search response array; other fields are ignored
#[derive(Debug, Deserialize)]
struct ImageResult {
    url: String,
}

/// Extract the first result's URL from an image search response body
pub fn first_image_url(body: &str) -> Result<String, BotError> {
    let results: Vec<ImageResult> = serde_json::from_str(body)?;
    results
        .into_iter()
        .next()
        .map(|result| result.url)
        .ok_or(BotError::NoImage)
}

pub struct CatApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CatApiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ImageSource for CatApiClient {
    async fn random_image_url(&self) -> Result<String, BotError> {
        log::debug!("[IMAGE] GET {}", self.endpoint);
        let body = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        first_image_url(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_image_url_takes_first_element() {
        let body = r#"[
            {"id":"a1","url":"https://cdn2.thecatapi.com/images/a1.jpg","width":500,"height":375},
            {"id":"b2","url":"https://cdn2.thecatapi.com/images/b2.jpg","width":640,"height":480}
        ]"#;
        assert_eq!(
            first_image_url(body).unwrap(),
            "https://cdn2.thecatapi.com/images/a1.jpg"
        );
    }

    #[test]
    fn test_empty_result_array() {
        assert!(matches!(first_image_url("[]"), Err(BotError::NoImage)));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            first_image_url(r#"{"message":"rate limited"}"#),
            Err(BotError::Json(_))
        ));
    }
}

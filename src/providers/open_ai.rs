use super::{
    build_client, build_user_message, read_json, trim_base_url, GenerationMetadata,
    GenerationResult, RecipeGenerator, TokenUsage, RECIPE_SYSTEM_PROMPT,
};
use crate::config::ProviderConfig;
use crate::model::{Ingredient, RecipeText};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::json;
use std::error::Error;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: build_client(timeout)?,
            api_key,
            base_url: trim_base_url(base_url),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url: trim_base_url(base_url),
            model,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

#[async_trait]
impl RecipeGenerator for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        ingredients: &[Ingredient],
    ) -> Result<GenerationResult, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": RECIPE_SYSTEM_PROMPT},
                    {"role": "user", "content": build_user_message(ingredients)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let (status, response_body) = read_json(response, "OpenAI").await?;
        debug!("OpenAI response: {:?}", response_body);

        if let Some(error) = response_body.get("error") {
            let error_message = error
                .as_str()
                .unwrap_or_else(|| error["message"].as_str().unwrap_or("Unknown error"));
            return Err(format!("OpenAI API error: {}", error_message).into());
        }
        if !status.is_success() {
            return Err(format!("OpenAI API returned HTTP {}", status).into());
        }

        let recipe = response_body["choices"][0]["message"]["content"]
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .ok_or("Failed to extract recipe from OpenAI response")?
            .to_string();

        let model_version = response_body["model"].as_str().map(|s| s.to_string());
        let input_tokens = response_body["usage"]["prompt_tokens"]
            .as_u64()
            .map(|v| v as u32);
        let output_tokens = response_body["usage"]["completion_tokens"]
            .as_u64()
            .map(|v| v as u32);

        Ok(GenerationResult {
            recipe: RecipeText::new(recipe),
            metadata: GenerationMetadata {
                model_version,
                tokens_used: TokenUsage {
                    input_tokens,
                    output_tokens,
                },
                latency_ms,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r###"{
                    "model": "gpt-4o-mini",
                    "choices": [{
                        "message": {
                            "content": "## Salt & Pepper Toast\n\n1. Toast the bread"
                        }
                    }],
                    "usage": {"prompt_tokens": 80, "completion_tokens": 20}
                }"###,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let ingredients = vec![
            Ingredient::new("salt").unwrap(),
            Ingredient::new("pepper").unwrap(),
        ];

        let result = provider.generate(&ingredients).await.unwrap();
        assert!(result.recipe.as_str().starts_with("## Salt & Pepper Toast"));
        assert_eq!(result.metadata.tokens_used.input_tokens, Some(80));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let ingredients = vec![Ingredient::new("rice").unwrap()];

        let result = provider.generate(&ingredients).await;
        assert!(result.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_gateway_error_keeps_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let ingredients = vec![Ingredient::new("rice").unwrap()];

        let err = provider.generate(&ingredients).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 502"));
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            "http://localhost/".to_string(),
            "gpt-4o-mini".to_string(),
        );
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.base_url, "http://localhost");
    }
}

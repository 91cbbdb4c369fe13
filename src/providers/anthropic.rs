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

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or("ANTHROPIC_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AnthropicProvider {
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
        AnthropicProvider {
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
impl RecipeGenerator for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        ingredients: &[Ingredient],
    ) -> Result<GenerationResult, Box<dyn Error + Send + Sync>> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": RECIPE_SYSTEM_PROMPT,
                "messages": [
                    {
                        "role": "user",
                        "content": build_user_message(ingredients)
                    }
                ]
            }))
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let (status, response_body) = read_json(response, "Anthropic").await?;
        debug!("Anthropic response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_type = error["type"].as_str().unwrap_or("unknown");
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(format!("Anthropic API error ({}): {}", error_type, error_message).into());
        }
        if !status.is_success() {
            return Err(format!("Anthropic API returned HTTP {}", status).into());
        }

        let recipe = response_body["content"][0]["text"]
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                format!(
                    "Failed to extract recipe from Anthropic response. Response: {}",
                    serde_json::to_string_pretty(&response_body)
                        .unwrap_or_else(|_| response_body.to_string())
                )
            })?
            .to_string();

        let model_version = response_body["model"].as_str().map(|s| s.to_string());
        let input_tokens = response_body["usage"]["input_tokens"]
            .as_u64()
            .map(|v| v as u32);
        let output_tokens = response_body["usage"]["output_tokens"]
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

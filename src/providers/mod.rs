mod anthropic;
mod factory;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_message, RECIPE_SYSTEM_PROMPT};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::error::Error;
use std::time::Duration;

use crate::model::{Ingredient, RecipeText};

/// Token usage reported by a provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenUsage {
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

/// Metadata about a generation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationMetadata {
    pub model_version: Option<String>,
    pub tokens_used: TokenUsage,
    pub latency_ms: u64,
}

/// A generated recipe together with call metadata
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub recipe: RecipeText,
    pub metadata: GenerationMetadata,
}

impl GenerationResult {
    /// Wrap plain Markdown with empty metadata
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        GenerationResult {
            recipe: RecipeText::new(markdown),
            metadata: GenerationMetadata::default(),
        }
    }
}

/// The external recipe-generation service: ingredients in, Markdown out
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Get the generator name (e.g., "anthropic", "openai")
    fn name(&self) -> &str;

    /// Suggest a recipe that can be made from the given ingredients
    async fn generate(
        &self,
        ingredients: &[Ingredient],
    ) -> Result<GenerationResult, Box<dyn Error + Send + Sync>>;
}

fn build_client(timeout: Duration) -> Result<Client, Box<dyn Error + Send + Sync>> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn trim_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Decode a JSON response body.
///
/// A body that is not JSON is reported with the HTTP status and the start
/// of the body, so gateway error pages stay readable.
async fn read_json(
    response: Response,
    provider: &str,
) -> Result<(StatusCode, Value), Box<dyn Error + Send + Sync>> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => Ok((status, value)),
        Err(e) if status.is_success() => {
            Err(format!("{} returned a body that is not JSON: {}", provider, e).into())
        }
        Err(_) => {
            let excerpt: String = body.chars().take(200).collect();
            Err(format!("{} returned HTTP {}: {}", provider, status, excerpt.trim()).into())
        }
    }
}

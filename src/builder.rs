use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AiConfig;
use crate::providers::ProviderFactory;
use crate::store::IngredientStore;
use crate::{ChefError, Session};

/// Which LLM provider generates recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    OpenAI,
    Ollama,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Ollama => "ollama",
        }
    }
}

/// Builder for configuring a [`Session`]
#[derive(Debug, Default)]
pub struct SessionBuilder {
    config: Option<AiConfig>,
    config_file: Option<PathBuf>,
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    ingredients: Vec<String>,
}

impl SessionBuilder {
    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: AiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from this TOML file instead of `config.toml`
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the LLM provider
    ///
    /// # Example
    /// ```
    /// use chef_claude::{LlmProvider, Session};
    ///
    /// let builder = Session::builder().provider(LlmProvider::Ollama);
    /// ```
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a different endpoint (proxy, local server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for generation requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Start the session with these ingredients already on the list
    ///
    /// # Example
    /// ```
    /// use chef_claude::Session;
    ///
    /// let builder = Session::builder().ingredients(["pasta", "tomato paste"]);
    /// ```
    pub fn ingredients<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients.extend(items.into_iter().map(Into::into));
        self
    }

    /// Build the session
    ///
    /// # Errors
    /// Returns `ChefError` if:
    /// - The configuration file or environment cannot be parsed
    /// - A seed ingredient is empty
    /// - The provider is disabled, unknown, or missing its API key
    pub fn build(self) -> Result<Session, ChefError> {
        let config = match (self.config, self.config_file) {
            (Some(config), _) => config,
            (None, Some(path)) => AiConfig::load_from(path)?,
            (None, None) => AiConfig::load()?,
        };

        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = config.provider(&provider_name);
        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }
        let timeout = self.timeout.unwrap_or_else(|| config.timeout());

        let store = IngredientStore::with_ingredients(self.ingredients)?;

        debug!(
            "Creating '{}' provider with model {}",
            provider_name, provider_config.model
        );
        let generator = ProviderFactory::create(&provider_name, &provider_config, timeout)
            .map_err(|e| ChefError::ProviderError(e.to_string()))?;

        Ok(Session::with_store(Arc::from(generator), store))
    }
}

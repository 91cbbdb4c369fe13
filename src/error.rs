use thiserror::Error;

/// Errors that can occur while building a session or asking for a recipe
#[derive(Error, Debug)]
pub enum ChefError {
    /// Ingredient text was empty after trimming
    #[error("Ingredient cannot be empty")]
    EmptyIngredient,

    /// A recipe was requested before any ingredient was added
    #[error("Add at least one ingredient before asking for a recipe")]
    NoIngredients,

    /// The generation service failed or returned nothing usable
    #[error("Recipe generation failed: {0}")]
    GenerationFailed(String),

    /// A provider could not be created from its configuration
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
